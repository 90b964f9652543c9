// API 错误码，写入 ApiResponse.code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    PermissionDenied = 1003,
    NotFound = 1004,
    Conflict = 1009,
    BusinessRuleViolated = 1022,
    InternalServerError = 5000,
}
