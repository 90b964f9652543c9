//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 前五种错误对应排课引擎的业务错误分类，其余为基础设施错误。

use std::fmt;

use crate::models::ErrorCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_academy_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum AcademyError {
            $($variant(String),)*
        }

        impl AcademyError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AcademyError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AcademyError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AcademyError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AcademyError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AcademyError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_academy_errors! {
    Validation("E001", "Validation Error"),
    NotFound("E002", "Resource Not Found"),
    Conflict("E003", "Conflict Error"),
    Authorization("E004", "Authorization Error"),
    BusinessRule("E005", "Business Rule Error"),
    DatabaseConfig("E006", "Database Configuration Error"),
    DatabaseConnection("E007", "Database Connection Error"),
    DatabaseOperation("E008", "Database Operation Error"),
    FileOperation("E009", "File Operation Error"),
    Serialization("E010", "Serialization Error"),
    DateParse("E011", "Date Parse Error"),
}

impl AcademyError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 API 错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AcademyError::Validation(_) | AcademyError::DateParse(_) => ErrorCode::BadRequest,
            AcademyError::NotFound(_) => ErrorCode::NotFound,
            AcademyError::Conflict(_) => ErrorCode::Conflict,
            AcademyError::Authorization(_) => ErrorCode::PermissionDenied,
            AcademyError::BusinessRule(_) => ErrorCode::BusinessRuleViolated,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AcademyError::Validation(_) | AcademyError::DateParse(_) => StatusCode::BAD_REQUEST,
            AcademyError::NotFound(_) => StatusCode::NOT_FOUND,
            AcademyError::Conflict(_) => StatusCode::CONFLICT,
            AcademyError::Authorization(_) => StatusCode::FORBIDDEN,
            AcademyError::BusinessRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AcademyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AcademyError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AcademyError {
    fn from(err: sea_orm::DbErr) -> Self {
        AcademyError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AcademyError {
    fn from(err: std::io::Error) -> Self {
        AcademyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AcademyError {
    fn from(err: serde_json::Error) -> Self {
        AcademyError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AcademyError {
    fn from(err: chrono::ParseError) -> Self {
        AcademyError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AcademyError>;
