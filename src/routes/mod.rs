pub mod courses;

pub mod lessons;

pub use courses::configure_courses_routes;
pub use lessons::configure_lessons_routes;

use actix_web::HttpResponse;
use tracing::{error, info};

use crate::errors::AcademyError;
use crate::models::{ApiResponse, ErrorCode};

// 业务错误转换为 HTTP 响应
pub(crate) fn error_response(err: &AcademyError) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        error!("{}", err.format_simple());
    } else {
        info!("Request rejected: {}", err.format_simple());
    }
    HttpResponse::build(status).json(ApiResponse::from_error(err))
}

pub(crate) fn missing_actor_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "无法获取操作者信息",
    ))
}
