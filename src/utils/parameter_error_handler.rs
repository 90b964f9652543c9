//! 请求参数解析失败时返回统一的错误响应

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message))
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid JSON body for {}: {}", req.path(), err);
    let response = bad_request(format!("Invalid JSON body: {err}"));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid query for {}: {}", req.path(), err);
    let response = bad_request(format!("Invalid query parameters: {err}"));
    InternalError::from_response(err, response).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    debug!("Invalid path for {}: {}", req.path(), err);
    let response = bad_request(format!("Invalid path parameters: {err}"));
    InternalError::from_response(err, response).into()
}
