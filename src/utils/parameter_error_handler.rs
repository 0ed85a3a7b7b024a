//! 请求参数解析失败时统一返回 400 信封

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn to_bad_request<E: std::fmt::Display + std::fmt::Debug + 'static>(
    kind: &str,
    err: E,
    req: &HttpRequest,
) -> actix_web::Error {
    debug!("{} error on {}: {}", kind, req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid {kind}: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    to_bad_request("JSON body", err, req)
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    to_bad_request("query parameters", err, req)
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    to_bad_request("path parameters", err, req)
}
