pub mod auth;
pub mod classes;
pub mod comments;
pub mod ratings;
pub mod reservations;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use auth::AuthService;
pub use classes::ClassService;
pub use comments::CommentService;
pub use ratings::RatingService;
pub use reservations::ReservationService;
pub use schedules::ScheduleService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::errors::LinkLearnError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, auth::Principal};

/// 将存储层错误转换为 HTTP 响应
///
/// 业务错误原样返回消息；基础设施错误只记录日志，对外返回 `context`。
pub(crate) fn error_response(err: &LinkLearnError, context: &str) -> HttpResponse {
    match err {
        LinkLearnError::Validation(msg) | LinkLearnError::DateParse(msg) => {
            HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg.as_str()))
        }
        LinkLearnError::NotFound(msg) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, msg.as_str())),
        LinkLearnError::Conflict(msg) => HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::Conflict, msg.as_str())),
        LinkLearnError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg.as_str())),
        LinkLearnError::Authorization(msg) => HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, msg.as_str())),
        _ => {
            error!("{}: {}", context, err.format_simple());
            HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::InternalServerError, context))
        }
    }
}

/// 当前请求的主体；缺失时返回 401 响应
pub(crate) fn require_principal(request: &HttpRequest) -> Result<Principal, HttpResponse> {
    RequireJWT::extract_principal(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing principal",
        ))
    })
}

pub(crate) fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, message))
}
