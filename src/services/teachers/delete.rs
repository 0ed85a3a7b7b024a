use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::errors::LinkLearnError;
use crate::models::{ApiResponse, ErrorCode, auth::Role};
use crate::services::{error_response, forbidden, require_principal};

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if !principal.owns(Role::Teacher, id) {
        return Ok(forbidden("You can only delete your own account"));
    }

    let storage = service.get_storage(request);
    let now = chrono::Utc::now().timestamp();

    match storage.delete_teacher(id, now).await {
        Ok(true) => {
            info!("Teacher {} deleted by {} {}", id, principal.role, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(LinkLearnError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::TeacherHasFutureReservations, msg),
        )),
        Err(e) => Ok(error_response(&e, "Failed to delete teacher")),
    }
}
