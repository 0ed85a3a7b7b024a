use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, auth::Role};
use crate::services::{error_response, forbidden, require_principal};

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if !principal.owns(Role::Student, id) {
        return Ok(forbidden("You can only delete your own account"));
    }

    let storage = service.get_storage(request);
    match storage.delete_student(id).await {
        Ok(true) => {
            info!("Student {} deleted by {} {}", id, principal.role, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to delete student")),
    }
}
