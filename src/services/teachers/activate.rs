use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn activate_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.activate_teacher(id).await {
        Ok(Some(teacher)) => {
            info!("Teacher {} activated", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher activated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to activate teacher")),
    }
}
