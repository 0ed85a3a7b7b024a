use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode, teachers::responses::TeacherResponse};
use crate::services::error_response;

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match storage.get_teacher_by_id(id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to retrieve teacher")),
    };

    match storage.list_teacher_subjects(id).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherResponse { teacher, subjects },
            "Teacher retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve teacher subjects")),
    }
}
