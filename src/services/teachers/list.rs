use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::services::error_response;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers().await {
        Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teachers,
            "Teachers retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve teachers")),
    }
}

pub async fn list_dictating(
    service: &TeacherService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers_dictating(subject_id).await {
        Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teachers,
            "Teachers retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve teachers")),
    }
}
