use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects().await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve subjects")),
    }
}

/// 至少有一位教师教授的科目
pub async fn list_dictated_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_dictated_subjects().await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve subjects")),
    }
}

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_subject_by_id(id).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve subject")),
    }
}
