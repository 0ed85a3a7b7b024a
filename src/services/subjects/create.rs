use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::errors::LinkLearnError;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};
use crate::services::error_response;
use crate::utils::validate::validate_subject_name;

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    body: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let name = body.name.trim();
    if let Err(msg) = validate_subject_name(name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    let storage = service.get_storage(request);
    match storage.create_subject(name).await {
        Ok(subject) => {
            info!("Subject '{}' created", subject.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                subject,
                "Subject created successfully",
            )))
        }
        Err(LinkLearnError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::SubjectAlreadyExists, msg))),
        Err(e) => Ok(error_response(&e, "Failed to create subject")),
    }
}
