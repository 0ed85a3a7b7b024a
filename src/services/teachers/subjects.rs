use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::errors::LinkLearnError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::Role,
    teachers::{
        requests::{TeacherSubjectRequest, UpdateTeacherSubjectsRequest},
        responses::TeacherSubjectsResponse,
    },
};
use crate::services::{error_response, forbidden, require_principal};

pub async fn assign_subject(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    body: TeacherSubjectRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if !principal.owns(Role::Teacher, id) {
        return Ok(forbidden("You can only manage your own subjects"));
    }

    let storage = service.get_storage(request);
    match storage.assign_subject(id, body.subject_id).await {
        Ok(subjects) => {
            info!("Subject {} assigned to teacher {}", body.subject_id, id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                TeacherSubjectsResponse {
                    teacher_id: id,
                    subjects,
                },
                "Subject assigned successfully",
            )))
        }
        Err(LinkLearnError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::TeacherSubjectAlreadyAssigned, msg),
        )),
        Err(e) => Ok(error_response(&e, "Failed to assign subject")),
    }
}

pub async fn remove_subject(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    body: TeacherSubjectRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if !principal.owns(Role::Teacher, id) {
        return Ok(forbidden("You can only manage your own subjects"));
    }

    let storage = service.get_storage(request);
    match storage.get_teacher_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to retrieve teacher")),
    }

    match storage.remove_subject(id, body.subject_id).await {
        Ok(true) => {
            info!("Subject {} removed from teacher {}", body.subject_id, id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject removed successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject is not assigned to this teacher",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to remove subject")),
    }
}

pub async fn replace_subjects(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    body: UpdateTeacherSubjectsRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if !principal.owns(Role::Teacher, id) {
        return Ok(forbidden("You can only manage your own subjects"));
    }

    if body.subjects.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "At least one subject is required",
        )));
    }

    let storage = service.get_storage(request);
    match storage.replace_teacher_subjects(id, body.subjects).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherSubjectsResponse {
                teacher_id: id,
                subjects,
            },
            "Subjects updated successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to update subjects")),
    }
}
