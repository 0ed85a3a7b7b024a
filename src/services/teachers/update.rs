use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::Role,
    teachers::{requests::UpdateTeacherRequest, responses::TeacherResponse},
};
use crate::services::{error_response, forbidden, require_principal};
use crate::utils::validate::validate_name;

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    mut update: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if !principal.owns(Role::Teacher, id) {
        return Ok(forbidden("You can only update your own profile"));
    }

    if update.firstname.is_none() && update.lastname.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::TeacherUpdateFailed,
            "Nothing to update",
        )));
    }

    for name in [&mut update.firstname, &mut update.lastname]
        .into_iter()
        .flatten()
    {
        *name = name.trim().to_string();
        if let Err(msg) = validate_name(name) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::TeacherUpdateFailed, msg)));
        }
    }

    let storage = service.get_storage(request);
    let teacher = match storage.update_teacher(id, update).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to update teacher")),
    };

    info!("Teacher {} updated by {} {}", id, principal.role, principal.id);
    match storage.list_teacher_subjects(id).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherResponse { teacher, subjects },
            "Teacher updated successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve teacher subjects")),
    }
}
