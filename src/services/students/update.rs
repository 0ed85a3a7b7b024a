use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::Role,
    students::{requests::UpdateStudentRequest, responses::StudentResponse},
};
use crate::services::{error_response, forbidden, require_principal};
use crate::utils::validate::validate_name;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    mut update: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if !principal.owns(Role::Student, id) {
        return Ok(forbidden("You can only update your own profile"));
    }

    if update.firstname.is_none() && update.lastname.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentUpdateFailed,
            "Nothing to update",
        )));
    }

    // 校验并规范化姓名
    for name in [&mut update.firstname, &mut update.lastname]
        .into_iter()
        .flatten()
    {
        *name = name.trim().to_string();
        if let Err(msg) = validate_name(name) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::StudentUpdateFailed, msg)));
        }
    }

    let storage = service.get_storage(request);
    match storage.update_student(id, update).await {
        Ok(Some(student)) => {
            info!("Student {} updated by {} {}", id, principal.role, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentResponse { student },
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to update student")),
    }
}
