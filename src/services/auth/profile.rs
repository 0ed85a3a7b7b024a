use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{EditProfileRequest, PrincipalResponse, Role},
    students::requests::UpdateStudentRequest,
    teachers::requests::UpdateTeacherRequest,
};
use crate::services::{error_response, require_principal};
use crate::utils::validate::validate_name;

use super::{AuthService, own_account};

pub async fn handle_edit_profile(
    service: &AuthService,
    body: EditProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    let first_name = body.firstname.trim().to_string();
    let last_name = body.lastname.trim().to_string();
    if let Err(msg) = validate_name(&first_name).and_then(|_| validate_name(&last_name)) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    let storage = service.get_storage(request);
    let (id, _) = match own_account(&storage, &principal, &body.email).await {
        Ok(account) => account,
        Err(resp) => return Ok(resp),
    };

    let updated = match principal.role {
        Role::Teacher => {
            // 先替换科目集合，未知科目时姓名保持不变
            if let Some(subjects) = body.subjects
                && let Err(e) = storage.replace_teacher_subjects(id, subjects).await
            {
                return Ok(error_response(&e, "Failed to update profile"));
            }
            storage
                .update_teacher(
                    id,
                    UpdateTeacherRequest {
                        firstname: Some(first_name),
                        lastname: Some(last_name),
                    },
                )
                .await
                .map(|t| t.is_some())
        }
        _ => storage
            .update_student(
                id,
                UpdateStudentRequest {
                    firstname: Some(first_name),
                    lastname: Some(last_name),
                },
            )
            .await
            .map(|s| s.is_some()),
    };

    match updated {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::NotFound, "User not found")));
        }
        Err(e) => return Ok(error_response(&e, "Failed to update profile")),
    }

    info!("{} {} updated profile", principal.role, id);
    match storage.get_principal(id, principal.role).await {
        Ok(Some(principal)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PrincipalResponse { principal },
            "Profile updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "User not found"))),
        Err(e) => Ok(error_response(&e, "Failed to update profile")),
    }
}
