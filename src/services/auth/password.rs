use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{ChangePasswordRequest, ConfirmPasswordRequest},
};
use crate::services::{error_response, require_principal};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

use super::{AuthService, own_account};

fn invalid_password() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Invalid password",
    ))
}

pub async fn handle_change_password(
    service: &AuthService,
    body: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_password_simple(&body.new_password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordPolicyViolation,
            msg,
        )));
    }

    let storage = service.get_storage(request);
    let (id, password_hash) = match own_account(&storage, &principal, &body.email).await {
        Ok(account) => account,
        Err(resp) => return Ok(resp),
    };

    if !verify_password(&body.old_password, &password_hash) {
        return Ok(invalid_password());
    }

    let new_hash = match hash_password(&body.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to change password",
                )),
            );
        }
    };

    match storage.update_password(principal.role, id, &new_hash).await {
        Ok(true) => {
            info!("{} {} changed password", principal.role, id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "User not found"))),
        Err(e) => Ok(error_response(&e, "Failed to change password")),
    }
}

/// 删除账号前的密码确认，不修改任何数据
pub async fn handle_confirm_password(
    service: &AuthService,
    email: String,
    body: ConfirmPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let (_, password_hash) = match own_account(&storage, &principal, &email).await {
        Ok(account) => account,
        Err(resp) => return Ok(resp),
    };

    if !verify_password(&body.password, &password_hash) {
        return Ok(invalid_password());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password is correct")))
}
