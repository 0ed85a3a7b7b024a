use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::{AuthService, find_account};

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();
    let email = login_request.email.trim().to_lowercase();

    // 1. 按角色查找账号，取出 ID 与密码哈希
    let account = find_account(&storage, login_request.role, &email).await;

    let (id, password_hash) = match account {
        Ok(Some(account)) => account,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Email or password is incorrect",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load account for login: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Email or password is incorrect",
        )));
    }

    // 3. 签发访问令牌
    match JwtUtils::generate_access_token(id, login_request.role) {
        Ok(access_token) => {
            tracing::info!("{} {} logged in successfully", login_request.role, id);

            let response = LoginResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                role: login_request.role,
                id,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
