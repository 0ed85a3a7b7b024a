pub mod account;
pub mod login;
pub mod me;
pub mod password;
pub mod profile;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        ChangePasswordRequest, ConfirmPasswordRequest, DeleteAccountRequest, EditProfileRequest,
        LoginRequest, Principal, RegisterRequest, Role,
    },
};
use crate::storage::Storage;

/// 按角色与邮箱查找账号，返回 (ID, 密码哈希)
pub(crate) async fn find_account(
    storage: &Arc<dyn Storage>,
    role: Role,
    email: &str,
) -> Result<Option<(i64, String)>> {
    match role {
        Role::Student => storage
            .get_student_by_email(email)
            .await
            .map(|s| s.map(|s| (s.id, s.password_hash))),
        Role::Teacher => storage
            .get_teacher_by_email(email)
            .await
            .map(|t| t.map(|t| (t.id, t.password_hash))),
        Role::Admin => storage
            .get_admin_by_email(email)
            .await
            .map(|a| a.map(|a| (a.id, a.password_hash))),
    }
}

/// 当前主体名下邮箱匹配的账号
///
/// 邮箱在该角色下不存在返回 404，属于其他账号返回 403。
pub(crate) async fn own_account(
    storage: &Arc<dyn Storage>,
    principal: &Principal,
    email: &str,
) -> std::result::Result<(i64, String), HttpResponse> {
    let email = email.trim().to_lowercase();
    match find_account(storage, principal.role, &email).await {
        Ok(Some((id, hash))) if id == principal.id => Ok((id, hash)),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only manage your own account",
        ))),
        Ok(None) => Err(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "User not found"))),
        Err(e) => {
            error!("Failed to load account {}: {}", email, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load account",
                )),
            )
        }
    }
}

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 学生或教师注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    // 当前令牌对应的主体
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::handle_me(self, request).await
    }

    // 修改密码
    pub async fn change_password(
        &self,
        body: ChangePasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_change_password(self, body, request).await
    }

    // 删除账号前确认密码
    pub async fn confirm_password(
        &self,
        email: String,
        body: ConfirmPasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_confirm_password(self, email, body, request).await
    }

    pub async fn edit_profile(
        &self,
        body: EditProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_edit_profile(self, body, request).await
    }

    pub async fn delete_account(
        &self,
        body: DeleteAccountRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        account::handle_delete_account(self, body, request).await
    }
}
