use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::auth::requests::{
    ChangePasswordRequest, ConfirmPasswordRequest, DeleteAccountRequest, EditProfileRequest,
    LoginRequest, RegisterRequest,
};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(login_data.into_inner(), &req).await
}

pub async fn register(
    req: HttpRequest,
    register_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(register_data.into_inner(), &req).await
}

pub async fn me(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.me(&request).await
}

pub async fn change_password(
    req: HttpRequest,
    body: web::Json<ChangePasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.change_password(body.into_inner(), &req).await
}

pub async fn edit_profile(
    req: HttpRequest,
    body: web::Json<EditProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.edit_profile(body.into_inner(), &req).await
}

pub async fn delete_account(
    req: HttpRequest,
    body: web::Json<DeleteAccountRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.delete_account(body.into_inner(), &req).await
}

pub async fn confirm_password(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<ConfirmPasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .confirm_password(path.into_inner(), body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/authentication")
            .service(
                web::resource("/login")
                    .wrap(middlewares::RateLimit::login())
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/register")
                    .wrap(middlewares::RateLimit::register())
                    .route(web::post().to(register)),
            )
            .service(
                web::resource("/me")
                    .wrap(middlewares::RequireJWT)
                    .route(web::get().to(me)),
            )
            // 限流在内层，按已认证主体计数
            .service(
                web::resource("/change-password")
                    .wrap(middlewares::RateLimit::password())
                    .wrap(middlewares::RequireJWT)
                    .route(web::put().to(change_password)),
            )
            .service(
                web::resource("/edit-profile")
                    .wrap(middlewares::RequireRole::new_any(Role::member_roles()))
                    .wrap(middlewares::RequireJWT)
                    .route(web::put().to(edit_profile)),
            )
            .service(
                web::resource("/delete-account")
                    .wrap(middlewares::RequireRole::new_any(Role::member_roles()))
                    .wrap(middlewares::RequireJWT)
                    .route(web::delete().to(delete_account)),
            )
            .service(
                web::resource("/delete-account/{email}")
                    .wrap(middlewares::RateLimit::password())
                    .wrap(middlewares::RequireRole::new_any(Role::member_roles()))
                    .wrap(middlewares::RequireJWT)
                    .route(web::post().to(confirm_password)),
            ),
    );
}
