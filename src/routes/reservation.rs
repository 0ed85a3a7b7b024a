use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::reservations::requests::{
    CreateReservationRequest, UpdateReservationStatusRequest,
};
use crate::services::ReservationService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ReservationService 实例
static RESERVATION_SERVICE: Lazy<ReservationService> = Lazy::new(ReservationService::new_lazy);

pub async fn create_reservation(
    req: HttpRequest,
    body: web::Json<CreateReservationRequest>,
) -> ActixResult<HttpResponse> {
    RESERVATION_SERVICE
        .create_reservation(&req, body.into_inner())
        .await
}

pub async fn list_for_student(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    RESERVATION_SERVICE.list_for_student(&req, path.0).await
}

pub async fn list_for_teacher(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    RESERVATION_SERVICE.list_for_teacher(&req, path.0).await
}

pub async fn delete_reservation(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    RESERVATION_SERVICE.delete_reservation(&req, path.0).await
}

pub async fn update_status(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateReservationStatusRequest>,
) -> ActixResult<HttpResponse> {
    RESERVATION_SERVICE
        .update_status(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_reservation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reservation")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/create").route(
                    web::post()
                        .to(create_reservation)
                        .wrap(middlewares::RequireRole::new_any(Role::student_admin_roles())),
                ),
            )
            .service(web::resource("/student/{id}").route(web::get().to(list_for_student)))
            .service(web::resource("/teacher/{id}").route(web::get().to(list_for_teacher)))
            // 预约双方或管理员，权限在业务层检查
            .service(web::resource("/delete/{id}").route(web::delete().to(delete_reservation)))
            .service(
                web::resource("/status/{id}").route(
                    web::put()
                        .to(update_status)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_admin_roles())),
                ),
            ),
    );
}
