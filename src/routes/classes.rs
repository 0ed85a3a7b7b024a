use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::classes::requests::{
    AssignVacationRequest, StopVacationRequest, SubjectAvailabilityRequest,
};
use crate::services::ClassService;
use crate::utils::SafeTeacherIdI64;

// 懒加载的全局 ClassService 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

pub async fn list_individual(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_individual(&req).await
}

pub async fn list_group(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_group(&req).await
}

pub async fn assign_vacation(
    req: HttpRequest,
    body: web::Json<AssignVacationRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.assign_vacation(&req, body.into_inner()).await
}

// 请求体可省略（教师结束自己的假期）
pub async fn stop_vacation(
    req: HttpRequest,
    body: Option<web::Json<StopVacationRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(|b| b.into_inner()).unwrap_or_default();
    CLASS_SERVICE.stop_vacation(&req, body).await
}

pub async fn teacher_availability(
    req: HttpRequest,
    path: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.teacher_availability(&req, path.0, None).await
}

pub async fn teacher_subject_availability(
    req: HttpRequest,
    path: SafeTeacherIdI64,
    body: web::Json<SubjectAvailabilityRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .teacher_availability(&req, path.0, Some(body.subject_id))
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/classes")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/individual").route(web::get().to(list_individual)))
            .service(web::resource("/group").route(web::get().to(list_group)))
            .service(
                web::resource("/vacation").route(
                    web::post()
                        .to(assign_vacation)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_admin_roles())),
                ),
            )
            .service(
                web::resource("/vacation/stop").route(
                    web::post()
                        .to(stop_vacation)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_admin_roles())),
                ),
            )
            .service(web::resource("/{teacherid}").route(web::get().to(teacher_availability)))
            .service(
                web::resource("/{teacherid}/subject")
                    .route(web::post().to(teacher_subject_availability)),
            ),
    );
}
