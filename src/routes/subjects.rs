use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::services::SubjectService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubjectService 实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req).await
}

pub async fn list_dictated_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_dictated_subjects(&req).await
}

pub async fn get_subject(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(&req, path.0).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.create_subject(&req, body.into_inner()).await
}

// 配置路由
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subject")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/all-subjects").route(web::get().to(list_subjects)))
            .service(
                web::resource("/all-subjects-dictated")
                    .route(web::get().to(list_dictated_subjects)),
            )
            .service(
                web::resource("/create").route(
                    web::post()
                        .to(create_subject)
                        .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                ),
            )
            .service(web::resource("/{id}").route(web::get().to(get_subject))),
    );
}
