use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::comments::requests::CreateCommentRequest;
use crate::models::common::Party;
use crate::models::ratings::requests::SubmitRatingRequest;
use crate::models::teachers::requests::{
    TeacherSubjectRequest, UpdateTeacherRequest, UpdateTeacherSubjectsRequest,
};
use crate::services::{CommentService, RatingService, TeacherService};
use crate::utils::{SafeIDI64, SafeSubjectIdI64};

// 懒加载的全局服务实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);
static RATING_SERVICE: Lazy<RatingService> = Lazy::new(RatingService::new_lazy);
static COMMENT_SERVICE: Lazy<CommentService> = Lazy::new(CommentService::new_lazy);

pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(&req).await
}

pub async fn list_dictating(req: HttpRequest, path: SafeSubjectIdI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_dictating(&req, path.0).await
}

pub async fn get_teacher(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(&req, path.0).await
}

pub async fn update_teacher(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_teacher(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(&req, path.0).await
}

pub async fn activate_teacher(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.activate_teacher(&req, path.0).await
}

pub async fn assign_subject(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<TeacherSubjectRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .assign_subject(&req, path.0, body.into_inner())
        .await
}

pub async fn remove_subject(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<TeacherSubjectRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .remove_subject(&req, path.0, body.into_inner())
        .await
}

pub async fn replace_subjects(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateTeacherSubjectsRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .replace_subjects(&req, path.0, body.into_inner())
        .await
}

pub async fn get_rating(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    RATING_SERVICE.get_rating(&req, Party::Teacher, path.0).await
}

pub async fn update_rating(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitRatingRequest>,
) -> ActixResult<HttpResponse> {
    RATING_SERVICE
        .submit_rating(&req, Party::Teacher, path.0, body.into_inner())
        .await
}

pub async fn get_comments(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .list_comments(&req, Party::Teacher, path.0)
        .await
}

pub async fn add_comment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateCommentRequest>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .add_comment(&req, Party::Teacher, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teachers")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/all-teachers").route(web::get().to(list_teachers)))
            .service(
                web::resource("/all-dictating/{subjectid}").route(
                    web::get()
                        .to(list_dictating)
                        .wrap(middlewares::RequireRole::new_any(Role::student_roles())),
                ),
            )
            .service(
                web::resource("/update/{id}").route(
                    web::put()
                        .to(update_teacher)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_admin_roles())),
                ),
            )
            .service(
                web::resource("/delete/{id}").route(
                    web::delete()
                        .to(delete_teacher)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_admin_roles())),
                ),
            )
            .service(
                web::resource("/activate/{id}").route(
                    web::put()
                        .to(activate_teacher)
                        .wrap(middlewares::RequireRole::new(&Role::Admin)),
                ),
            )
            .service(
                web::resource("/assign-subject/{id}").route(
                    web::post()
                        .to(assign_subject)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_admin_roles())),
                ),
            )
            .service(
                web::resource("/remove-subject/{id}").route(
                    web::delete()
                        .to(remove_subject)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_admin_roles())),
                ),
            )
            .service(
                web::resource("/update-subjects/{id}").route(
                    web::put()
                        .to(replace_subjects)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_admin_roles())),
                ),
            )
            .service(
                web::resource("/get-rating/{id}").route(
                    web::get()
                        .to(get_rating)
                        .wrap(middlewares::RequireRole::new_any(Role::member_roles())),
                ),
            )
            .service(
                web::resource("/update-rating/{id}").route(
                    web::put()
                        .to(update_rating)
                        .wrap(middlewares::RequireRole::new_any(Role::member_roles())),
                ),
            )
            .service(
                web::resource("/get-comments/{id}").route(
                    web::get()
                        .to(get_comments)
                        .wrap(middlewares::RequireRole::new_any(Role::member_roles())),
                ),
            )
            .service(
                web::resource("/add-comment/{id}").route(
                    web::post()
                        .to(add_comment)
                        .wrap(middlewares::RequireRole::new_any(Role::member_roles())),
                ),
            )
            .service(web::resource("/{id}").route(web::get().to(get_teacher))),
    );
}
