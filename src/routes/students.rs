use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::comments::requests::CreateCommentRequest;
use crate::models::common::Party;
use crate::models::ratings::requests::SubmitRatingRequest;
use crate::models::students::requests::UpdateStudentRequest;
use crate::services::{CommentService, RatingService, StudentService};
use crate::utils::{SafeIDI64, SafeSubjectIdI64};

// 懒加载的全局服务实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static RATING_SERVICE: Lazy<RatingService> = Lazy::new(RatingService::new_lazy);
static COMMENT_SERVICE: Lazy<CommentService> = Lazy::new(CommentService::new_lazy);

pub async fn get_student(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, path.0).await
}

pub async fn update_student(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_student(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, path.0).await
}

pub async fn list_previous_teachers(
    req: HttpRequest,
    student: SafeIDI64,
    subject: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_previous_teachers(&req, student.0, subject.0)
        .await
}

pub async fn list_unrated_classes(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_unrated_classes(&req, path.0).await
}

pub async fn get_rating(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    RATING_SERVICE.get_rating(&req, Party::Student, path.0).await
}

pub async fn update_rating(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitRatingRequest>,
) -> ActixResult<HttpResponse> {
    RATING_SERVICE
        .submit_rating(&req, Party::Student, path.0, body.into_inner())
        .await
}

pub async fn get_comments(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .list_comments(&req, Party::Student, path.0)
        .await
}

pub async fn add_comment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateCommentRequest>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .add_comment(&req, Party::Student, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/update/{id}").route(
                    web::put()
                        .to(update_student)
                        .wrap(middlewares::RequireRole::new_any(Role::student_admin_roles())),
                ),
            )
            .service(
                web::resource("/delete/{id}").route(
                    web::delete()
                        .to(delete_student)
                        .wrap(middlewares::RequireRole::new_any(Role::student_admin_roles())),
                ),
            )
            .service(
                web::resource("/get-previous/{id}/{subjectid}").route(
                    web::get()
                        .to(list_previous_teachers)
                        .wrap(middlewares::RequireRole::new_any(Role::student_roles())),
                ),
            )
            .service(
                web::resource("/get-unrated-classes/{id}").route(
                    web::get()
                        .to(list_unrated_classes)
                        .wrap(middlewares::RequireRole::new_any(Role::student_roles())),
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
            .service(web::resource("/{id}").route(web::get().to(get_student))),
    );
}
