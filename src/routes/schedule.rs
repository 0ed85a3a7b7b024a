use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::schedules::requests::CreateWeeklyScheduleRequest;
use crate::services::ScheduleService;
use crate::utils::SafeTeacherIdI64;

// 懒加载的全局 ScheduleService 实例
static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn create_schedule(
    req: HttpRequest,
    body: web::Json<CreateWeeklyScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.create_schedule(&req, body.into_inner()).await
}

pub async fn list_schedules(req: HttpRequest, path: SafeTeacherIdI64) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.list_schedules(&req, path.0).await
}

// 配置路由
pub fn configure_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/schedule")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/create").route(
                    web::post()
                        .to(create_schedule)
                        // 教师创建自己的课表，管理员需指定教师
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_admin_roles())),
                ),
            )
            .service(web::resource("/{teacherid}").route(web::get().to(list_schedules))),
    );
}
