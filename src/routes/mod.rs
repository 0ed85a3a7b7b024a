pub mod auth;

pub mod classes;

pub mod reservation;

pub mod schedule;

pub mod students;

pub mod subjects;

pub mod teachers;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use reservation::configure_reservation_routes;
pub use schedule::configure_schedule_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use teachers::configure_teacher_routes;

use actix_web::web;

/// 注册全部业务路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_classes_routes)
        .configure(configure_schedule_routes)
        .configure(configure_reservation_routes)
        .configure(configure_student_routes)
        .configure(configure_teacher_routes)
        .configure(configure_subject_routes);
}
