pub mod auth;
pub mod classes;
pub mod comments;
pub mod common;
pub mod ratings;
pub mod reservations;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};

/// 程序启动时间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 响应信封中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,
    EmailInvalid = 2002,
    PasswordPolicyViolation = 2003,
    EmailAlreadyExists = 2004,
    RoleInvalid = 2005,

    // 学生
    StudentNotFound = 3000,
    StudentUpdateFailed = 3001,
    StudentDeleteFailed = 3002,

    // 教师
    TeacherNotFound = 4000,
    TeacherUpdateFailed = 4001,
    TeacherHasFutureReservations = 4002,
    TeacherSubjectAlreadyAssigned = 4003,

    // 科目
    SubjectNotFound = 5000,
    SubjectAlreadyExists = 5001,

    // 课表与课时
    ScheduleNotFound = 6000,
    ScheduleInvalid = 6001,
    SlotNotFound = 6002,
    VacationConflict = 6003,

    // 预约
    ReservationNotFound = 7000,
    ReservationConflict = 7001,
    ReservationInvalid = 7002,

    // 评分与评论
    RatingInvalid = 8000,
    CommentInvalid = 8001,
    CommentNotFound = 8002,
}
