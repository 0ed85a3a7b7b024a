use serde::Serialize;

use super::entities::Student;

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub student: Student,
}

/// 学生曾预约过的教师
#[derive(Debug, Clone, Serialize)]
pub struct PreviousTeacher {
    pub teacherid: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub rating: Option<f64>,
    /// 最近一次预约的 ID
    pub reservation_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnratedClassTeacher {
    pub teacherid: i64,
    pub firstname: String,
    pub lastname: String,
}

/// 已结束但学生尚未评分的课程
#[derive(Debug, Clone, Serialize)]
pub struct UnratedClass {
    pub reservation_id: i64,
    pub datetime: chrono::DateTime<chrono::Utc>,
    pub teacher: UnratedClassTeacher,
    pub studentrated: i32,
    pub subject: String,
}
