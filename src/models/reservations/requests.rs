use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::entities::ReservationStatus;

// 创建预约请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationRequest {
    /// 管理员代为预约时必填；学生默认为本人
    pub student_id: Option<i64>,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub schedule_id: i64,
    /// 以下字段可选，若提供必须与课时一致
    pub datetime: Option<DateTime<Utc>>,
    pub day_of_week: Option<u32>,
    pub start_time: Option<String>,
}

/// 存储层使用的预约参数
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub schedule_id: i64,
    pub datetime: Option<DateTime<Utc>>,
    pub day_of_week: Option<u32>,
    pub start_time: Option<chrono::NaiveTime>,
}

// 更新预约状态请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}
