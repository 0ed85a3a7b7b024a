use serde::{Deserialize, Serialize};

/// 每周课表模板（本身不可预约）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub id: i64,
    pub teacher_id: i64,
    /// ISO 星期：周一 = 1 … 周日 = 7
    pub day_of_week: i32,
    /// HH:MM:SS
    pub start_time: String,
    pub end_time: String,
    pub max_students: i32,
}
