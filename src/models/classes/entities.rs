use serde::{Deserialize, Serialize};

/// 具体日期的可预约课时
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: i64,
    pub datetime: chrono::DateTime<chrono::Utc>,
    pub teacher_id: i64,
    pub max_students: i32,
    pub current_students: i32,
    pub is_taken: bool,
}

impl Slot {
    pub fn is_full(&self) -> bool {
        self.current_students >= self.max_students
    }

    pub fn is_open(&self) -> bool {
        !self.is_taken && !self.is_full()
    }
}

/// 教师可用时段视图（按配置时区展示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub scheduleid: String,
    pub start_time: String,
    pub end_time: String,
    pub teacherid: String,
    pub dayofmonth: u32,
    pub dayofweek: u32,
    pub maxstudents: i32,
}
