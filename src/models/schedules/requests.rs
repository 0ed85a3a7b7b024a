use serde::Deserialize;

// 创建每周课表请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWeeklyScheduleRequest {
    /// 管理员代为创建时必填；教师创建时以令牌中的身份为准
    pub teacher_id: Option<i64>,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_max_students")]
    pub max_students: i32,
}

fn default_max_students() -> i32 {
    1
}

/// 存储层使用的已校验模板
#[derive(Debug, Clone)]
pub struct NewWeeklySchedule {
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub max_students: i32,
}
