use chrono::NaiveDate;
use serde::Deserialize;

// 设置假期请求
#[derive(Debug, Clone, Deserialize)]
pub struct AssignVacationRequest {
    /// 管理员操作时必填；教师默认为本人
    pub teacher_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// 结束假期请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopVacationRequest {
    pub teacher_id: Option<i64>,
}

// 按科目过滤教师可用时段
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectAvailabilityRequest {
    pub subject_id: i64,
}
