use serde::Deserialize;

// 提交评分请求
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRatingRequest {
    pub rating: i32,
    /// 关联的预约，提供时会被标记为已评分
    pub reservation_id: Option<i64>,
}
