use serde::Serialize;

/// 评分汇总，rating 固定保留两位小数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingResponse {
    pub rating: String,
    pub total_ratings: i32,
}
