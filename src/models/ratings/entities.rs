/// 评分聚合的当前状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub rating: Option<f64>,
    pub total_ratings: i32,
}
