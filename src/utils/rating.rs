//! 评分聚合计算
//!
//! 存储的 rating 为精确均值，展示时按整数运算四舍五入到两位小数，
//! 因此连续提交 r1..rn 的结果恒等于 round(mean(r1..rn), 2)。

use crate::errors::{LinkLearnError, Result};
use crate::models::ratings::entities::RatingSummary;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub fn validate_rating(rating: i32) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(LinkLearnError::validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// 由均值与次数还原评分总和
pub fn rating_sum(summary: &RatingSummary) -> i64 {
    match summary.rating {
        Some(rating) if summary.total_ratings > 0 => {
            (rating * f64::from(summary.total_ratings)).round() as i64
        }
        _ => 0,
    }
}

/// 追加一次评分后的汇总
pub fn next_rating(current: &RatingSummary, new_rating: i32) -> RatingSummary {
    let sum = rating_sum(current) + i64::from(new_rating);
    let total = current.total_ratings + 1;
    RatingSummary {
        rating: Some(sum as f64 / f64::from(total)),
        total_ratings: total,
    }
}

/// 两位小数字符串，未评分时为 "0.00"
pub fn format_rating(summary: &RatingSummary) -> String {
    if summary.total_ratings <= 0 || summary.rating.is_none() {
        return "0.00".to_string();
    }
    let sum = rating_sum(summary);
    let total = i64::from(summary.total_ratings);
    // 四舍五入到百分位（sum 与 total 均为正）
    let hundredths = (sum * 200 + total) / (2 * total);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}
