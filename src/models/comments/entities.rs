use serde::{Deserialize, Serialize};

/// 学生或教师的评论（只追加，按 ID 排序）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    /// 被评论者 ID
    pub owner_id: i64,
    pub comment: String,
    pub commenter_name: String,
}
