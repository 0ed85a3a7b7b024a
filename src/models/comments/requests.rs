use serde::Deserialize;

// 添加评论请求，字段缺失时由服务层返回 400
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub comment: Option<String>,
    pub commenter_name: Option<String>,
}
