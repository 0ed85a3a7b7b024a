use serde::Deserialize;

// 学生创建请求（存储层使用，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

// 学生更新请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudentRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}
