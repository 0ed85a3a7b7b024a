use serde::Deserialize;

// 教师创建请求（存储层使用，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

// 教师更新请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeacherRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

// 单个科目分配/移除请求
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherSubjectRequest {
    pub subject_id: i64,
}

// 整体替换教师科目集合
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeacherSubjectsRequest {
    pub subjects: Vec<i64>,
}
