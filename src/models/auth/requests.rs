use serde::Deserialize;

use super::entities::Role;

// 登录请求（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

// 注册请求
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// 教师注册时可附带所授科目
    #[serde(default)]
    pub subjects: Vec<i64>,
}

// 修改密码请求
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub old_password: String,
    pub new_password: String,
}

// 编辑个人资料；subjects 仅对教师生效，给出时整体替换
#[derive(Debug, Deserialize)]
pub struct EditProfileRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(default)]
    pub subjects: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub email: String,
}

// 删除账号前的密码确认
#[derive(Debug, Deserialize)]
pub struct ConfirmPasswordRequest {
    pub password: String,
}
