use serde::{Deserialize, Serialize};

// 教师实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    pub on_vacation: bool,
    pub rating: Option<f64>,
    pub total_ratings: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
