use serde::{Deserialize, Serialize};

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub rating: Option<f64>,
    pub total_ratings: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
