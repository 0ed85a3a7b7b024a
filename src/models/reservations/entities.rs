use serde::{Deserialize, Serialize};

// 预约状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Booked,    // 已预约
    Completed, // 已上课
    Cancelled, // 已取消
}

impl ReservationStatus {
    pub const BOOKED: &'static str = "booked";
    pub const COMPLETED: &'static str = "completed";
    pub const CANCELLED: &'static str = "cancelled";

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Booked => Self::BOOKED,
            ReservationStatus::Completed => Self::COMPLETED,
            ReservationStatus::Cancelled => Self::CANCELLED,
        }
    }
}

impl<'de> Deserialize<'de> for ReservationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ReservationStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid reservation status: '{s}'. Supported: booked, completed, cancelled"
            ))
        })
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::BOOKED => Ok(ReservationStatus::Booked),
            Self::COMPLETED => Ok(ReservationStatus::Completed),
            Self::CANCELLED => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Invalid reservation status: {s}")),
        }
    }
}

// 预约实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub schedule_id: i64,
    pub datetime: chrono::DateTime<chrono::Utc>,
    pub status: ReservationStatus,
    /// 学生给教师的评分，0 表示未评
    pub student_rated: i32,
    /// 教师给学生的评分，0 表示未评
    pub is_rated: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
