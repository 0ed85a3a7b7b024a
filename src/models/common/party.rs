use serde::{Deserialize, Serialize};

/// 可被评分、评论的一方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Student,
    Teacher,
}

impl Party {
    pub fn label(&self) -> &'static str {
        match self {
            Party::Student => "Student",
            Party::Teacher => "Teacher",
        }
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Party::Student => write!(f, "student"),
            Party::Teacher => write!(f, "teacher"),
        }
    }
}
