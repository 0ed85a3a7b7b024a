use serde::{Deserialize, Serialize};

// 主体角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student, // 学生
    Teacher, // 教师
    Admin,   // 管理员
}

impl Role {
    pub const STUDENT: &'static str = "STUDENT";
    pub const TEACHER: &'static str = "TEACHER";
    pub const ADMIN: &'static str = "ADMIN";

    pub fn admin_roles() -> &'static [&'static Role] {
        &[&Self::Admin]
    }
    pub fn student_roles() -> &'static [&'static Role] {
        &[&Self::Student]
    }
    pub fn student_admin_roles() -> &'static [&'static Role] {
        &[&Self::Student, &Self::Admin]
    }
    pub fn teacher_admin_roles() -> &'static [&'static Role] {
        &[&Self::Teacher, &Self::Admin]
    }
    pub fn member_roles() -> &'static [&'static Role] {
        &[&Self::Student, &Self::Teacher]
    }
    pub fn all_roles() -> &'static [&'static Role] {
        &[&Self::Student, &Self::Teacher, &Self::Admin]
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Role>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid role: '{s}'. Supported roles: STUDENT, TEACHER, ADMIN"
            ))
        })
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "{}", Role::STUDENT),
            Role::Teacher => write!(f, "{}", Role::TEACHER),
            Role::Admin => write!(f, "{}", Role::ADMIN),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Role::STUDENT => Ok(Role::Student),
            Role::TEACHER => Ok(Role::Teacher),
            Role::ADMIN => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

// 管理员实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// 已认证的主体（由 RequireJWT 写入请求扩展）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub role: Role,
    pub email: String,
    pub name: String,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 是否为该资源的本人（或管理员）
    pub fn owns(&self, role: Role, id: i64) -> bool {
        self.is_admin() || (self.role == role && self.id == id)
    }
}
