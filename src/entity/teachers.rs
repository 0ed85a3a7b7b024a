//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub on_vacation: bool,
    pub rating: Option<f64>,
    pub total_ratings: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::monthly_schedules::Entity")]
    MonthlySchedules,
    #[sea_orm(has_many = "super::reservations::Entity")]
    Reservations,
    #[sea_orm(has_many = "super::subject_teachers::Entity")]
    SubjectTeachers,
    #[sea_orm(has_many = "super::teacher_comments::Entity")]
    TeacherComments,
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::monthly_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlySchedules.def()
    }
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::subject_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectTeachers.def()
    }
}

impl Related<super::teacher_comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherComments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        use crate::models::teachers::entities::Teacher;
        use chrono::{DateTime, Utc};

        Teacher {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            is_active: self.is_active,
            on_vacation: self.on_vacation,
            rating: self.rating,
            total_ratings: self.total_ratings,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
