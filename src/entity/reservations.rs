//! 预约实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub schedule_id: i64,
    pub datetime: i64,
    pub reservation_status: String,
    /// 有效预约为 Some(1)，取消后为 None，参与 (teacher_id, datetime) 唯一索引
    pub active_marker: Option<i32>,
    pub student_rated: i32,
    pub is_rated: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::monthly_schedules::Entity",
        from = "Column::ScheduleId",
        to = "super::monthly_schedules::Column::Id"
    )]
    MonthlySchedule,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::monthly_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlySchedule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_reservation(self) -> crate::models::reservations::entities::Reservation {
        use crate::models::reservations::entities::{Reservation, ReservationStatus};
        use chrono::{DateTime, Utc};

        Reservation {
            id: self.id,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            subject_id: self.subject_id,
            schedule_id: self.schedule_id,
            datetime: DateTime::<Utc>::from_timestamp(self.datetime, 0).unwrap_or_default(),
            status: self
                .reservation_status
                .parse::<ReservationStatus>()
                .unwrap_or(ReservationStatus::Booked),
            student_rated: self.student_rated,
            is_rated: self.is_rated,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
