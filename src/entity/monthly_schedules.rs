//! 月度课时实体
//!
//! 每条记录是一个具体日期的可预约时段，由每周模板展开而来。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "monthly_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub datetime: i64,
    pub teacher_id: i64,
    pub max_students: i32,
    pub current_students: i32,
    pub is_taken: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::reservations::Entity")]
    Reservations,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_slot(self) -> crate::models::classes::entities::Slot {
        use crate::models::classes::entities::Slot;
        use chrono::{DateTime, Utc};

        Slot {
            id: self.id,
            datetime: DateTime::<Utc>::from_timestamp(self.datetime, 0).unwrap_or_default(),
            teacher_id: self.teacher_id,
            max_students: self.max_students,
            current_students: self.current_students,
            is_taken: self.is_taken,
        }
    }
}
