//! 学生评论实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub comment_id: i64,
    pub student_id: i64,
    pub comment: String,
    pub commenter_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_comment(self) -> crate::models::comments::entities::Comment {
        crate::models::comments::entities::Comment {
            comment_id: self.comment_id,
            owner_id: self.student_id,
            comment: self.comment,
            commenter_name: self.commenter_name,
        }
    }
}
