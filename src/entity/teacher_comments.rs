//! 教师评论实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub comment_id: i64,
    pub teacher_id: i64,
    pub comment: String,
    pub commenter_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_comment(self) -> crate::models::comments::entities::Comment {
        crate::models::comments::entities::Comment {
            comment_id: self.comment_id,
            owner_id: self.teacher_id,
            comment: self.comment,
            commenter_name: self.commenter_name,
        }
    }
}
