//! 评论存储操作（只追加）

use super::SeaOrmStorage;
use crate::entity::prelude::{
    StudentCommentActiveModel, StudentComments, Students, TeacherCommentActiveModel,
    TeacherComments, Teachers,
};
use crate::entity::{student_comments, teacher_comments};
use crate::errors::{LinkLearnError, Result};
use crate::models::{comments::entities::Comment, common::Party};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 按评论 ID 升序列出某学生或教师收到的评论
    pub async fn list_comments_impl(&self, party: Party, id: i64) -> Result<Vec<Comment>> {
        let comments = match party {
            Party::Student => StudentComments::find()
                .filter(student_comments::Column::StudentId.eq(id))
                .order_by_asc(student_comments::Column::CommentId)
                .all(&self.db)
                .await
                .map_err(|e| LinkLearnError::database_operation(format!("查询学生评论失败: {e}")))?
                .into_iter()
                .map(|m| m.into_comment())
                .collect(),
            Party::Teacher => TeacherComments::find()
                .filter(teacher_comments::Column::TeacherId.eq(id))
                .order_by_asc(teacher_comments::Column::CommentId)
                .all(&self.db)
                .await
                .map_err(|e| LinkLearnError::database_operation(format!("查询教师评论失败: {e}")))?
                .into_iter()
                .map(|m| m.into_comment())
                .collect(),
        };

        Ok(comments)
    }

    /// 添加评论，被评论者不存在时返回 NotFound
    pub async fn add_comment_impl(
        &self,
        party: Party,
        id: i64,
        comment: &str,
        commenter_name: &str,
    ) -> Result<Comment> {
        let comment = match party {
            Party::Student => {
                let exists = Students::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(|e| LinkLearnError::database_operation(format!("查询学生失败: {e}")))?
                    .is_some();
                if !exists {
                    return Err(LinkLearnError::not_found("Student not found"));
                }

                StudentCommentActiveModel {
                    student_id: Set(id),
                    comment: Set(comment.to_string()),
                    commenter_name: Set(commenter_name.to_string()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
                .map_err(|e| LinkLearnError::database_operation(format!("添加学生评论失败: {e}")))?
                .into_comment()
            }
            Party::Teacher => {
                let exists = Teachers::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(|e| LinkLearnError::database_operation(format!("查询教师失败: {e}")))?
                    .is_some();
                if !exists {
                    return Err(LinkLearnError::not_found("Teacher not found"));
                }

                TeacherCommentActiveModel {
                    teacher_id: Set(id),
                    comment: Set(comment.to_string()),
                    commenter_name: Set(commenter_name.to_string()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
                .map_err(|e| LinkLearnError::database_operation(format!("添加教师评论失败: {e}")))?
                .into_comment()
            }
        };

        Ok(comment)
    }
}
