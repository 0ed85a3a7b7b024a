//! 科目存储操作

use super::{SeaOrmStorage, map_write_err};
use crate::entity::subject_teachers::Entity as SubjectTeachers;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{LinkLearnError, Result};
use crate::models::subjects::entities::Subject;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出全部科目（按名称排序）
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 创建科目，名称重复返回 Conflict
    pub async fn create_subject_impl(&self, name: &str) -> Result<Subject> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_write_err("创建科目失败", "Subject already exists"))?;

        Ok(result.into_subject())
    }

    /// 至少有一位教师教授的科目（按名称排序）
    pub async fn list_dictated_subjects_impl(&self) -> Result<Vec<Subject>> {
        let ids: Vec<i64> = SubjectTeachers::find()
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师科目失败: {e}")))?
            .into_iter()
            .map(|m| m.subject_id)
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let subjects = Subjects::find()
            .filter(Column::Id.is_in(ids))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }
}
