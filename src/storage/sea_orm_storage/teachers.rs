//! 教师与教师科目存储操作

use std::collections::HashSet;

use super::{SeaOrmStorage, db_err, map_write_err};
use crate::entity::prelude::{
    MonthlySchedules, Reservations, SubjectTeacherActiveModel, SubjectTeachers, Subjects,
    TeacherActiveModel, Teachers,
};
use crate::entity::{monthly_schedules, reservations, subject_teachers, subjects, teachers};
use crate::errors::{LinkLearnError, Result};
use crate::models::reservations::entities::ReservationStatus;
use crate::models::subjects::entities::Subject;
use crate::models::teachers::{
    entities::Teacher,
    requests::{CreateTeacherRequest, UpdateTeacherRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 教师当前的科目集合（按名称排序）
async fn teacher_subjects<C: ConnectionTrait>(conn: &C, teacher_id: i64) -> Result<Vec<Subject>> {
    let ids: Vec<i64> = SubjectTeachers::find()
        .filter(subject_teachers::Column::TeacherId.eq(teacher_id))
        .all(conn)
        .await
        .map_err(db_err("查询教师科目失败"))?
        .into_iter()
        .map(|m| m.subject_id)
        .collect();

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let list = Subjects::find()
        .filter(subjects::Column::Id.is_in(ids))
        .order_by_asc(subjects::Column::Name)
        .all(conn)
        .await
        .map_err(db_err("查询科目失败"))?;

    Ok(list.into_iter().map(|m| m.into_subject()).collect())
}

/// 校验科目全部存在，返回去重后的 ID
async fn ensure_subjects_exist<C: ConnectionTrait>(
    conn: &C,
    subject_ids: &[i64],
) -> Result<Vec<i64>> {
    let mut seen = HashSet::new();
    let unique: Vec<i64> = subject_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    if unique.is_empty() {
        return Ok(unique);
    }

    let found = Subjects::find()
        .filter(subjects::Column::Id.is_in(unique.clone()))
        .count(conn)
        .await
        .map_err(db_err("查询科目失败"))?;

    if found as usize != unique.len() {
        return Err(LinkLearnError::not_found("Subject not found"));
    }
    Ok(unique)
}

/// 批量写入教师科目关联
async fn insert_subject_links<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    subject_ids: &[i64],
) -> Result<()> {
    // insert_many 不接受空集合
    if subject_ids.is_empty() {
        return Ok(());
    }

    let links = subject_ids.iter().map(|subject_id| SubjectTeacherActiveModel {
        teacher_id: Set(teacher_id),
        subject_id: Set(*subject_id),
    });

    SubjectTeachers::insert_many(links)
        .exec(conn)
        .await
        .map_err(map_write_err(
            "写入教师科目失败",
            "Subject already assigned to this teacher",
        ))?;
    Ok(())
}

impl SeaOrmStorage {
    /// 创建教师并写入科目集合（单事务）
    pub async fn create_teacher_impl(
        &self,
        req: CreateTeacherRequest,
        subject_ids: Vec<i64>,
    ) -> Result<Teacher> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let subject_ids = ensure_subjects_exist(&txn, &subject_ids).await?;

        let created = TeacherActiveModel {
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            is_active: Set(false),
            on_vacation: Set(false),
            rating: Set(None),
            total_ratings: Set(0),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_write_err("创建教师失败", "Email already registered"))?;

        insert_subject_links(&txn, created.id, &subject_ids).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(created.into_teacher())
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn get_teacher_by_email_impl(&self, email: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(teachers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn list_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let list = Teachers::find()
            .order_by_asc(teachers::Column::FirstName)
            .order_by_asc(teachers::Column::LastName)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(list.into_iter().map(|m| m.into_teacher()).collect())
    }

    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let Some(existing) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: TeacherActiveModel = existing.into();
        if let Some(first_name) = update.firstname {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.lastname {
            model.last_name = Set(last_name);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("更新教师失败: {e}")))?;

        Ok(Some(result.into_teacher()))
    }

    /// 删除教师；存在晚于 now 的未取消预约时拒绝
    pub async fn delete_teacher_impl(&self, id: i64, now: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        if Teachers::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err("查询教师失败"))?
            .is_none()
        {
            return Ok(false);
        }

        let upcoming = Reservations::find()
            .filter(reservations::Column::TeacherId.eq(id))
            .filter(reservations::Column::Datetime.gt(now))
            .filter(
                reservations::Column::ReservationStatus.ne(ReservationStatus::Cancelled.as_str()),
            )
            .count(&txn)
            .await
            .map_err(db_err("查询教师预约失败"))?;

        if upcoming > 0 {
            return Err(LinkLearnError::conflict(
                "Teacher has upcoming reservations and cannot be deleted",
            ));
        }

        // 课表、课时、历史预约与评论随外键级联删除
        Teachers::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err("删除教师失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(true)
    }

    pub async fn activate_teacher_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let Some(existing) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: TeacherActiveModel = existing.into();
        model.is_active = Set(true);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("激活教师失败: {e}")))?;

        Ok(Some(result.into_teacher()))
    }

    pub async fn list_teacher_subjects_impl(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        teacher_subjects(&self.db, teacher_id).await
    }

    /// 为教师分配单个科目，返回更新后的科目集合
    pub async fn assign_subject_impl(
        &self,
        teacher_id: i64,
        subject_id: i64,
    ) -> Result<Vec<Subject>> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        if Teachers::find_by_id(teacher_id)
            .one(&txn)
            .await
            .map_err(db_err("查询教师失败"))?
            .is_none()
        {
            return Err(LinkLearnError::not_found("Teacher not found"));
        }
        ensure_subjects_exist(&txn, &[subject_id]).await?;

        let assigned = SubjectTeachers::find_by_id((teacher_id, subject_id))
            .one(&txn)
            .await
            .map_err(db_err("查询教师科目失败"))?;
        if assigned.is_some() {
            return Err(LinkLearnError::conflict(
                "Subject already assigned to this teacher",
            ));
        }

        insert_subject_links(&txn, teacher_id, &[subject_id]).await?;
        let subjects = teacher_subjects(&txn, teacher_id).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(subjects)
    }

    pub async fn remove_subject_impl(&self, teacher_id: i64, subject_id: i64) -> Result<bool> {
        let result = SubjectTeachers::delete_by_id((teacher_id, subject_id))
            .exec(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("移除教师科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 整体替换教师科目集合：先全部删除再批量写入
    pub async fn replace_teacher_subjects_impl(
        &self,
        teacher_id: i64,
        subject_ids: Vec<i64>,
    ) -> Result<Vec<Subject>> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        if Teachers::find_by_id(teacher_id)
            .one(&txn)
            .await
            .map_err(db_err("查询教师失败"))?
            .is_none()
        {
            return Err(LinkLearnError::not_found("Teacher not found"));
        }
        let subject_ids = ensure_subjects_exist(&txn, &subject_ids).await?;

        SubjectTeachers::delete_many()
            .filter(subject_teachers::Column::TeacherId.eq(teacher_id))
            .exec(&txn)
            .await
            .map_err(db_err("清空教师科目失败"))?;

        insert_subject_links(&txn, teacher_id, &subject_ids).await?;
        let subjects = teacher_subjects(&txn, teacher_id).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(subjects)
    }

    /// 教授该科目、且至少有一个未占用课时的教师
    pub async fn list_teachers_dictating_impl(&self, subject_id: i64) -> Result<Vec<Teacher>> {
        let teacher_ids: Vec<i64> = SubjectTeachers::find()
            .filter(subject_teachers::Column::SubjectId.eq(subject_id))
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师科目失败: {e}")))?
            .into_iter()
            .map(|m| m.teacher_id)
            .collect();

        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }

        let available: HashSet<i64> = MonthlySchedules::find()
            .filter(monthly_schedules::Column::TeacherId.is_in(teacher_ids))
            .filter(monthly_schedules::Column::IsTaken.eq(false))
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询课时失败: {e}")))?
            .into_iter()
            .map(|m| m.teacher_id)
            .collect();

        if available.is_empty() {
            return Ok(Vec::new());
        }

        let list = Teachers::find()
            .filter(teachers::Column::Id.is_in(available))
            .order_by_asc(teachers::Column::FirstName)
            .order_by_asc(teachers::Column::LastName)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(list.into_iter().map(|m| m.into_teacher()).collect())
    }
}
