//! 学生存储操作

use std::collections::{HashMap, HashSet};

use super::reservations::release_seat;
use super::{SeaOrmStorage, db_err, map_write_err};
use crate::entity::prelude::{
    Reservations, StudentActiveModel, Students, SubjectTeachers, Subjects, Teachers,
};
use crate::entity::{reservations, students, subject_teachers, subjects, teachers};
use crate::errors::{LinkLearnError, Result};
use crate::models::reservations::entities::ReservationStatus;
use crate::models::students::{
    entities::Student,
    requests::{CreateStudentRequest, UpdateStudentRequest},
    responses::{PreviousTeacher, UnratedClass, UnratedClassTeacher},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 返回的历史教师数量上限
const PREVIOUS_TEACHERS_LIMIT: usize = 3;

impl SeaOrmStorage {
    /// 创建学生，邮箱重复返回 Conflict
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let model = StudentActiveModel {
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            rating: Set(None),
            total_ratings: Set(0),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_write_err("创建学生失败", "Email already registered"))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(students::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 更新学生姓名
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: StudentActiveModel = existing.into();
        if let Some(first_name) = update.firstname {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.lastname {
            model.last_name = Set(last_name);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 删除学生：逐条释放其预约占用的座位并删除预约，再删除学生
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        if Students::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err("查询学生失败"))?
            .is_none()
        {
            return Ok(false);
        }

        let booked = Reservations::find()
            .filter(reservations::Column::StudentId.eq(id))
            .all(&txn)
            .await
            .map_err(db_err("查询学生预约失败"))?;

        for reservation in booked {
            Reservations::delete_by_id(reservation.id)
                .exec(&txn)
                .await
                .map_err(db_err("删除预约失败"))?;
            if reservation.reservation_status != ReservationStatus::Cancelled.as_str() {
                release_seat(&txn, reservation.schedule_id).await?;
            }
        }

        // 评论随外键级联删除
        Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err("删除学生失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(true)
    }

    /// 学生最近预约过、且教授该科目的教师（去重，最近优先）
    pub async fn list_previous_teachers_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<PreviousTeacher>> {
        let history = Reservations::find()
            .filter(reservations::Column::StudentId.eq(student_id))
            .order_by_desc(reservations::Column::Datetime)
            .order_by_desc(reservations::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询预约历史失败: {e}")))?;

        let qualified: HashSet<i64> = SubjectTeachers::find()
            .filter(subject_teachers::Column::SubjectId.eq(subject_id))
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师科目失败: {e}")))?
            .into_iter()
            .map(|m| m.teacher_id)
            .collect();

        let mut seen = HashSet::new();
        let mut picked: Vec<(i64, i64)> = Vec::new();
        for reservation in history {
            if picked.len() == PREVIOUS_TEACHERS_LIMIT {
                break;
            }
            if qualified.contains(&reservation.teacher_id) && seen.insert(reservation.teacher_id) {
                picked.push((reservation.teacher_id, reservation.id));
            }
        }

        if picked.is_empty() {
            return Ok(Vec::new());
        }

        let teachers: HashMap<i64, teachers::Model> = Teachers::find()
            .filter(teachers::Column::Id.is_in(picked.iter().map(|(id, _)| *id)))
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        Ok(picked
            .into_iter()
            .filter_map(|(teacher_id, reservation_id)| {
                teachers.get(&teacher_id).map(|t| PreviousTeacher {
                    teacherid: t.id,
                    firstname: t.first_name.clone(),
                    lastname: t.last_name.clone(),
                    email: t.email.clone(),
                    rating: t.rating,
                    reservation_id,
                })
            })
            .collect())
    }

    /// 学生尚未评分、且已不处于 booked 状态的课程
    pub async fn list_unrated_classes_impl(&self, student_id: i64) -> Result<Vec<UnratedClass>> {
        let pending = Reservations::find()
            .filter(reservations::Column::StudentId.eq(student_id))
            .filter(reservations::Column::StudentRated.eq(0))
            .filter(reservations::Column::ReservationStatus.ne(ReservationStatus::Booked.as_str()))
            .order_by_asc(reservations::Column::Datetime)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询未评分课程失败: {e}")))?;

        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let teacher_ids: HashSet<i64> = pending.iter().map(|r| r.teacher_id).collect();
        let subject_ids: HashSet<i64> = pending.iter().map(|r| r.subject_id).collect();

        let teachers: HashMap<i64, teachers::Model> = Teachers::find()
            .filter(teachers::Column::Id.is_in(teacher_ids))
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let subject_names: HashMap<i64, String> = Subjects::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询科目失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        Ok(pending
            .into_iter()
            .filter_map(|r| {
                let teacher = teachers.get(&r.teacher_id)?;
                Some(UnratedClass {
                    reservation_id: r.id,
                    datetime: chrono::DateTime::<chrono::Utc>::from_timestamp(r.datetime, 0)
                        .unwrap_or_default(),
                    teacher: UnratedClassTeacher {
                        teacherid: teacher.id,
                        firstname: teacher.first_name.clone(),
                        lastname: teacher.last_name.clone(),
                    },
                    studentrated: r.student_rated,
                    subject: subject_names.get(&r.subject_id).cloned().unwrap_or_default(),
                })
            })
            .collect())
    }
}
