//! 课时（月度课表）存储操作
//!
//! 每周模板展开、开放课时查询与假期处理。

use std::collections::HashSet;

use super::{SeaOrmStorage, db_err};
use crate::entity::prelude::{
    MonthlyScheduleActiveModel, MonthlySchedules, Reservations, TeacherActiveModel, Teachers,
};
use crate::entity::{monthly_schedules, reservations};
use crate::errors::{LinkLearnError, Result};
use crate::models::classes::entities::Slot;
use crate::models::reservations::entities::ReservationStatus;
use crate::utils::schedule::weekly_instances;
use chrono::{DateTime, FixedOffset};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 在给定连接上写入 4 个每周课时
pub(super) async fn insert_weekly_slots<C: ConnectionTrait>(
    conn: &C,
    datetime: DateTime<FixedOffset>,
    teacher_id: i64,
    max_students: i32,
    current_students: i32,
) -> Result<Vec<Slot>> {
    let mut slots = Vec::with_capacity(4);
    for instance in weekly_instances(datetime) {
        let created = MonthlyScheduleActiveModel {
            datetime: Set(instance),
            teacher_id: Set(teacher_id),
            max_students: Set(max_students),
            current_students: Set(current_students),
            is_taken: Set(current_students >= max_students),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(db_err("写入课时失败"))?;
        slots.push(created.into_slot());
    }
    Ok(slots)
}

/// 开放课时：未占用且未满员
fn open_slots() -> sea_orm::Select<MonthlySchedules> {
    MonthlySchedules::find()
        .filter(monthly_schedules::Column::IsTaken.eq(false))
        .filter(
            Expr::col(monthly_schedules::Column::CurrentStudents)
                .lt(Expr::col(monthly_schedules::Column::MaxStudents)),
        )
        .order_by_asc(monthly_schedules::Column::Datetime)
}

impl SeaOrmStorage {
    /// 展开每周课时（单事务，失败时不留下部分数据）
    pub async fn expand_weekly_to_monthly_impl(
        &self,
        datetime: DateTime<FixedOffset>,
        teacher_id: i64,
        max_students: i32,
        current_students: i32,
    ) -> Result<Vec<Slot>> {
        if max_students < 1 || current_students < 0 || current_students > max_students {
            return Err(LinkLearnError::validation(
                "Slot occupancy must satisfy 0 <= current_students <= max_students",
            ));
        }

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        if Teachers::find_by_id(teacher_id)
            .one(&txn)
            .await
            .map_err(db_err("查询教师失败"))?
            .is_none()
        {
            return Err(LinkLearnError::not_found("Teacher not found"));
        }

        let slots =
            insert_weekly_slots(&txn, datetime, teacher_id, max_students, current_students).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(slots)
    }

    pub async fn get_slot_by_id_impl(&self, id: i64) -> Result<Option<Slot>> {
        let result = MonthlySchedules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_slot()))
    }

    /// 一对一开放课时
    pub async fn list_individual_open_slots_impl(&self) -> Result<Vec<Slot>> {
        let list = open_slots()
            .filter(monthly_schedules::Column::MaxStudents.eq(1))
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询一对一课时失败: {e}")))?;

        Ok(list.into_iter().map(|m| m.into_slot()).collect())
    }

    /// 小组开放课时
    pub async fn list_group_open_slots_impl(&self) -> Result<Vec<Slot>> {
        let list = open_slots()
            .filter(monthly_schedules::Column::MaxStudents.gt(1))
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询小组课时失败: {e}")))?;

        Ok(list.into_iter().map(|m| m.into_slot()).collect())
    }

    /// 设置假期
    ///
    /// 窗口内只要有课时已有学生（无论是否被标记占用）即整体拒绝，不做任何修改。
    pub async fn assign_vacation_impl(
        &self,
        teacher_id: i64,
        from: i64,
        until: i64,
    ) -> Result<Vec<Slot>> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let teacher = Teachers::find_by_id(teacher_id)
            .one(&txn)
            .await
            .map_err(db_err("查询教师失败"))?
            .ok_or_else(|| LinkLearnError::not_found("Teacher not found"))?;

        let in_window = MonthlySchedules::find()
            .filter(monthly_schedules::Column::TeacherId.eq(teacher_id))
            .filter(monthly_schedules::Column::Datetime.between(from, until))
            .all(&txn)
            .await
            .map_err(db_err("查询假期窗口课时失败"))?;

        if in_window.is_empty() {
            return Err(LinkLearnError::not_found(
                "No classes found for this teacher in the selected range",
            ));
        }
        if in_window.iter().any(|slot| slot.current_students > 0) {
            return Err(LinkLearnError::conflict(
                "Cannot assign vacation: there are classes with students in the selected range",
            ));
        }

        MonthlySchedules::update_many()
            .col_expr(monthly_schedules::Column::IsTaken, Expr::value(true))
            .filter(monthly_schedules::Column::TeacherId.eq(teacher_id))
            .filter(monthly_schedules::Column::Datetime.between(from, until))
            .exec(&txn)
            .await
            .map_err(db_err("标记假期课时失败"))?;

        let mut model: TeacherActiveModel = teacher.into();
        model.on_vacation = Set(true);
        model.update(&txn).await.map_err(db_err("更新教师假期状态失败"))?;

        let updated = MonthlySchedules::find()
            .filter(monthly_schedules::Column::TeacherId.eq(teacher_id))
            .filter(monthly_schedules::Column::Datetime.between(from, until))
            .order_by_asc(monthly_schedules::Column::Datetime)
            .all(&txn)
            .await
            .map_err(db_err("查询假期课时失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(updated.into_iter().map(|m| m.into_slot()).collect())
    }

    /// 结束假期：释放所有无学生的已占用课时
    pub async fn stop_vacation_impl(&self, teacher_id: i64) -> Result<u64> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let teacher = Teachers::find_by_id(teacher_id)
            .one(&txn)
            .await
            .map_err(db_err("查询教师失败"))?
            .ok_or_else(|| LinkLearnError::not_found("Teacher not found"))?;

        let mut model: TeacherActiveModel = teacher.into();
        model.on_vacation = Set(false);
        model.update(&txn).await.map_err(db_err("更新教师假期状态失败"))?;

        let released = MonthlySchedules::update_many()
            .col_expr(monthly_schedules::Column::IsTaken, Expr::value(false))
            .filter(monthly_schedules::Column::TeacherId.eq(teacher_id))
            .filter(monthly_schedules::Column::IsTaken.eq(true))
            .filter(monthly_schedules::Column::CurrentStudents.eq(0))
            .exec(&txn)
            .await
            .map_err(db_err("释放假期课时失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(released.rows_affected)
    }

    /// 教师未被占用的课时
    ///
    /// 指定科目时，仅保留没有预约或全部预约都属于该科目的课时。
    pub async fn list_teacher_open_slots_impl(
        &self,
        teacher_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<Slot>> {
        let slots = MonthlySchedules::find()
            .filter(monthly_schedules::Column::TeacherId.eq(teacher_id))
            .filter(monthly_schedules::Column::IsTaken.eq(false))
            .order_by_asc(monthly_schedules::Column::Datetime)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师课时失败: {e}")))?;

        let Some(subject_id) = subject_id else {
            return Ok(slots.into_iter().map(|m| m.into_slot()).collect());
        };

        if slots.is_empty() {
            return Ok(Vec::new());
        }

        let excluded: HashSet<i64> = Reservations::find()
            .filter(reservations::Column::ScheduleId.is_in(slots.iter().map(|s| s.id)))
            .filter(reservations::Column::SubjectId.ne(subject_id))
            .filter(
                reservations::Column::ReservationStatus.ne(ReservationStatus::Cancelled.as_str()),
            )
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询课时预约失败: {e}")))?
            .into_iter()
            .map(|r| r.schedule_id)
            .collect();

        Ok(slots
            .into_iter()
            .filter(|slot| !excluded.contains(&slot.id))
            .map(|m| m.into_slot())
            .collect())
    }
}
