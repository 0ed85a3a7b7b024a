//! 预约存储操作
//!
//! 课时的 current_students 与 is_taken 只在本文件中被修改，
//! 所有读后写流程都在同一事务内完成。
//! 创建预约时事务的第一条语句即对课时行加写锁，并发的同课时预约依次执行。

use super::{SeaOrmStorage, db_err, map_write_err};
use crate::entity::prelude::{
    MonthlySchedules, ReservationActiveModel, Reservations, Students, Subjects,
};
use crate::entity::{monthly_schedules, reservations};
use crate::errors::{LinkLearnError, Result};
use crate::models::reservations::{
    entities::{Reservation, ReservationStatus},
    requests::NewReservation,
};
use crate::utils::schedule::ensure_matches_slot;
use chrono::FixedOffset;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 占用一个座位，课时满员时标记为已占用
///
/// 自增带 `current_students < max_students` 条件，返回 false 表示座位已满。
pub(super) async fn take_seat<C: ConnectionTrait>(conn: &C, slot_id: i64) -> Result<bool> {
    let result = MonthlySchedules::update_many()
        .col_expr(
            monthly_schedules::Column::CurrentStudents,
            Expr::col(monthly_schedules::Column::CurrentStudents).add(1),
        )
        .filter(monthly_schedules::Column::Id.eq(slot_id))
        .filter(
            Expr::col(monthly_schedules::Column::CurrentStudents)
                .lt(Expr::col(monthly_schedules::Column::MaxStudents)),
        )
        .exec(conn)
        .await
        .map_err(db_err("更新课时人数失败"))?;

    if result.rows_affected == 0 {
        return Ok(false);
    }

    MonthlySchedules::update_many()
        .col_expr(monthly_schedules::Column::IsTaken, Expr::value(true))
        .filter(monthly_schedules::Column::Id.eq(slot_id))
        .filter(
            Expr::col(monthly_schedules::Column::CurrentStudents)
                .gte(Expr::col(monthly_schedules::Column::MaxStudents)),
        )
        .exec(conn)
        .await
        .map_err(db_err("更新课时状态失败"))?;

    Ok(true)
}

/// 对课时行执行一次空更新以取得写锁
///
/// SQLite 上先读后写的事务在升级写锁时会直接失败（不触发 busy_timeout），
/// 因此写锁必须在任何读取之前取得。
pub(super) async fn lock_slot<C: ConnectionTrait>(conn: &C, slot_id: i64) -> Result<()> {
    MonthlySchedules::update_many()
        .col_expr(
            monthly_schedules::Column::CurrentStudents,
            Expr::col(monthly_schedules::Column::CurrentStudents),
        )
        .filter(monthly_schedules::Column::Id.eq(slot_id))
        .exec(conn)
        .await
        .map_err(db_err("锁定课时失败"))?;
    Ok(())
}

/// 释放一个座位：人数减一（不低于 0）并取消占用标记
pub(super) async fn release_seat<C: ConnectionTrait>(conn: &C, slot_id: i64) -> Result<()> {
    MonthlySchedules::update_many()
        .col_expr(
            monthly_schedules::Column::CurrentStudents,
            Expr::col(monthly_schedules::Column::CurrentStudents).sub(1),
        )
        .filter(monthly_schedules::Column::Id.eq(slot_id))
        .filter(monthly_schedules::Column::CurrentStudents.gt(0))
        .exec(conn)
        .await
        .map_err(db_err("更新课时人数失败"))?;

    MonthlySchedules::update_many()
        .col_expr(monthly_schedules::Column::IsTaken, Expr::value(false))
        .filter(monthly_schedules::Column::Id.eq(slot_id))
        .exec(conn)
        .await
        .map_err(db_err("更新课时状态失败"))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 创建预约
    pub async fn create_reservation_impl(
        &self,
        reservation: NewReservation,
        offset: FixedOffset,
    ) -> Result<Reservation> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;
        lock_slot(&txn, reservation.schedule_id).await?;

        let slot = MonthlySchedules::find_by_id(reservation.schedule_id)
            .one(&txn)
            .await
            .map_err(db_err("查询课时失败"))?
            .ok_or_else(|| LinkLearnError::not_found("Schedule not found"))?;

        if slot.teacher_id != reservation.teacher_id {
            return Err(LinkLearnError::validation(
                "Schedule does not belong to this teacher",
            ));
        }

        ensure_matches_slot(
            slot.datetime,
            reservation.datetime,
            reservation.day_of_week,
            reservation.start_time,
            &offset,
        )?;

        if Students::find_by_id(reservation.student_id)
            .one(&txn)
            .await
            .map_err(db_err("查询学生失败"))?
            .is_none()
        {
            return Err(LinkLearnError::not_found("Student not found"));
        }

        if Subjects::find_by_id(reservation.subject_id)
            .one(&txn)
            .await
            .map_err(db_err("查询科目失败"))?
            .is_none()
        {
            return Err(LinkLearnError::not_found("Subject not found"));
        }

        let collision = Reservations::find()
            .filter(reservations::Column::TeacherId.eq(reservation.teacher_id))
            .filter(reservations::Column::Datetime.eq(slot.datetime))
            .filter(
                reservations::Column::ReservationStatus.ne(ReservationStatus::Cancelled.as_str()),
            )
            .one(&txn)
            .await
            .map_err(db_err("查询预约冲突失败"))?;
        if collision.is_some() {
            return Err(LinkLearnError::conflict(
                "A reservation already exists for this teacher at this time",
            ));
        }

        if slot.is_taken || slot.current_students >= slot.max_students {
            return Err(LinkLearnError::conflict("This class is no longer available"));
        }

        let created = ReservationActiveModel {
            student_id: Set(reservation.student_id),
            teacher_id: Set(reservation.teacher_id),
            subject_id: Set(reservation.subject_id),
            schedule_id: Set(slot.id),
            datetime: Set(slot.datetime),
            reservation_status: Set(ReservationStatus::Booked.to_string()),
            active_marker: Set(Some(1)),
            student_rated: Set(0),
            is_rated: Set(0),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_write_err(
            "创建预约失败",
            "A reservation already exists for this teacher at this time",
        ))?;

        if !take_seat(&txn, slot.id).await? {
            return Err(LinkLearnError::conflict("This class is no longer available"));
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(created.into_reservation())
    }

    pub async fn get_reservation_by_id_impl(&self, id: i64) -> Result<Option<Reservation>> {
        let result = Reservations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询预约失败: {e}")))?;

        Ok(result.map(|m| m.into_reservation()))
    }

    /// 学生的全部预约，按时间排序
    pub async fn list_student_reservations_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Reservation>> {
        let list = Reservations::find()
            .filter(reservations::Column::StudentId.eq(student_id))
            .order_by_asc(reservations::Column::Datetime)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询学生预约失败: {e}")))?;

        Ok(list.into_iter().map(|m| m.into_reservation()).collect())
    }

    /// 教师在 [from, until] 内的预约
    pub async fn list_teacher_reservations_between_impl(
        &self,
        teacher_id: i64,
        from: i64,
        until: i64,
    ) -> Result<Vec<Reservation>> {
        let list = Reservations::find()
            .filter(reservations::Column::TeacherId.eq(teacher_id))
            .filter(reservations::Column::Datetime.between(from, until))
            .order_by_asc(reservations::Column::Datetime)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询教师预约失败: {e}")))?;

        Ok(list.into_iter().map(|m| m.into_reservation()).collect())
    }

    /// 删除预约并释放座位
    pub async fn delete_reservation_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let Some(existing) = Reservations::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err("查询预约失败"))?
        else {
            return Ok(false);
        };

        Reservations::delete_by_id(existing.id)
            .exec(&txn)
            .await
            .map_err(db_err("删除预约失败"))?;

        // 已取消的预约在取消时已释放过座位
        if existing.reservation_status != ReservationStatus::Cancelled.as_str() {
            release_seat(&txn, existing.schedule_id).await?;
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(true)
    }

    /// 更新预约状态，取消时释放座位
    pub async fn update_reservation_status_impl(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let Some(existing) = Reservations::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err("查询预约失败"))?
        else {
            return Ok(None);
        };

        let was_cancelled = existing.reservation_status == ReservationStatus::Cancelled.as_str();
        if was_cancelled && status != ReservationStatus::Cancelled {
            return Err(LinkLearnError::validation(
                "A cancelled reservation cannot change status",
            ));
        }

        let mut model: ReservationActiveModel = existing.into();
        model.reservation_status = Set(status.to_string());
        if status == ReservationStatus::Cancelled {
            // 让出 (teacher_id, datetime) 唯一键，课时可被重新预约
            model.active_marker = Set(None);
        }
        let updated = model.update(&txn).await.map_err(db_err("更新预约状态失败"))?;

        if status == ReservationStatus::Cancelled && !was_cancelled {
            release_seat(&txn, updated.schedule_id).await?;
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(Some(updated.into_reservation()))
    }
}
