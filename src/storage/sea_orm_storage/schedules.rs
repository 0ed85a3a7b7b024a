//! 每周课表模板存储操作

use super::monthly_schedules::insert_weekly_slots;
use super::{SeaOrmStorage, db_err};
use crate::entity::prelude::{ScheduleActiveModel, Schedules, Teachers};
use crate::entity::schedules;
use crate::errors::{LinkLearnError, Result};
use crate::models::classes::entities::Slot;
use crate::models::schedules::{entities::WeeklySchedule, requests::NewWeeklySchedule};
use crate::utils::schedule::format_time;
use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 保存模板，并在同一事务中展开首月课时
    pub async fn create_weekly_schedule_impl(
        &self,
        schedule: NewWeeklySchedule,
        first_occurrence: DateTime<FixedOffset>,
    ) -> Result<(WeeklySchedule, Vec<Slot>)> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        if Teachers::find_by_id(schedule.teacher_id)
            .one(&txn)
            .await
            .map_err(db_err("查询教师失败"))?
            .is_none()
        {
            return Err(LinkLearnError::not_found("Teacher not found"));
        }

        let created = ScheduleActiveModel {
            teacher_id: Set(schedule.teacher_id),
            day_of_week: Set(schedule.day_of_week),
            start_time: Set(format_time(schedule.start_time)),
            end_time: Set(format_time(schedule.end_time)),
            max_students: Set(schedule.max_students),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建课表失败"))?;

        let slots = insert_weekly_slots(
            &txn,
            first_occurrence,
            schedule.teacher_id,
            schedule.max_students,
            0,
        )
        .await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok((created.into_weekly_schedule(), slots))
    }

    /// 教师的每周模板，按 (星期, 开始时间) 排序
    pub async fn list_weekly_schedules_impl(&self, teacher_id: i64) -> Result<Vec<WeeklySchedule>> {
        let list = Schedules::find()
            .filter(schedules::Column::TeacherId.eq(teacher_id))
            .order_by_asc(schedules::Column::DayOfWeek)
            .order_by_asc(schedules::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询课表失败: {e}")))?;

        Ok(list.into_iter().map(|m| m.into_weekly_schedule()).collect())
    }
}
