//! 评分聚合存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::prelude::{
    ReservationActiveModel, Reservations, StudentActiveModel, Students, TeacherActiveModel,
    Teachers,
};
use crate::errors::{LinkLearnError, Result};
use crate::models::{common::Party, ratings::entities::RatingSummary};
use crate::utils::rating::{next_rating, validate_rating};
use sea_orm::{ActiveModelTrait, DatabaseTransaction, EntityTrait, Set, TransactionTrait};

/// 在预约上记录评分：评教师写 student_rated，评学生写 is_rated
async fn stamp_reservation(
    txn: &DatabaseTransaction,
    party: Party,
    rated_id: i64,
    reservation_id: i64,
    rating: i32,
) -> Result<()> {
    let reservation = Reservations::find_by_id(reservation_id)
        .one(txn)
        .await
        .map_err(db_err("查询预约失败"))?
        .ok_or_else(|| LinkLearnError::not_found("Reservation not found"))?;

    let owner = match party {
        Party::Teacher => reservation.teacher_id,
        Party::Student => reservation.student_id,
    };
    if owner != rated_id {
        return Err(LinkLearnError::validation(format!(
            "Reservation does not involve this {party}"
        )));
    }

    let mut model: ReservationActiveModel = reservation.into();
    match party {
        Party::Teacher => model.student_rated = Set(rating),
        Party::Student => model.is_rated = Set(rating),
    }
    model.update(txn).await.map_err(db_err("更新预约评分失败"))?;
    Ok(())
}

impl SeaOrmStorage {
    /// 提交评分并更新均值
    pub async fn submit_rating_impl(
        &self,
        party: Party,
        id: i64,
        rating: i32,
        reservation_id: Option<i64>,
    ) -> Result<RatingSummary> {
        validate_rating(rating)?;

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        if let Some(reservation_id) = reservation_id {
            stamp_reservation(&txn, party, id, reservation_id, rating).await?;
        }

        let updated = match party {
            Party::Student => {
                let student = Students::find_by_id(id)
                    .one(&txn)
                    .await
                    .map_err(db_err("查询学生失败"))?
                    .ok_or_else(|| LinkLearnError::not_found("Student not found"))?;

                let summary = next_rating(
                    &RatingSummary {
                        rating: student.rating,
                        total_ratings: student.total_ratings,
                    },
                    rating,
                );
                let mut model: StudentActiveModel = student.into();
                model.rating = Set(summary.rating);
                model.total_ratings = Set(summary.total_ratings);
                model.update(&txn).await.map_err(db_err("更新学生评分失败"))?;
                summary
            }
            Party::Teacher => {
                let teacher = Teachers::find_by_id(id)
                    .one(&txn)
                    .await
                    .map_err(db_err("查询教师失败"))?
                    .ok_or_else(|| LinkLearnError::not_found("Teacher not found"))?;

                let summary = next_rating(
                    &RatingSummary {
                        rating: teacher.rating,
                        total_ratings: teacher.total_ratings,
                    },
                    rating,
                );
                let mut model: TeacherActiveModel = teacher.into();
                model.rating = Set(summary.rating);
                model.total_ratings = Set(summary.total_ratings);
                model.update(&txn).await.map_err(db_err("更新教师评分失败"))?;
                summary
            }
        };

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(updated)
    }

    pub async fn get_rating_impl(&self, party: Party, id: i64) -> Result<Option<RatingSummary>> {
        let summary = match party {
            Party::Student => Students::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| LinkLearnError::database_operation(format!("查询学生评分失败: {e}")))?
                .map(|m| RatingSummary {
                    rating: m.rating,
                    total_ratings: m.total_ratings,
                }),
            Party::Teacher => Teachers::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| LinkLearnError::database_operation(format!("查询教师评分失败: {e}")))?
                .map(|m| RatingSummary {
                    rating: m.rating,
                    total_ratings: m.total_ratings,
                }),
        };

        Ok(summary)
    }
}
