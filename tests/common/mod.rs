//! 集成测试公共工具：内存 SQLite 存储与基础数据

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

use linklearn::config::{AppConfig, DatabaseConfig};
use linklearn::models::{
    classes::entities::Slot,
    students::{entities::Student, requests::CreateStudentRequest},
    subjects::entities::Subject,
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
};
use linklearn::storage::Storage;
use linklearn::storage::sea_orm_storage::SeaOrmStorage;
use linklearn::utils::schedule::{fixed_offset, next_occurrence};

/// 已迁移的内存数据库
pub async fn storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory storage");
    Arc::new(storage)
}

pub fn offset() -> FixedOffset {
    fixed_offset(AppConfig::get().schedule.utc_offset_hours).unwrap()
}

/// 下周内指定星期与时刻的首次出现
pub fn upcoming(day_of_week: u32, hour: u32) -> DateTime<FixedOffset> {
    next_occurrence(
        Utc::now(),
        day_of_week,
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        &offset(),
    )
    .unwrap()
}

pub async fn subject(storage: &Arc<dyn Storage>, name: &str) -> Subject {
    storage.create_subject(name).await.unwrap()
}

pub async fn student(storage: &Arc<dyn Storage>, email: &str) -> Student {
    storage
        .create_student(CreateStudentRequest {
            first_name: "Sam".to_string(),
            last_name: email.split('@').next().unwrap_or("Student").to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .unwrap()
}

pub async fn teacher(
    storage: &Arc<dyn Storage>,
    first_name: &str,
    email: &str,
    subjects: &[i64],
) -> Teacher {
    storage
        .create_teacher(
            CreateTeacherRequest {
                first_name: first_name.to_string(),
                last_name: "Teacher".to_string(),
                email: email.to_string(),
                password_hash: "not-a-real-hash".to_string(),
            },
            subjects.to_vec(),
        )
        .await
        .unwrap()
}

/// 为教师展开 4 个空课时
pub async fn slots(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    base: DateTime<FixedOffset>,
    max_students: i32,
) -> Vec<Slot> {
    storage
        .expand_weekly_to_monthly(base, teacher_id, max_students, 0)
        .await
        .unwrap()
}

pub async fn slot(storage: &Arc<dyn Storage>, id: i64) -> Slot {
    storage.get_slot_by_id(id).await.unwrap().unwrap()
}
