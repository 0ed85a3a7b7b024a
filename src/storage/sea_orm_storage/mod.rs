//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 所有“先检查后写入”的流程都在单个数据库事务内完成。

mod admins;
mod comments;
mod monthly_schedules;
mod ratings;
mod reservations;
mod schedules;
mod students;
mod subjects;
mod teachers;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{LinkLearnError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 使用现有连接（运行迁移后）构造存储
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LinkLearnError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库的数据只存在于单个连接中，连接不能被回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| LinkLearnError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LinkLearnError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    pub(crate) fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LinkLearnError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 数据库错误转换，唯一约束冲突映射为 Conflict
pub(crate) fn map_write_err(
    context: &'static str,
    conflict: &'static str,
) -> impl Fn(DbErr) -> LinkLearnError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => LinkLearnError::conflict(conflict),
        _ => LinkLearnError::database_operation(format!("{context}: {e}")),
    }
}

/// 普通数据库错误转换
pub(crate) fn db_err(context: &'static str) -> impl Fn(DbErr) -> LinkLearnError {
    move |e| LinkLearnError::database_operation(format!("{context}: {e}"))
}

// Storage trait 实现
use crate::models::{
    auth::{Admin, Principal, Role},
    classes::entities::Slot,
    comments::entities::Comment,
    common::Party,
    ratings::entities::RatingSummary,
    reservations::{
        entities::{Reservation, ReservationStatus},
        requests::NewReservation,
    },
    schedules::{entities::WeeklySchedule, requests::NewWeeklySchedule},
    students::{
        entities::Student,
        requests::{CreateStudentRequest, UpdateStudentRequest},
        responses::{PreviousTeacher, UnratedClass},
    },
    subjects::entities::Subject,
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, UpdateTeacherRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 认证模块
    async fn get_principal(&self, id: i64, role: Role) -> Result<Option<Principal>> {
        self.get_principal_impl(id, role).await
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
        self.get_admin_by_email_impl(email).await
    }

    async fn update_password(&self, role: Role, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password_impl(role, id, password_hash).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    async fn create_admin(&self, email: &str, password_hash: &str) -> Result<Admin> {
        self.create_admin_impl(email, password_hash).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn list_previous_teachers(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<PreviousTeacher>> {
        self.list_previous_teachers_impl(student_id, subject_id)
            .await
    }

    async fn list_unrated_classes(&self, student_id: i64) -> Result<Vec<UnratedClass>> {
        self.list_unrated_classes_impl(student_id).await
    }

    // 教师模块
    async fn create_teacher(
        &self,
        teacher: CreateTeacherRequest,
        subjects: Vec<i64>,
    ) -> Result<Teacher> {
        self.create_teacher_impl(teacher, subjects).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_email_impl(email).await
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.list_teachers_impl().await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64, now: i64) -> Result<bool> {
        self.delete_teacher_impl(id, now).await
    }

    async fn activate_teacher(&self, id: i64) -> Result<Option<Teacher>> {
        self.activate_teacher_impl(id).await
    }

    async fn list_teacher_subjects(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        self.list_teacher_subjects_impl(teacher_id).await
    }

    async fn assign_subject(&self, teacher_id: i64, subject_id: i64) -> Result<Vec<Subject>> {
        self.assign_subject_impl(teacher_id, subject_id).await
    }

    async fn remove_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool> {
        self.remove_subject_impl(teacher_id, subject_id).await
    }

    async fn replace_teacher_subjects(
        &self,
        teacher_id: i64,
        subject_ids: Vec<i64>,
    ) -> Result<Vec<Subject>> {
        self.replace_teacher_subjects_impl(teacher_id, subject_ids)
            .await
    }

    async fn list_teachers_dictating(&self, subject_id: i64) -> Result<Vec<Teacher>> {
        self.list_teachers_dictating_impl(subject_id).await
    }

    // 科目模块
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_dictated_subjects(&self) -> Result<Vec<Subject>> {
        self.list_dictated_subjects_impl().await
    }

    async fn create_subject(&self, name: &str) -> Result<Subject> {
        self.create_subject_impl(name).await
    }

    // 每周课表模块
    async fn create_weekly_schedule(
        &self,
        schedule: NewWeeklySchedule,
        first_occurrence: DateTime<FixedOffset>,
    ) -> Result<(WeeklySchedule, Vec<Slot>)> {
        self.create_weekly_schedule_impl(schedule, first_occurrence)
            .await
    }

    async fn list_weekly_schedules(&self, teacher_id: i64) -> Result<Vec<WeeklySchedule>> {
        self.list_weekly_schedules_impl(teacher_id).await
    }

    // 课时模块
    async fn expand_weekly_to_monthly(
        &self,
        datetime: DateTime<FixedOffset>,
        teacher_id: i64,
        max_students: i32,
        current_students: i32,
    ) -> Result<Vec<Slot>> {
        self.expand_weekly_to_monthly_impl(datetime, teacher_id, max_students, current_students)
            .await
    }

    async fn get_slot_by_id(&self, id: i64) -> Result<Option<Slot>> {
        self.get_slot_by_id_impl(id).await
    }

    async fn list_individual_open_slots(&self) -> Result<Vec<Slot>> {
        self.list_individual_open_slots_impl().await
    }

    async fn list_group_open_slots(&self) -> Result<Vec<Slot>> {
        self.list_group_open_slots_impl().await
    }

    async fn assign_vacation(&self, teacher_id: i64, from: i64, until: i64) -> Result<Vec<Slot>> {
        self.assign_vacation_impl(teacher_id, from, until).await
    }

    async fn stop_vacation(&self, teacher_id: i64) -> Result<u64> {
        self.stop_vacation_impl(teacher_id).await
    }

    async fn list_teacher_open_slots(
        &self,
        teacher_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<Slot>> {
        self.list_teacher_open_slots_impl(teacher_id, subject_id)
            .await
    }

    // 预约模块
    async fn create_reservation(
        &self,
        reservation: NewReservation,
        offset: FixedOffset,
    ) -> Result<Reservation> {
        self.create_reservation_impl(reservation, offset).await
    }

    async fn get_reservation_by_id(&self, id: i64) -> Result<Option<Reservation>> {
        self.get_reservation_by_id_impl(id).await
    }

    async fn list_student_reservations(&self, student_id: i64) -> Result<Vec<Reservation>> {
        self.list_student_reservations_impl(student_id).await
    }

    async fn list_teacher_reservations_between(
        &self,
        teacher_id: i64,
        from: i64,
        until: i64,
    ) -> Result<Vec<Reservation>> {
        self.list_teacher_reservations_between_impl(teacher_id, from, until)
            .await
    }

    async fn delete_reservation(&self, id: i64) -> Result<bool> {
        self.delete_reservation_impl(id).await
    }

    async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>> {
        self.update_reservation_status_impl(id, status).await
    }

    // 评分模块
    async fn submit_rating(
        &self,
        party: Party,
        id: i64,
        rating: i32,
        reservation_id: Option<i64>,
    ) -> Result<RatingSummary> {
        self.submit_rating_impl(party, id, rating, reservation_id)
            .await
    }

    async fn get_rating(&self, party: Party, id: i64) -> Result<Option<RatingSummary>> {
        self.get_rating_impl(party, id).await
    }

    // 评论模块
    async fn list_comments(&self, party: Party, id: i64) -> Result<Vec<Comment>> {
        self.list_comments_impl(party, id).await
    }

    async fn add_comment(
        &self,
        party: Party,
        id: i64,
        comment: &str,
        commenter_name: &str,
    ) -> Result<Comment> {
        self.add_comment_impl(party, id, comment, commenter_name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("data/linklearn.db").unwrap(),
            "sqlite://data/linklearn.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/ll").unwrap(),
            "postgres://u:p@localhost/ll"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
