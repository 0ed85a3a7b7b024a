use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 认证相关方法
    // 按角色加载已认证主体
    async fn get_principal(&self, id: i64, role: Role) -> Result<Option<Principal>>;
    // 通过邮箱获取管理员
    async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>>;
    // 统计管理员数量
    async fn count_admins(&self) -> Result<u64>;
    // 创建管理员
    async fn create_admin(&self, email: &str, password_hash: &str) -> Result<Admin>;
    // 更新指定角色账号的密码哈希，账号不存在时返回 false
    async fn update_password(&self, role: Role, id: i64, password_hash: &str) -> Result<bool>;

    /// 学生管理方法
    // 创建学生（邮箱重复返回 Conflict）
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生，并释放其全部预约占用的座位
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 学生曾预约过、且教授该科目的教师（最多 3 位）
    async fn list_previous_teachers(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<PreviousTeacher>>;
    // 学生尚未评分的已结束课程
    async fn list_unrated_classes(&self, student_id: i64) -> Result<Vec<UnratedClass>>;

    /// 教师管理方法
    // 创建教师并写入科目集合
    async fn create_teacher(
        &self,
        teacher: CreateTeacherRequest,
        subjects: Vec<i64>,
    ) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>>;
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;
    // 删除教师（存在晚于 now 的未取消预约时返回 Conflict）
    async fn delete_teacher(&self, id: i64, now: i64) -> Result<bool>;
    async fn activate_teacher(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teacher_subjects(&self, teacher_id: i64) -> Result<Vec<Subject>>;
    async fn assign_subject(&self, teacher_id: i64, subject_id: i64) -> Result<Vec<Subject>>;
    async fn remove_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool>;
    // 整体替换科目集合
    async fn replace_teacher_subjects(
        &self,
        teacher_id: i64,
        subject_ids: Vec<i64>,
    ) -> Result<Vec<Subject>>;
    // 教授该科目且有未占用课时的教师
    async fn list_teachers_dictating(&self, subject_id: i64) -> Result<Vec<Teacher>>;

    /// 科目管理方法
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn create_subject(&self, name: &str) -> Result<Subject>;
    // 至少有一位教师教授的科目
    async fn list_dictated_subjects(&self) -> Result<Vec<Subject>>;

    /// 每周课表方法
    // 保存模板并从首次出现时刻展开 4 周课时
    async fn create_weekly_schedule(
        &self,
        schedule: NewWeeklySchedule,
        first_occurrence: DateTime<FixedOffset>,
    ) -> Result<(WeeklySchedule, Vec<Slot>)>;
    async fn list_weekly_schedules(&self, teacher_id: i64) -> Result<Vec<WeeklySchedule>>;

    /// 课时可用性方法
    // 展开 4 个每周课时（单事务）
    async fn expand_weekly_to_monthly(
        &self,
        datetime: DateTime<FixedOffset>,
        teacher_id: i64,
        max_students: i32,
        current_students: i32,
    ) -> Result<Vec<Slot>>;
    async fn get_slot_by_id(&self, id: i64) -> Result<Option<Slot>>;
    async fn list_individual_open_slots(&self) -> Result<Vec<Slot>>;
    async fn list_group_open_slots(&self) -> Result<Vec<Slot>>;
    // 在 [from, until] 内为教师设置假期，返回被占用的课时
    async fn assign_vacation(&self, teacher_id: i64, from: i64, until: i64) -> Result<Vec<Slot>>;
    // 结束假期，返回被释放的课时数
    async fn stop_vacation(&self, teacher_id: i64) -> Result<u64>;
    // 教师未被占用的课时，可按科目过滤
    async fn list_teacher_open_slots(
        &self,
        teacher_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<Slot>>;

    /// 预约管理方法
    async fn create_reservation(
        &self,
        reservation: NewReservation,
        offset: FixedOffset,
    ) -> Result<Reservation>;
    async fn get_reservation_by_id(&self, id: i64) -> Result<Option<Reservation>>;
    async fn list_student_reservations(&self, student_id: i64) -> Result<Vec<Reservation>>;
    async fn list_teacher_reservations_between(
        &self,
        teacher_id: i64,
        from: i64,
        until: i64,
    ) -> Result<Vec<Reservation>>;
    async fn delete_reservation(&self, id: i64) -> Result<bool>;
    async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>>;

    /// 评分方法
    async fn submit_rating(
        &self,
        party: Party,
        id: i64,
        rating: i32,
        reservation_id: Option<i64>,
    ) -> Result<RatingSummary>;
    async fn get_rating(&self, party: Party, id: i64) -> Result<Option<RatingSummary>>;

    /// 评论方法
    async fn list_comments(&self, party: Party, id: i64) -> Result<Vec<Comment>>;
    async fn add_comment(
        &self,
        party: Party,
        id: i64,
        comment: &str,
        commenter_name: &str,
    ) -> Result<Comment>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
