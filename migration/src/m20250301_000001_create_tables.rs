use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Students::Rating).double().null())
                    .col(
                        ColumnDef::new(Students::TotalRatings)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 教师表
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teachers::FirstName).string().not_null())
                    .col(ColumnDef::new(Teachers::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Teachers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Teachers::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Teachers::OnVacation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Teachers::Rating).double().null())
                    .col(
                        ColumnDef::new(Teachers::TotalRatings)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Teachers::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 管理员表
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Admins::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 教师科目关联表
        manager
            .create_table(
                Table::create()
                    .table(SubjectTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubjectTeachers::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectTeachers::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(SubjectTeachers::TeacherId)
                            .col(SubjectTeachers::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectTeachers::Table, SubjectTeachers::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectTeachers::Table, SubjectTeachers::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 每周课表模板
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::DayOfWeek).integer().not_null())
                    .col(ColumnDef::new(Schedules::StartTime).string().not_null())
                    .col(ColumnDef::new(Schedules::EndTime).string().not_null())
                    .col(
                        ColumnDef::new(Schedules::MaxStudents)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schedules::Table, Schedules::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 月度课时（可预约的具体时段）
        manager
            .create_table(
                Table::create()
                    .table(MonthlySchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlySchedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MonthlySchedules::Datetime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlySchedules::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlySchedules::MaxStudents)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlySchedules::CurrentStudents)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MonthlySchedules::IsTaken)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MonthlySchedules::Table, MonthlySchedules::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 预约表
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::ScheduleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::Datetime).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::ReservationStatus)
                            .string()
                            .not_null()
                            .default("booked"),
                    )
                    .col(
                        ColumnDef::new(Reservations::StudentRated)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reservations::IsRated)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reservations::Table, Reservations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reservations::Table, Reservations::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reservations::Table, Reservations::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reservations::Table, Reservations::ScheduleId)
                            .to(MonthlySchedules::Table, MonthlySchedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 同一教师同一时刻只能存在一条预约
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reservations_teacher_datetime")
                    .table(Reservations::Table)
                    .col(Reservations::TeacherId)
                    .col(Reservations::Datetime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reservations_student_id")
                    .table(Reservations::Table)
                    .col(Reservations::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reservations_schedule_id")
                    .table(Reservations::Table)
                    .col(Reservations::ScheduleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_monthly_schedules_teacher_datetime")
                    .table(MonthlySchedules::Table)
                    .col(MonthlySchedules::TeacherId)
                    .col(MonthlySchedules::Datetime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_schedules_teacher_id")
                    .table(Schedules::Table)
                    .col(Schedules::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MonthlySchedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectTeachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Rating,
    TotalRatings,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    IsActive,
    OnVacation,
    Rating,
    TotalRatings,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Admins {
    #[sea_orm(iden = "admins")]
    Table,
    Id,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SubjectTeachers {
    #[sea_orm(iden = "subject_teachers")]
    Table,
    TeacherId,
    SubjectId,
}

#[derive(DeriveIden)]
enum Schedules {
    #[sea_orm(iden = "schedules")]
    Table,
    Id,
    TeacherId,
    DayOfWeek,
    StartTime,
    EndTime,
    MaxStudents,
}

#[derive(DeriveIden)]
enum MonthlySchedules {
    #[sea_orm(iden = "monthly_schedules")]
    Table,
    Id,
    Datetime,
    TeacherId,
    MaxStudents,
    CurrentStudents,
    IsTaken,
}

#[derive(DeriveIden)]
enum Reservations {
    #[sea_orm(iden = "reservations")]
    Table,
    Id,
    StudentId,
    TeacherId,
    SubjectId,
    ScheduleId,
    Datetime,
    ReservationStatus,
    StudentRated,
    IsRated,
    CreatedAt,
}
