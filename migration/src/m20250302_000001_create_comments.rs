use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 学生评论表 ====================
        manager
            .create_table(
                Table::create()
                    .table(StudentComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentComments::CommentId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentComments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(StudentComments::CommenterName)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentComments::Table, StudentComments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 教师评论表 ====================
        manager
            .create_table(
                Table::create()
                    .table(TeacherComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherComments::CommentId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherComments::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeacherComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(TeacherComments::CommenterName)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherComments::Table, TeacherComments::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_comments_student_id")
                    .table(StudentComments::Table)
                    .col(StudentComments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_teacher_comments_teacher_id")
                    .table(TeacherComments::Table)
                    .col(TeacherComments::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeacherComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentComments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum StudentComments {
    #[sea_orm(iden = "student_comments")]
    Table,
    CommentId,
    StudentId,
    Comment,
    CommenterName,
}

#[derive(DeriveIden)]
enum TeacherComments {
    #[sea_orm(iden = "teacher_comments")]
    Table,
    CommentId,
    TeacherId,
    Comment,
    CommenterName,
}
