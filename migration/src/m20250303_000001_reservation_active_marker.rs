use sea_orm_migration::prelude::*;

const OLD_INDEX: &str = "idx_reservations_teacher_datetime";
const NEW_INDEX: &str = "idx_reservations_teacher_datetime_active";

/// 已取消的预约不再占用 (teacher_id, datetime) 唯一键
///
/// active_marker 在有效预约上为 1，取消后为 NULL；唯一索引中的 NULL 互不冲突。
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Reservations::Table)
                    .add_column(ColumnDef::new(Reservations::ActiveMarker).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .exec_stmt(
                Query::update()
                    .table(Reservations::Table)
                    .value(Reservations::ActiveMarker, 1)
                    .and_where(Expr::col(Reservations::ReservationStatus).ne("cancelled"))
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(OLD_INDEX)
                    .table(Reservations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(NEW_INDEX)
                    .table(Reservations::Table)
                    .col(Reservations::TeacherId)
                    .col(Reservations::Datetime)
                    .col(Reservations::ActiveMarker)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(NEW_INDEX)
                    .table(Reservations::Table)
                    .to_owned(),
            )
            .await?;

        // 恢复旧索引前清理已取消的记录
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Reservations::Table)
                    .and_where(Expr::col(Reservations::ActiveMarker).is_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(OLD_INDEX)
                    .table(Reservations::Table)
                    .col(Reservations::TeacherId)
                    .col(Reservations::Datetime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Reservations::Table)
                    .drop_column(Reservations::ActiveMarker)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Reservations {
    #[sea_orm(iden = "reservations")]
    Table,
    TeacherId,
    Datetime,
    ReservationStatus,
    ActiveMarker,
}
