use sea_orm_migration::prelude::*;

const ROOT_GUARD_INDEX: &str = "uk_departments_root_guard";

/// Adds a nullable `root_guard` column with a unique index. Only the reserved
/// root stores a value, so a second root cannot be committed even when two
/// initializers race on an empty table.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Departments::Table)
                    .add_column(ColumnDef::new(Departments::RootGuard).boolean().null())
                    .to_owned(),
            )
            .await?;

        manager
            .exec_stmt(
                Query::update()
                    .table(Departments::Table)
                    .value(Departments::RootGuard, true)
                    .and_where(Expr::col(Departments::ParentId).eq(0))
                    .and_where(Expr::col(Departments::IsReserved).eq(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(ROOT_GUARD_INDEX)
                    .table(Departments::Table)
                    .col(Departments::RootGuard)
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
                    .name(ROOT_GUARD_INDEX)
                    .table(Departments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Departments::Table)
                    .drop_column(Departments::RootGuard)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    ParentId,
    IsReserved,
    RootGuard,
}
