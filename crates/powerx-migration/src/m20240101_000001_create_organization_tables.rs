use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Account).string().not_null().unique_key())
                    .col(ColumnDef::new(Employees::Name).string().not_null().default(""))
                    .col(ColumnDef::new(Employees::NickName).string().not_null().default(""))
                    .col(ColumnDef::new(Employees::Description).text().not_null())
                    .col(ColumnDef::new(Employees::Position).string().not_null().default(""))
                    .col(ColumnDef::new(Employees::JobTitle).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Employees::DepartmentId)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Employees::MobilePhone).string().not_null().default(""))
                    .col(ColumnDef::new(Employees::Gender).string().not_null().default("un_know"))
                    .col(ColumnDef::new(Employees::Email).string().not_null().default(""))
                    .col(ColumnDef::new(Employees::ExternalEmail).string().not_null().default(""))
                    .col(ColumnDef::new(Employees::Avatar).string().not_null().default(""))
                    .col(ColumnDef::new(Employees::Password).string().not_null().default(""))
                    .col(ColumnDef::new(Employees::Status).string().not_null().default("enabled"))
                    .col(ColumnDef::new(Employees::IsReserved).boolean().not_null().default(false))
                    .col(ColumnDef::new(Employees::IsActivated).boolean().not_null().default(false))
                    .col(ColumnDef::new(Employees::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Employees::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_status")
                    .table(Employees::Table)
                    .col(Employees::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_department_id")
                    .table(Employees::Table)
                    .col(Employees::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(
                        ColumnDef::new(Departments::ParentId)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Departments::LeaderId)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Departments::Description).text().not_null())
                    .col(ColumnDef::new(Departments::PhoneNumber).string().not_null().default(""))
                    .col(ColumnDef::new(Departments::Email).string().not_null().default(""))
                    .col(ColumnDef::new(Departments::Remark).text().not_null())
                    .col(ColumnDef::new(Departments::IsReserved).boolean().not_null().default(false))
                    .col(ColumnDef::new(Departments::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Departments::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DepartmentAncestors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DepartmentAncestors::DepartmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DepartmentAncestors::AncestorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DepartmentAncestors::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(DepartmentAncestors::DepartmentId)
                            .col(DepartmentAncestors::AncestorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_department_ancestors_department_id")
                            .from(DepartmentAncestors::Table, DepartmentAncestors::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_department_ancestors_ancestor_id")
                            .from(DepartmentAncestors::Table, DepartmentAncestors::AncestorId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_department_ancestors_department_id")
                    .table(DepartmentAncestors::Table)
                    .col(DepartmentAncestors::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_department_ancestors_ancestor_id")
                    .table(DepartmentAncestors::Table)
                    .col(DepartmentAncestors::AncestorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DepartmentAncestors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Account,
    Name,
    NickName,
    Description,
    Position,
    JobTitle,
    DepartmentId,
    MobilePhone,
    Gender,
    Email,
    ExternalEmail,
    Avatar,
    Password,
    Status,
    IsReserved,
    IsActivated,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    ParentId,
    LeaderId,
    Description,
    PhoneNumber,
    Email,
    Remark,
    IsReserved,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DepartmentAncestors {
    Table,
    DepartmentId,
    AncestorId,
    Position,
}
