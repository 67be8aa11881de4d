use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AvailabilityPeriods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvailabilityPeriods::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPeriods::PropertyId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPeriods::StartDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPeriods::EndDate)
                            .date()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AvailabilityPeriods::Table, AvailabilityPeriods::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AvailabilityPeriods::Table)
                    .col(AvailabilityPeriods::PropertyId)
                    .name("idx_availability_periods_property_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AvailabilityPeriods::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AvailabilityPeriods {
    Table,
    Id,
    PropertyId,
    StartDate,
    EndDate,
}

#[derive(Iden)]
enum Properties {
    Table,
    Id,
}
