use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Visits::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Visits::ProfessionalId).uuid().not_null())
                    .col(ColumnDef::new(Visits::PatientName).string().not_null())
                    .col(ColumnDef::new(Visits::Address).string().not_null())
                    .col(ColumnDef::new(Visits::Lat).double().not_null())
                    .col(ColumnDef::new(Visits::Lng).double().not_null())
                    .col(
                        ColumnDef::new(Visits::ScheduledStart)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Visits::ScheduledEnd)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Visits::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Visits::Table, Visits::ProfessionalId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Daily agenda query filters by professional + scheduled day.
        manager
            .create_index(
                Index::create()
                    .table(Visits::Table)
                    .col(Visits::ProfessionalId)
                    .col(Visits::ScheduledStart)
                    .name("idx_visits_professional_scheduled")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Visits {
    Table,
    Id,
    ProfessionalId,
    PatientName,
    Address,
    Lat,
    Lng,
    ScheduledStart,
    ScheduledEnd,
    Status,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
