use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VisitCheckins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VisitCheckins::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VisitCheckins::VisitId).uuid().not_null())
                    .col(
                        ColumnDef::new(VisitCheckins::ProfessionalId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VisitCheckins::CheckinTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VisitCheckins::Lat).double().not_null())
                    .col(ColumnDef::new(VisitCheckins::Lng).double().not_null())
                    .col(ColumnDef::new(VisitCheckins::DistanceM).integer().not_null())
                    .col(
                        ColumnDef::new(VisitCheckins::IsValidTime)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VisitCheckins::IsValidRadius)
                            .boolean()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VisitCheckins::Table, VisitCheckins::VisitId)
                            .to(Visits::Table, Visits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VisitCheckins::Table, VisitCheckins::ProfessionalId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(VisitCheckins::Table)
                    .col(VisitCheckins::VisitId)
                    .name("idx_visit_checkins_visit_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VisitCheckins::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VisitCheckins {
    Table,
    Id,
    VisitId,
    ProfessionalId,
    CheckinTime,
    Lat,
    Lng,
    DistanceM,
    IsValidTime,
    IsValidRadius,
}

#[derive(Iden)]
enum Visits {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
