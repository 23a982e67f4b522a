use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_login_codes;
mod m20260801_000003_create_visits;
mod m20260801_000004_create_visit_checkins;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_login_codes::Migration),
            Box::new(m20260801_000003_create_visits::Migration),
            Box::new(m20260801_000004_create_visit_checkins::Migration),
        ]
    }
}

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
