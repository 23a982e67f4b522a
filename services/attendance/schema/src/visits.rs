use sea_orm::entity::prelude::*;

/// Scheduled home visit. Created by the external scheduling system; the only
/// mutation this service performs is the PENDING → DONE status transition.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "visits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub professional_id: Uuid,
    pub patient_name: String,
    pub address: String,
    #[sea_orm(column_type = "Double")]
    pub lat: f64,
    #[sea_orm(column_type = "Double")]
    pub lng: f64,
    pub scheduled_start: chrono::DateTime<chrono::Utc>,
    pub scheduled_end: chrono::DateTime<chrono::Utc>,
    /// One of PENDING, IN_PROGRESS, DONE (see `domain::types::VisitStatus`).
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
