use sea_orm::entity::prelude::*;

/// Immutable audit record of a check-in attempt. Written on every attempt,
/// valid or not; never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "visit_checkins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub visit_id: Uuid,
    pub professional_id: Uuid,
    pub checkin_time: chrono::DateTime<chrono::Utc>,
    #[sea_orm(column_type = "Double")]
    pub lat: f64,
    #[sea_orm(column_type = "Double")]
    pub lng: f64,
    pub distance_m: i32,
    pub is_valid_time: bool,
    pub is_valid_radius: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
