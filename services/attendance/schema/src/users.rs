use sea_orm::entity::prelude::*;

/// Field professional. Provisioned by seed/admin tooling; this service only
/// reads, except for the `is_active` flag flipped out-of-band.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Normalized national ID: digits + check character, no punctuation.
    #[sea_orm(unique)]
    pub rut: String,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
