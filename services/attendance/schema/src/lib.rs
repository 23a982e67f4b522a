//! Sea-ORM entities for the attendance service.

pub mod login_codes;
pub mod users;
pub mod visit_checkins;
pub mod visits;
