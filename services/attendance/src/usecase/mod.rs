pub mod checkin;
pub mod login_code;
pub mod visit;
