use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Field professional able to log in and check in at visits.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Normalized national ID (digits + check character, no punctuation).
    pub rut: String,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// One-time login code row. Stores only the bcrypt hash of the 6-digit code.
#[derive(Debug, Clone)]
pub struct LoginCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LoginCode {
    /// Unused and unexpired. Expiry comparison is strict (`expires_at > now`).
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && self.expires_at > now
    }
}

/// Visit lifecycle. Closed set — the validator only ever performs
/// PENDING → DONE; IN_PROGRESS belongs to the external scheduling system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    Pending,
    InProgress,
    Done,
}

impl VisitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl std::str::FromStr for VisitStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            other => Err(format!("unknown visit status: {other}")),
        }
    }
}

/// Scheduled home visit assigned to one professional.
#[derive(Debug, Clone)]
pub struct Visit {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub patient_name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub status: VisitStatus,
}

/// Immutable audit record of one check-in attempt.
#[derive(Debug, Clone)]
pub struct CheckinEvent {
    pub id: Uuid,
    pub visit_id: Uuid,
    pub professional_id: Uuid,
    pub checkin_time: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
    pub distance_m: i32,
    pub is_valid_time: bool,
    pub is_valid_radius: bool,
}

/// Tunable thresholds for check-in validation.
#[derive(Debug, Clone, Copy)]
pub struct CheckinPolicy {
    /// Geofence radius in meters (inclusive).
    pub radius_meters: u32,
    /// Minutes before the scheduled start the window opens.
    pub minutes_before_start: i64,
    /// Minutes after the scheduled start the window closes.
    pub minutes_after_start: i64,
}

impl Default for CheckinPolicy {
    fn default() -> Self {
        Self {
            radius_meters: 150,
            minutes_before_start: 10,
            minutes_after_start: 20,
        }
    }
}
