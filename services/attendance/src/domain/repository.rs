#![allow(async_fn_in_trait)]

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::types::{CheckinEvent, LoginCode, User, Visit};
use crate::error::AttendanceServiceError;

/// Read-only user directory, keyed by normalized rut.
pub trait UserRepository: Send + Sync {
    async fn find_active_by_rut(&self, rut: &str)
    -> Result<Option<User>, AttendanceServiceError>;
}

/// Repository for one-time login codes.
pub trait LoginCodeRepository: Send + Sync {
    /// Insert a new code row. Rows are never deleted (audit trail).
    async fn create(&self, code: &LoginCode) -> Result<(), AttendanceServiceError>;

    /// Most recently created unused, unexpired code for the user
    /// (`used_at IS NULL AND expires_at > now`, newest `created_at` first).
    async fn find_latest_usable(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LoginCode>, AttendanceServiceError>;

    /// Atomically consume a code: set `used_at = now` only if it is still
    /// unused. Returns `false` when another request already claimed it —
    /// a single conditional UPDATE, so two racing verifications can never
    /// both succeed.
    async fn claim(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AttendanceServiceError>;
}

/// Repository for scheduled visits.
pub trait VisitRepository: Send + Sync {
    /// Fetch a visit only if it belongs to the given professional.
    async fn find_for_professional(
        &self,
        visit_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Option<Visit>, AttendanceServiceError>;

    /// All visits for the professional scheduled on the given (UTC) day,
    /// ordered by scheduled start.
    async fn list_by_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Visit>, AttendanceServiceError>;

    /// Transition the visit to DONE.
    async fn mark_done(&self, visit_id: Uuid) -> Result<(), AttendanceServiceError>;
}

/// Append-only store for check-in audit events.
pub trait CheckinEventRepository: Send + Sync {
    async fn create(&self, event: &CheckinEvent) -> Result<(), AttendanceServiceError>;
}

/// Outbound delivery of plaintext login codes.
pub trait LoginCodeMailer: Send + Sync {
    async fn send_login_code(
        &self,
        to: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<(), AttendanceServiceError>;
}
