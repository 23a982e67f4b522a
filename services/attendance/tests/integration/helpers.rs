use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use medhome_attendance::domain::repository::{
    CheckinEventRepository, LoginCodeMailer, LoginCodeRepository, UserRepository, VisitRepository,
};
use medhome_attendance::domain::types::{CheckinEvent, LoginCode, User, Visit, VisitStatus};
use medhome_attendance::error::AttendanceServiceError;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-integration-tests";

/// Low bcrypt cost keeps the test suite fast; production uses cost 10.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_user() -> User {
    User {
        id: Uuid::new_v4(),
        rut: "156362743".into(),
        name: "Daniel Hernández".into(),
        email: "dlhernan@example.com".into(),
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn test_login_code(user_id: Uuid, plaintext: &str) -> LoginCode {
    let now = Utc::now();
    LoginCode {
        id: Uuid::new_v4(),
        user_id,
        code_hash: bcrypt::hash(plaintext, TEST_BCRYPT_COST).unwrap(),
        expires_at: now + Duration::minutes(10),
        used_at: None,
        created_at: now,
    }
}

pub fn test_visit(professional_id: Uuid, scheduled_start: DateTime<Utc>) -> Visit {
    Visit {
        id: Uuid::new_v4(),
        professional_id,
        patient_name: "Juan Pérez".into(),
        address: "Av. Alejandro Fleming 9840, Las Condes".into(),
        lat: -33.424034,
        lng: -70.5260594,
        scheduled_start,
        scheduled_end: scheduled_start + Duration::minutes(45),
        status: VisitStatus::Pending,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Vec<User>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn empty() -> Self {
        Self { users: vec![] }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_active_by_rut(
        &self,
        rut: &str,
    ) -> Result<Option<User>, AttendanceServiceError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.rut == rut && u.is_active)
            .cloned())
    }
}

// ── MockLoginCodeRepo ────────────────────────────────────────────────────────

pub struct MockLoginCodeRepo {
    pub codes: Arc<Mutex<Vec<LoginCode>>>,
}

impl MockLoginCodeRepo {
    pub fn new(codes: Vec<LoginCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the internal rows for post-execution inspection.
    pub fn codes_handle(&self) -> Arc<Mutex<Vec<LoginCode>>> {
        Arc::clone(&self.codes)
    }
}

impl LoginCodeRepository for MockLoginCodeRepo {
    async fn create(&self, code: &LoginCode) -> Result<(), AttendanceServiceError> {
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn find_latest_usable(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LoginCode>, AttendanceServiceError> {
        let codes = self.codes.lock().unwrap();
        Ok(codes
            .iter()
            .filter(|c| c.user_id == user_id && c.is_usable(now))
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn claim(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, AttendanceServiceError> {
        let mut codes = self.codes.lock().unwrap();
        match codes.iter_mut().find(|c| c.id == id && c.used_at.is_none()) {
            Some(code) => {
                code.used_at = Some(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Mock mailers ─────────────────────────────────────────────────────────────

pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl LoginCodeMailer for MockMailer {
    async fn send_login_code(
        &self,
        to: &str,
        code: &str,
        _ttl_minutes: i64,
    ) -> Result<(), AttendanceServiceError> {
        self.sent.lock().unwrap().push((to.to_owned(), code.to_owned()));
        Ok(())
    }
}

/// Mailer that always fails — for the masking tests.
pub struct FailingMailer;

impl LoginCodeMailer for FailingMailer {
    async fn send_login_code(
        &self,
        _to: &str,
        _code: &str,
        _ttl_minutes: i64,
    ) -> Result<(), AttendanceServiceError> {
        Err(AttendanceServiceError::Internal(anyhow::anyhow!(
            "smtp relay unreachable"
        )))
    }
}

// ── MockVisitRepo ────────────────────────────────────────────────────────────

pub struct MockVisitRepo {
    pub visits: Arc<Mutex<Vec<Visit>>>,
}

impl MockVisitRepo {
    pub fn new(visits: Vec<Visit>) -> Self {
        Self {
            visits: Arc::new(Mutex::new(visits)),
        }
    }

    pub fn visits_handle(&self) -> Arc<Mutex<Vec<Visit>>> {
        Arc::clone(&self.visits)
    }
}

impl VisitRepository for MockVisitRepo {
    async fn find_for_professional(
        &self,
        visit_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Option<Visit>, AttendanceServiceError> {
        Ok(self
            .visits
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == visit_id && v.professional_id == professional_id)
            .cloned())
    }

    async fn list_by_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Visit>, AttendanceServiceError> {
        let mut visits: Vec<Visit> = self
            .visits
            .lock()
            .unwrap()
            .iter()
            .filter(|v| {
                v.professional_id == professional_id && v.scheduled_start.date_naive() == date
            })
            .cloned()
            .collect();
        visits.sort_by_key(|v| v.scheduled_start);
        Ok(visits)
    }

    async fn mark_done(&self, visit_id: Uuid) -> Result<(), AttendanceServiceError> {
        let mut visits = self.visits.lock().unwrap();
        if let Some(visit) = visits.iter_mut().find(|v| v.id == visit_id) {
            visit.status = VisitStatus::Done;
        }
        Ok(())
    }
}

// ── MockCheckinEventRepo ─────────────────────────────────────────────────────

pub struct MockCheckinEventRepo {
    pub events: Arc<Mutex<Vec<CheckinEvent>>>,
}

impl MockCheckinEventRepo {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn events_handle(&self) -> Arc<Mutex<Vec<CheckinEvent>>> {
        Arc::clone(&self.events)
    }
}

impl CheckinEventRepository for MockCheckinEventRepo {
    async fn create(&self, event: &CheckinEvent) -> Result<(), AttendanceServiceError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
