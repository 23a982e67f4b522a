use sea_orm::DatabaseConnection;

use medhome_session::identity::SessionSecret;

use crate::domain::types::CheckinPolicy;
use crate::infra::db::{
    DbCheckinEventRepository, DbLoginCodeRepository, DbUserRepository, DbVisitRepository,
};
use crate::infra::mail::SmtpLoginCodeMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: SmtpLoginCodeMailer,
    pub jwt_secret: String,
    pub cookie_domain: String,
    pub login_code_exp_minutes: i64,
    pub session_ttl_secs: u64,
    pub checkin: CheckinPolicy,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn login_code_repo(&self) -> DbLoginCodeRepository {
        DbLoginCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn visit_repo(&self) -> DbVisitRepository {
        DbVisitRepository {
            db: self.db.clone(),
        }
    }

    pub fn checkin_event_repo(&self) -> DbCheckinEventRepository {
        DbCheckinEventRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> SmtpLoginCodeMailer {
        self.mailer.clone()
    }
}

impl SessionSecret for AppState {
    fn session_secret(&self) -> &str {
        &self.jwt_secret
    }
}
