use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{LoginCodeMailer, LoginCodeRepository, UserRepository};
use crate::domain::rut::{format_rut, normalize_rut};
use crate::domain::types::LoginCode;
use crate::error::AttendanceServiceError;

/// Neutral response for code requests: identical whether or not the rut
/// exists, so the endpoint cannot be used to enumerate registered users.
pub const NEUTRAL_REQUEST_MESSAGE: &str =
    "Si el RUT está registrado, se ha enviado un código a su correo.";

/// Bcrypt cost for login-code hashes. Codes live ten minutes; a heavier
/// cost would only slow down the login path.
const BCRYPT_COST: u32 = 10;

fn generate_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000..=999_999).to_string()
}

// ── RequestLoginCode ─────────────────────────────────────────────────────────

pub struct RequestLoginCodeInput {
    pub rut: String,
}

pub struct RequestLoginCodeOutput {
    pub message: &'static str,
}

pub struct RequestLoginCodeUseCase<U, C, M>
where
    U: UserRepository,
    C: LoginCodeRepository,
    M: LoginCodeMailer,
{
    pub users: U,
    pub codes: C,
    pub mailer: M,
    pub ttl_minutes: i64,
}

impl<U, C, M> RequestLoginCodeUseCase<U, C, M>
where
    U: UserRepository,
    C: LoginCodeRepository,
    M: LoginCodeMailer,
{
    /// Infallible at the boundary: unknown ruts and internal failures alike
    /// collapse into the neutral success message. Failures are logged, never
    /// surfaced to the client.
    pub async fn execute(&self, input: RequestLoginCodeInput) -> RequestLoginCodeOutput {
        if let Err(e) = self.try_issue(&input.rut).await {
            tracing::warn!(error = %e, "login code issuance failed, masking response");
        }
        RequestLoginCodeOutput {
            message: NEUTRAL_REQUEST_MESSAGE,
        }
    }

    async fn try_issue(&self, raw_rut: &str) -> Result<(), AttendanceServiceError> {
        let rut = normalize_rut(raw_rut);
        let Some(user) = self.users.find_active_by_rut(&rut).await? else {
            return Ok(());
        };

        let code = generate_code();
        let code_hash = bcrypt::hash(&code, BCRYPT_COST)
            .map_err(|e| AttendanceServiceError::Internal(e.into()))?;

        let now = Utc::now();
        self.codes
            .create(&LoginCode {
                id: Uuid::new_v4(),
                user_id: user.id,
                code_hash,
                expires_at: now + Duration::minutes(self.ttl_minutes),
                used_at: None,
                created_at: now,
            })
            .await?;

        self.mailer
            .send_login_code(&user.email, &code, self.ttl_minutes)
            .await
    }
}

// ── VerifyLoginCode ──────────────────────────────────────────────────────────

pub struct VerifyLoginCodeInput {
    pub rut: String,
    pub code: String,
}

#[derive(Debug)]
pub struct VerifyLoginCodeOutput {
    pub user_id: Uuid,
    /// Display form of the rut (hyphen before the check digit).
    pub rut: String,
    pub name: String,
    pub token: String,
}

pub struct VerifyLoginCodeUseCase<U, C>
where
    U: UserRepository,
    C: LoginCodeRepository,
{
    pub users: U,
    pub codes: C,
    pub jwt_secret: String,
    pub session_ttl_secs: u64,
}

impl<U, C> VerifyLoginCodeUseCase<U, C>
where
    U: UserRepository,
    C: LoginCodeRepository,
{
    /// Every failure path yields the same `InvalidLoginCode` — unknown rut,
    /// no usable code, hash mismatch, and lost claim race are indistinguishable
    /// to the caller.
    pub async fn execute(
        &self,
        input: VerifyLoginCodeInput,
    ) -> Result<VerifyLoginCodeOutput, AttendanceServiceError> {
        let rut = normalize_rut(&input.rut);
        let user = self
            .users
            .find_active_by_rut(&rut)
            .await?
            .ok_or(AttendanceServiceError::InvalidLoginCode)?;

        let now = Utc::now();
        let login_code = self
            .codes
            .find_latest_usable(user.id, now)
            .await?
            .ok_or(AttendanceServiceError::InvalidLoginCode)?;

        let matches = bcrypt::verify(&input.code, &login_code.code_hash)
            .map_err(|e| AttendanceServiceError::Internal(e.into()))?;
        if !matches {
            return Err(AttendanceServiceError::InvalidLoginCode);
        }

        // Conditional update; loser of a concurrent race gets `false` and the
        // generic rejection. A code can never verify twice.
        if !self.codes.claim(login_code.id, now).await? {
            return Err(AttendanceServiceError::InvalidLoginCode);
        }

        let (token, _exp) = medhome_session::token::issue_session_token(
            user.id,
            &user.rut,
            &user.name,
            &self.jwt_secret,
            self.session_ttl_secs,
        )
        .map_err(|e| AttendanceServiceError::Internal(e.into()))?;

        Ok(VerifyLoginCodeOutput {
            user_id: user.id,
            rut: format_rut(&user.rut),
            name: user.name,
            token,
        })
    }
}
