use crate::domain::types::CheckinPolicy;
use medhome_session::token::DEFAULT_SESSION_TTL_SECS;

/// Attendance service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AttendanceConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session JWTs.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// TCP port to listen on (default 4000). Env var: `ATTENDANCE_PORT`.
    pub attendance_port: u16,
    /// Login-code lifetime in minutes (default 10). Env var: `LOGIN_CODE_EXP_MINUTES`.
    pub login_code_exp_minutes: i64,
    /// Session lifetime in seconds (default 604800 = 7 days). Env var: `SESSION_TTL_SECS`.
    pub session_ttl_secs: u64,
    /// Geofence / time-window thresholds for check-in validation.
    pub checkin: CheckinPolicy,
    /// SMTP relay for login-code delivery.
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    /// From address on outbound mail.
    pub email_from: String,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AttendanceConfig {
    pub fn from_env() -> Self {
        let defaults = CheckinPolicy::default();
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            attendance_port: env_or("ATTENDANCE_PORT", 4000),
            login_code_exp_minutes: env_or("LOGIN_CODE_EXP_MINUTES", 10),
            session_ttl_secs: env_or("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS),
            checkin: CheckinPolicy {
                radius_meters: env_or("CHECKIN_RADIUS_METERS", defaults.radius_meters),
                minutes_before_start: env_or(
                    "CHECKIN_MINUTES_BEFORE_START",
                    defaults.minutes_before_start,
                ),
                minutes_after_start: env_or(
                    "CHECKIN_MINUTES_AFTER_START",
                    defaults.minutes_after_start,
                ),
            },
            smtp_host: env_or("SMTP_HOST", "smtp.gmail.com".to_owned()),
            smtp_port: env_or("SMTP_PORT", 587),
            smtp_user: env_or("SMTP_USER", String::new()),
            smtp_pass: env_or("SMTP_PASS", String::new()),
            email_from: env_or("EMAIL_FROM", String::new()),
        }
    }
}
