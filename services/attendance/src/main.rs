use sea_orm::Database;
use tracing::info;

use medhome_attendance::config::AttendanceConfig;
use medhome_attendance::infra::mail::SmtpLoginCodeMailer;
use medhome_attendance::router::build_router;
use medhome_attendance::state::AppState;

#[tokio::main]
async fn main() {
    medhome_core::tracing::init_tracing();

    let config = AttendanceConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpLoginCodeMailer::new(
        &config.smtp_host,
        config.smtp_port,
        &config.smtp_user,
        &config.smtp_pass,
        config.email_from.clone(),
    )
    .expect("failed to build SMTP transport");

    let state = AppState {
        db,
        mailer,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        login_code_exp_minutes: config.login_code_exp_minutes,
        session_ttl_secs: config.session_ttl_secs,
        checkin: config.checkin,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.attendance_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("attendance service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
