use anyhow::Context as _;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::LoginCodeMailer;
use crate::error::AttendanceServiceError;

/// SMTP delivery for login codes.
///
/// Send failures are reported to the caller, which logs and masks them — a
/// broken relay must never reveal to the client whether a code was issued.
#[derive(Clone)]
pub struct SmtpLoginCodeMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpLoginCodeMailer {
    pub fn new(
        host: &str,
        port: u16,
        user: &str,
        pass: &str,
        from: String,
    ) -> Result<Self, AttendanceServiceError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .context("build SMTP transport")?
            .port(port);
        if !user.is_empty() {
            builder = builder.credentials(Credentials::new(user.to_owned(), pass.to_owned()));
        }
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

impl LoginCodeMailer for SmtpLoginCodeMailer {
    async fn send_login_code(
        &self,
        to: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<(), AttendanceServiceError> {
        let body = format!(
            "Su código de acceso es: {code}\n\n\
             Este código es válido por {ttl_minutes} minutos.\n\n\
             Si no solicitaste este código, puedes ignorar este mensaje."
        );
        let email = Message::builder()
            .from(self.from.parse().context("parse EMAIL_FROM address")?)
            .to(to.parse().context("parse recipient address")?)
            .subject("Código de acceso - MEDHOME")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("build login code email")?;

        self.transport
            .send(email)
            .await
            .context("send login code email")?;

        tracing::info!(recipient = %to, "login code email sent");
        Ok(())
    }
}
