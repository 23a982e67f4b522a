//! Session cookie extractor — the auth gate in front of protected routes.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::cookie::AUTH_TOKEN;
use crate::token::validate_session_token;

/// Exposes the session-signing secret to the extractor. Implemented by the
/// service's `AppState`.
pub trait SessionSecret {
    fn session_secret(&self) -> &str;
}

/// Authenticated professional extracted from the `auth_token` cookie.
///
/// Missing cookie, bad signature, and expired token all reject uniformly
/// with 401 — the client learns nothing beyond "unauthenticated".
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub rut: String,
    pub name: String,
}

/// 401 rejection with the JSON body the original clients expect.
#[derive(Debug)]
pub struct Unauthenticated;

impl IntoResponse for Unauthenticated {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "ok": false,
            "message": "No autenticado.",
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: SessionSecret + Send + Sync,
{
    type Rejection = Unauthenticated;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(AUTH_TOKEN).map(|c| c.value().to_owned());
        let info = token.and_then(|t| validate_session_token(&t, state.session_secret()).ok());

        async move {
            let info = info.ok_or(Unauthenticated)?;
            Ok(Self {
                user_id: info.user_id,
                rut: info.rut,
                name: info.name,
            })
        }
    }
}
