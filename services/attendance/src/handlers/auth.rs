use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use medhome_session::cookie::{clear_session_cookie, set_session_cookie};
use medhome_session::identity::SessionUser;

use crate::domain::rut::format_rut;
use crate::error::AttendanceServiceError;
use crate::state::AppState;
use crate::usecase::login_code::{
    RequestLoginCodeInput, RequestLoginCodeUseCase, VerifyLoginCodeInput, VerifyLoginCodeUseCase,
};

#[derive(Serialize)]
pub struct SessionUserResponse {
    pub id: String,
    pub rut: String,
    pub name: String,
}

// ── POST /auth/request-code ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestCodeRequest {
    pub rut: Option<String>,
}

#[derive(Serialize)]
pub struct RequestCodeResponse {
    pub ok: bool,
    pub message: &'static str,
}

pub async fn request_code(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeRequest>,
) -> Result<Json<RequestCodeResponse>, AttendanceServiceError> {
    let rut = body
        .rut
        .filter(|r| !r.trim().is_empty())
        .ok_or(AttendanceServiceError::MissingRut)?;

    let usecase = RequestLoginCodeUseCase {
        users: state.user_repo(),
        codes: state.login_code_repo(),
        mailer: state.mailer(),
        ttl_minutes: state.login_code_exp_minutes,
    };
    let out = usecase.execute(RequestLoginCodeInput { rut }).await;

    Ok(Json(RequestCodeResponse {
        ok: true,
        message: out.message,
    }))
}

// ── POST /auth/verify-code ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyCodeRequest {
    pub rut: Option<String>,
    pub code: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyCodeResponse {
    pub ok: bool,
    pub user: SessionUserResponse,
}

pub async fn verify_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyCodeRequest>,
) -> Result<impl IntoResponse, AttendanceServiceError> {
    let (rut, code) = match (body.rut, body.code) {
        (Some(rut), Some(code)) if !rut.trim().is_empty() && !code.trim().is_empty() => {
            (rut, code)
        }
        _ => return Err(AttendanceServiceError::MissingCredentials),
    };

    let usecase = VerifyLoginCodeUseCase {
        users: state.user_repo(),
        codes: state.login_code_repo(),
        jwt_secret: state.jwt_secret.clone(),
        session_ttl_secs: state.session_ttl_secs,
    };
    let out = usecase.execute(VerifyLoginCodeInput { rut, code }).await?;

    let jar = set_session_cookie(
        jar,
        out.token,
        state.cookie_domain.clone(),
        state.session_ttl_secs,
    );

    Ok((
        StatusCode::OK,
        jar,
        Json(VerifyCodeResponse {
            ok: true,
            user: SessionUserResponse {
                id: out.user_id.to_string(),
                rut: out.rut,
                name: out.name,
            },
        }),
    ))
}

// ── GET /auth/me ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub ok: bool,
    pub user: SessionUserResponse,
}

pub async fn me(session: SessionUser) -> Json<MeResponse> {
    Json(MeResponse {
        ok: true,
        user: SessionUserResponse {
            id: session.user_id.to_string(),
            rut: format_rut(&session.rut),
            name: session.name,
        },
    })
}

// ── POST /auth/logout ─────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    _session: SessionUser,
    jar: CookieJar,
) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    (StatusCode::NO_CONTENT, jar)
}
