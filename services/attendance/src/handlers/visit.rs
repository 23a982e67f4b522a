use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use medhome_session::identity::SessionUser;

use crate::domain::types::Visit;
use crate::error::AttendanceServiceError;
use crate::state::AppState;
use crate::usecase::checkin::{AttemptCheckinInput, AttemptCheckinUseCase};
use crate::usecase::visit::ListVisitsUseCase;

/// Timestamps go out as RFC 3339 with millisecond precision, the format the
/// mobile client's date parsing expects.
fn rfc3339_millis<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitResponse {
    pub id: String,
    pub patient_name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(serialize_with = "rfc3339_millis")]
    pub scheduled_start: DateTime<Utc>,
    #[serde(serialize_with = "rfc3339_millis")]
    pub scheduled_end: DateTime<Utc>,
    pub status: &'static str,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id.to_string(),
            patient_name: visit.patient_name,
            address: visit.address,
            lat: visit.lat,
            lng: visit.lng,
            scheduled_start: visit.scheduled_start,
            scheduled_end: visit.scheduled_end,
            status: visit.status.as_str(),
        }
    }
}

// ── GET /visits/today ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct VisitListResponse {
    pub ok: bool,
    pub visits: Vec<VisitResponse>,
    pub date: String,
}

pub async fn visits_today(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<VisitListResponse>, AttendanceServiceError> {
    let today = Utc::now().date_naive();
    list_visits(state, session.user_id, today).await
}

// ── GET /visits/by-date?date=YYYY-MM-DD ───────────────────────────────────────

#[derive(Deserialize)]
pub struct ByDateQuery {
    pub date: Option<String>,
}

pub async fn visits_by_date(
    session: SessionUser,
    State(state): State<AppState>,
    Query(query): Query<ByDateQuery>,
) -> Result<Json<VisitListResponse>, AttendanceServiceError> {
    let date = match query.date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| AttendanceServiceError::InvalidDate)?,
        None => Utc::now().date_naive(),
    };
    list_visits(state, session.user_id, date).await
}

async fn list_visits(
    state: AppState,
    professional_id: Uuid,
    date: NaiveDate,
) -> Result<Json<VisitListResponse>, AttendanceServiceError> {
    let usecase = ListVisitsUseCase {
        visits: state.visit_repo(),
    };
    let visits = usecase.execute(professional_id, date).await?;

    Ok(Json(VisitListResponse {
        ok: true,
        visits: visits.into_iter().map(VisitResponse::from).collect(),
        date: date.format("%Y-%m-%d").to_string(),
    }))
}

// ── POST /visits/{id}/checkin ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckinRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    pub ok: bool,
    pub is_valid_time: bool,
    pub is_valid_radius: bool,
    pub distance_meters: i32,
    pub message: String,
}

pub async fn checkin_visit(
    session: SessionUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CheckinRequest>,
) -> Result<Json<CheckinResponse>, AttendanceServiceError> {
    let visit_id =
        Uuid::parse_str(&id).map_err(|_| AttendanceServiceError::InvalidVisitId)?;
    let (lat, lng) = match (body.lat, body.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(AttendanceServiceError::MissingCoordinates),
    };

    let usecase = AttemptCheckinUseCase {
        visits: state.visit_repo(),
        checkins: state.checkin_event_repo(),
        policy: state.checkin,
    };
    let outcome = usecase
        .execute(AttemptCheckinInput {
            visit_id,
            professional_id: session.user_id,
            lat,
            lng,
            now: Utc::now(),
        })
        .await?;

    // Failed validations are a 200 with ok:false — the attempt itself was
    // processed and audited; only unknown visits and bad input are errors.
    Ok(Json(CheckinResponse {
        ok: outcome.ok,
        is_valid_time: outcome.is_valid_time,
        is_valid_radius: outcome.is_valid_radius,
        distance_meters: outcome.distance_meters,
        message: outcome.message,
    }))
}
