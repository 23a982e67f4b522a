use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::geo::distance_meters;
use crate::domain::repository::{CheckinEventRepository, VisitRepository};
use crate::domain::types::{CheckinEvent, CheckinPolicy};
use crate::domain::window::checkin_window;
use crate::error::AttendanceServiceError;

pub struct AttemptCheckinInput {
    pub visit_id: Uuid,
    pub professional_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    /// Supplied by the handler so the decision itself stays clock-free.
    pub now: DateTime<Utc>,
}

/// Result of a check-in attempt. `ok` is true only when both checks pass.
#[derive(Debug)]
pub struct CheckinOutcome {
    pub ok: bool,
    pub is_valid_time: bool,
    pub is_valid_radius: bool,
    pub distance_meters: i32,
    pub message: String,
}

pub struct AttemptCheckinUseCase<V, E>
where
    V: VisitRepository,
    E: CheckinEventRepository,
{
    pub visits: V,
    pub checkins: E,
    pub policy: CheckinPolicy,
}

impl<V, E> AttemptCheckinUseCase<V, E>
where
    V: VisitRepository,
    E: CheckinEventRepository,
{
    /// Classify one check-in attempt and apply its effects.
    ///
    /// Every attempt that reaches a known visit is recorded as an audit
    /// event, valid or not. The visit transitions to DONE iff both the time
    /// window and the geofence check pass. Repeated attempts on a DONE visit
    /// are allowed; they just append further audit rows.
    pub async fn execute(
        &self,
        input: AttemptCheckinInput,
    ) -> Result<CheckinOutcome, AttendanceServiceError> {
        let visit = self
            .visits
            .find_for_professional(input.visit_id, input.professional_id)
            .await?
            .ok_or(AttendanceServiceError::VisitNotFound)?;

        let window = checkin_window(
            visit.scheduled_start,
            self.policy.minutes_before_start,
            self.policy.minutes_after_start,
        );
        let is_valid_time = window.contains(input.now);

        // Validity is decided on the float before the integer cast: NaN from
        // malformed coordinates fails `<=` but would cast to 0.
        let distance = distance_meters(visit.lat, visit.lng, input.lat, input.lng).round();
        let is_valid_radius = distance <= f64::from(self.policy.radius_meters);
        let distance_m = distance as i32;

        self.checkins
            .create(&CheckinEvent {
                id: Uuid::new_v4(),
                visit_id: visit.id,
                professional_id: input.professional_id,
                checkin_time: input.now,
                lat: input.lat,
                lng: input.lng,
                distance_m,
                is_valid_time,
                is_valid_radius,
            })
            .await?;

        if is_valid_time && is_valid_radius {
            self.visits.mark_done(visit.id).await?;
        }

        let message = match (is_valid_time, is_valid_radius) {
            (true, true) => "Asistencia registrada correctamente.".to_owned(),
            (false, true) => {
                "La asistencia no puede registrarse: fuera del horario permitido.".to_owned()
            }
            (true, false) => format!(
                "La asistencia no puede registrarse: estás a {}m, fuera del radio permitido ({}m).",
                distance_m, self.policy.radius_meters
            ),
            (false, false) => {
                "La asistencia no puede registrarse: fuera del horario y del radio permitido."
                    .to_owned()
            }
        };

        Ok(CheckinOutcome {
            ok: is_valid_time && is_valid_radius,
            is_valid_time,
            is_valid_radius,
            distance_meters: distance_m,
            message,
        })
    }
}
