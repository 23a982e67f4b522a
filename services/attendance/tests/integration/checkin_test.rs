use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use medhome_attendance::domain::types::{CheckinPolicy, Visit, VisitStatus};
use medhome_attendance::error::AttendanceServiceError;
use medhome_attendance::usecase::checkin::{AttemptCheckinInput, AttemptCheckinUseCase};

use crate::helpers::{MockCheckinEventRepo, MockVisitRepo, test_visit};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Latitude shifted north by `meters` along a meridian. With longitude held
/// fixed the haversine distance equals the arc length exactly.
fn lat_north(lat: f64, meters: f64) -> f64 {
    lat + (meters / EARTH_RADIUS_M).to_degrees()
}

fn scheduled_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 28, 15, 0, 0).unwrap()
}

struct Harness {
    usecase: AttemptCheckinUseCase<MockVisitRepo, MockCheckinEventRepo>,
    visit: Visit,
    visits: std::sync::Arc<std::sync::Mutex<Vec<Visit>>>,
    events: std::sync::Arc<
        std::sync::Mutex<Vec<medhome_attendance::domain::types::CheckinEvent>>,
    >,
}

fn harness() -> Harness {
    let professional_id = Uuid::new_v4();
    let visit = test_visit(professional_id, scheduled_start());
    let visit_repo = MockVisitRepo::new(vec![visit.clone()]);
    let event_repo = MockCheckinEventRepo::new();
    let visits = visit_repo.visits_handle();
    let events = event_repo.events_handle();

    Harness {
        usecase: AttemptCheckinUseCase {
            visits: visit_repo,
            checkins: event_repo,
            policy: CheckinPolicy::default(),
        },
        visit,
        visits,
        events,
    }
}

fn input_at(h: &Harness, lat: f64, lng: f64, now: DateTime<Utc>) -> AttemptCheckinInput {
    AttemptCheckinInput {
        visit_id: h.visit.id,
        professional_id: h.visit.professional_id,
        lat,
        lng,
        now,
    }
}

// ── Happy path ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_attendance_at_visit_location_on_time() {
    let h = harness();

    let outcome = h
        .usecase
        .execute(input_at(&h, h.visit.lat, h.visit.lng, scheduled_start()))
        .await
        .unwrap();

    assert!(outcome.ok);
    assert!(outcome.is_valid_time);
    assert!(outcome.is_valid_radius);
    assert_eq!(outcome.distance_meters, 0);
    assert_eq!(outcome.message, "Asistencia registrada correctamente.");

    assert_eq!(h.visits.lock().unwrap()[0].status, VisitStatus::Done);

    let events = h.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_valid_time);
    assert!(events[0].is_valid_radius);
    assert_eq!(events[0].visit_id, h.visit.id);
}

// ── Radius validation ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_checkin_outside_radius() {
    let h = harness();
    let far_lat = lat_north(h.visit.lat, 300.0);

    let outcome = h
        .usecase
        .execute(input_at(&h, far_lat, h.visit.lng, scheduled_start()))
        .await
        .unwrap();

    assert!(!outcome.ok);
    assert!(outcome.is_valid_time);
    assert!(!outcome.is_valid_radius);
    assert_eq!(outcome.distance_meters, 300);
    assert_eq!(
        outcome.message,
        "La asistencia no puede registrarse: estás a 300m, fuera del radio permitido (150m)."
    );

    // The visit stays pending but the attempt is still audited.
    assert_eq!(h.visits.lock().unwrap()[0].status, VisitStatus::Pending);
    let events = h.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(!events[0].is_valid_radius);
}

#[tokio::test]
async fn should_accept_checkin_at_exact_radius_boundary() {
    let h = harness();
    let edge_lat = lat_north(h.visit.lat, 150.0);

    let outcome = h
        .usecase
        .execute(input_at(&h, edge_lat, h.visit.lng, scheduled_start()))
        .await
        .unwrap();

    // 150m is inside: the threshold is inclusive.
    assert!(outcome.ok);
    assert_eq!(outcome.distance_meters, 150);
}

#[tokio::test]
async fn should_fail_radius_check_for_nan_coordinates() {
    let h = harness();

    let outcome = h
        .usecase
        .execute(input_at(&h, f64::NAN, h.visit.lng, scheduled_start()))
        .await
        .unwrap();

    // NaN distance is never within the radius, whatever the integer cast says.
    assert!(!outcome.ok);
    assert!(!outcome.is_valid_radius);
}

// ── Time-window validation ───────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_checkin_outside_time_window() {
    let h = harness();
    let late = scheduled_start() + Duration::minutes(25);

    let outcome = h
        .usecase
        .execute(input_at(&h, h.visit.lat, h.visit.lng, late))
        .await
        .unwrap();

    assert!(!outcome.ok);
    assert!(!outcome.is_valid_time);
    assert!(outcome.is_valid_radius);
    assert_eq!(
        outcome.message,
        "La asistencia no puede registrarse: fuera del horario permitido."
    );
    assert_eq!(h.visits.lock().unwrap()[0].status, VisitStatus::Pending);
}

#[tokio::test]
async fn should_accept_checkin_at_window_edges() {
    let h = harness();
    let earliest = scheduled_start() - Duration::minutes(10);
    let latest = scheduled_start() + Duration::minutes(20);

    for now in [earliest, latest] {
        let outcome = h
            .usecase
            .execute(input_at(&h, h.visit.lat, h.visit.lng, now))
            .await
            .unwrap();
        assert!(outcome.ok, "edge instant {now} should be inside the window");
    }
}

#[tokio::test]
async fn should_report_both_failures_in_one_message() {
    let h = harness();
    let far_lat = lat_north(h.visit.lat, 500.0);
    let late = scheduled_start() + Duration::hours(2);

    let outcome = h
        .usecase
        .execute(input_at(&h, far_lat, h.visit.lng, late))
        .await
        .unwrap();

    assert!(!outcome.ok);
    assert!(!outcome.is_valid_time);
    assert!(!outcome.is_valid_radius);
    assert_eq!(
        outcome.message,
        "La asistencia no puede registrarse: fuera del horario y del radio permitido."
    );

    // Invalid attempts are audited too.
    assert_eq!(h.events.lock().unwrap().len(), 1);
}

// ── Ownership and repeats ────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_for_unknown_visit() {
    let h = harness();
    let mut input = input_at(&h, h.visit.lat, h.visit.lng, scheduled_start());
    input.visit_id = Uuid::new_v4();

    let result = h.usecase.execute(input).await;

    assert!(matches!(result, Err(AttendanceServiceError::VisitNotFound)));
    assert!(h.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_other_professionals_visit() {
    let h = harness();
    let mut input = input_at(&h, h.visit.lat, h.visit.lng, scheduled_start());
    input.professional_id = Uuid::new_v4();

    let result = h.usecase.execute(input).await;

    assert!(matches!(result, Err(AttendanceServiceError::VisitNotFound)));
}

#[tokio::test]
async fn should_allow_repeat_checkin_on_done_visit() {
    let h = harness();
    let input = || input_at(&h, h.visit.lat, h.visit.lng, scheduled_start());

    let first = h.usecase.execute(input()).await.unwrap();
    assert!(first.ok);

    let second = h.usecase.execute(input()).await.unwrap();
    assert!(second.ok);

    assert_eq!(h.visits.lock().unwrap()[0].status, VisitStatus::Done);
    assert_eq!(h.events.lock().unwrap().len(), 2);
}
