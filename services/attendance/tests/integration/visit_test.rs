use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use medhome_attendance::usecase::visit::ListVisitsUseCase;

use crate::helpers::{MockVisitRepo, test_visit};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn should_list_only_the_professionals_own_visits() {
    let professional_id = Uuid::new_v4();
    let other_professional = Uuid::new_v4();
    let at = Utc.with_ymd_and_hms(2026, 8, 28, 10, 0, 0).unwrap();

    let mine = test_visit(professional_id, at);
    let theirs = test_visit(other_professional, at);
    let usecase = ListVisitsUseCase {
        visits: MockVisitRepo::new(vec![mine.clone(), theirs]),
    };

    let visits = usecase
        .execute(professional_id, day(2026, 8, 28))
        .await
        .unwrap();

    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].id, mine.id);
}

#[tokio::test]
async fn should_bound_the_day_in_utc() {
    let professional_id = Uuid::new_v4();
    let late = test_visit(
        professional_id,
        Utc.with_ymd_and_hms(2026, 8, 28, 23, 59, 0).unwrap(),
    );
    let next_midnight = test_visit(
        professional_id,
        Utc.with_ymd_and_hms(2026, 8, 29, 0, 0, 0).unwrap(),
    );
    let usecase = ListVisitsUseCase {
        visits: MockVisitRepo::new(vec![late.clone(), next_midnight.clone()]),
    };

    let on_the_28th = usecase
        .execute(professional_id, day(2026, 8, 28))
        .await
        .unwrap();
    assert_eq!(on_the_28th.len(), 1);
    assert_eq!(on_the_28th[0].id, late.id);

    // Midnight belongs to the following day.
    let on_the_29th = usecase
        .execute(professional_id, day(2026, 8, 29))
        .await
        .unwrap();
    assert_eq!(on_the_29th.len(), 1);
    assert_eq!(on_the_29th[0].id, next_midnight.id);
}

#[tokio::test]
async fn should_order_by_scheduled_start() {
    let professional_id = Uuid::new_v4();
    let noon = Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap();

    let afternoon = test_visit(professional_id, noon + Duration::hours(3));
    let morning = test_visit(professional_id, noon - Duration::hours(3));
    let midday = test_visit(professional_id, noon);
    let usecase = ListVisitsUseCase {
        visits: MockVisitRepo::new(vec![afternoon.clone(), morning.clone(), midday.clone()]),
    };

    let visits = usecase
        .execute(professional_id, day(2026, 8, 28))
        .await
        .unwrap();

    let ids: Vec<Uuid> = visits.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![morning.id, midday.id, afternoon.id]);
}

#[tokio::test]
async fn should_return_empty_agenda_for_a_free_day() {
    let professional_id = Uuid::new_v4();
    let visit = test_visit(
        professional_id,
        Utc.with_ymd_and_hms(2026, 8, 28, 10, 0, 0).unwrap(),
    );
    let usecase = ListVisitsUseCase {
        visits: MockVisitRepo::new(vec![visit]),
    };

    let visits = usecase
        .execute(professional_id, day(2026, 8, 29))
        .await
        .unwrap();
    assert!(visits.is_empty());
}
