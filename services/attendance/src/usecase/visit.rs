use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::repository::VisitRepository;
use crate::domain::types::Visit;
use crate::error::AttendanceServiceError;

pub struct ListVisitsUseCase<V: VisitRepository> {
    pub visits: V,
}

impl<V: VisitRepository> ListVisitsUseCase<V> {
    /// Agenda for one professional on one (UTC) day, ordered by scheduled start.
    pub async fn execute(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Visit>, AttendanceServiceError> {
        self.visits.list_by_date(professional_id, date).await
    }
}
