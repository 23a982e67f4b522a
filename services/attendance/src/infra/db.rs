use anyhow::Context as _;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use medhome_attendance_schema::{login_codes, users, visit_checkins, visits};

use crate::domain::repository::{
    CheckinEventRepository, LoginCodeRepository, UserRepository, VisitRepository,
};
use crate::domain::types::{CheckinEvent, LoginCode, User, Visit, VisitStatus};
use crate::error::AttendanceServiceError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_active_by_rut(
        &self,
        rut: &str,
    ) -> Result<Option<User>, AttendanceServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Rut.eq(rut))
            .filter(users::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find active user by rut")?;
        Ok(model.map(user_from_model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        rut: model.rut,
        name: model.name,
        email: model.email,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

// ── LoginCode repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLoginCodeRepository {
    pub db: DatabaseConnection,
}

impl LoginCodeRepository for DbLoginCodeRepository {
    async fn create(&self, code: &LoginCode) -> Result<(), AttendanceServiceError> {
        login_codes::ActiveModel {
            id: Set(code.id),
            user_id: Set(code.user_id),
            code_hash: Set(code.code_hash.clone()),
            expires_at: Set(code.expires_at),
            used_at: Set(None),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("create login code")?;
        Ok(())
    }

    async fn find_latest_usable(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LoginCode>, AttendanceServiceError> {
        let model = login_codes::Entity::find()
            .filter(login_codes::Column::UserId.eq(user_id))
            .filter(login_codes::Column::UsedAt.is_null())
            .filter(login_codes::Column::ExpiresAt.gt(now))
            .order_by_desc(login_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest usable login code")?;
        Ok(model.map(login_code_from_model))
    }

    async fn claim(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AttendanceServiceError> {
        // Single conditional UPDATE; the rows_affected check is what makes the
        // claim atomic under concurrent verifications.
        let result = login_codes::Entity::update_many()
            .col_expr(login_codes::Column::UsedAt, Expr::value(Some(now)))
            .filter(login_codes::Column::Id.eq(id))
            .filter(login_codes::Column::UsedAt.is_null())
            .exec(&self.db)
            .await
            .context("claim login code")?;
        Ok(result.rows_affected == 1)
    }
}

fn login_code_from_model(model: login_codes::Model) -> LoginCode {
    LoginCode {
        id: model.id,
        user_id: model.user_id,
        code_hash: model.code_hash,
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}

// ── Visit repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVisitRepository {
    pub db: DatabaseConnection,
}

impl VisitRepository for DbVisitRepository {
    async fn find_for_professional(
        &self,
        visit_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Option<Visit>, AttendanceServiceError> {
        let model = visits::Entity::find_by_id(visit_id)
            .filter(visits::Column::ProfessionalId.eq(professional_id))
            .one(&self.db)
            .await
            .context("find visit for professional")?;
        model.map(visit_from_model).transpose()
    }

    async fn list_by_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Visit>, AttendanceServiceError> {
        let start_of_day = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        let end_of_day = start_of_day + chrono::Duration::days(1);

        let models = visits::Entity::find()
            .filter(visits::Column::ProfessionalId.eq(professional_id))
            .filter(visits::Column::ScheduledStart.gte(start_of_day))
            .filter(visits::Column::ScheduledStart.lt(end_of_day))
            .order_by_asc(visits::Column::ScheduledStart)
            .all(&self.db)
            .await
            .context("list visits by date")?;
        models.into_iter().map(visit_from_model).collect()
    }

    async fn mark_done(&self, visit_id: Uuid) -> Result<(), AttendanceServiceError> {
        visits::ActiveModel {
            id: Set(visit_id),
            status: Set(VisitStatus::Done.as_str().to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark visit done")?;
        Ok(())
    }
}

fn visit_from_model(model: visits::Model) -> Result<Visit, AttendanceServiceError> {
    let status = model
        .status
        .parse::<VisitStatus>()
        .map_err(|e| AttendanceServiceError::Internal(anyhow::anyhow!(e)))?;
    Ok(Visit {
        id: model.id,
        professional_id: model.professional_id,
        patient_name: model.patient_name,
        address: model.address,
        lat: model.lat,
        lng: model.lng,
        scheduled_start: model.scheduled_start,
        scheduled_end: model.scheduled_end,
        status,
    })
}

// ── CheckinEvent repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCheckinEventRepository {
    pub db: DatabaseConnection,
}

impl CheckinEventRepository for DbCheckinEventRepository {
    async fn create(&self, event: &CheckinEvent) -> Result<(), AttendanceServiceError> {
        visit_checkins::ActiveModel {
            id: Set(event.id),
            visit_id: Set(event.visit_id),
            professional_id: Set(event.professional_id),
            checkin_time: Set(event.checkin_time),
            lat: Set(event.lat),
            lng: Set(event.lng),
            distance_m: Set(event.distance_m),
            is_valid_time: Set(event.is_valid_time),
            is_valid_radius: Set(event.is_valid_radius),
        }
        .insert(&self.db)
        .await
        .context("create checkin event")?;
        Ok(())
    }
}
