use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use marketplace_core_db::{
    models::marketplace::ServiceRequestModel,
    repository::{
        create::Create, find_by_id::FindById, find_for_professional::FindForProfessional,
        load::Load, update::Update,
    },
};
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use uuid::Uuid;

use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};

const SELECT_COLUMNS: &str = "id, client_id, professional_id, title, description, \
     service_address, scheduled_date, proposed_value, status, observations, \
     verification_code, completion_date, created_at, updated_at, is_active, version";

pub struct ServiceRequestRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl ServiceRequestRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Versioned update; returns `None` when the stored version no longer
    /// matches the snapshot being written (or the row is gone).
    pub async fn update_checked(
        &self,
        entity: &ServiceRequestModel,
    ) -> Result<Option<ServiceRequestModel>, Box<dyn Error + Send + Sync>> {
        let sql = format!(
            "UPDATE service_requests SET \
                 title = $1, description = $2, service_address = $3, scheduled_date = $4, \
                 proposed_value = $5, status = $6, observations = $7, verification_code = $8, \
                 completion_date = $9, updated_at = $10, is_active = $11, version = version + 1 \
             WHERE id = $12 AND version = $13 \
             RETURNING {SELECT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(entity.title.as_str())
            .bind(entity.description.as_deref())
            .bind(entity.service_address.as_deref())
            .bind(entity.scheduled_date)
            .bind(entity.proposed_value)
            .bind(entity.status)
            .bind(entity.observations.as_deref())
            .bind(entity.verification_code.as_deref())
            .bind(entity.completion_date)
            .bind(entity.updated_at)
            .bind(entity.is_active)
            .bind(entity.id)
            .bind(entity.version)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(|r| ServiceRequestModel::try_from_row(&r)).transpose()
    }
}

impl TryFromRow<PgRow> for ServiceRequestModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ServiceRequestModel {
            id: row.try_get("id")?,
            client_id: row.try_get("client_id")?,
            professional_id: row.try_get("professional_id")?,
            title: get_heapless_string(row, "title")?,
            description: get_optional_heapless_string(row, "description")?,
            service_address: get_optional_heapless_string(row, "service_address")?,
            scheduled_date: row.try_get("scheduled_date")?,
            proposed_value: row.try_get("proposed_value")?,
            status: row.try_get("status")?,
            observations: get_optional_heapless_string(row, "observations")?,
            verification_code: get_optional_heapless_string(row, "verification_code")?,
            completion_date: row.try_get("completion_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            is_active: row.try_get("is_active")?,
            version: row.try_get("version")?,
        })
    }
}

#[async_trait]
impl FindById<Postgres, ServiceRequestModel> for ServiceRequestRepositoryImpl {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ServiceRequestModel>, Box<dyn Error + Send + Sync>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM service_requests WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(|r| ServiceRequestModel::try_from_row(&r)).transpose()
    }
}

#[async_trait]
impl Load<Postgres, ServiceRequestModel> for ServiceRequestRepositoryImpl {
    async fn load(
        &self,
        id: Uuid,
    ) -> Result<ServiceRequestModel, Box<dyn Error + Send + Sync>> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| "Entity not found".into())
    }
}

#[async_trait]
impl Create<Postgres, ServiceRequestModel> for ServiceRequestRepositoryImpl {
    async fn create(
        &self,
        entity: &ServiceRequestModel,
    ) -> Result<ServiceRequestModel, Box<dyn Error + Send + Sync>> {
        sqlx::query(
            "INSERT INTO service_requests (id, client_id, professional_id, title, description, \
                 service_address, scheduled_date, proposed_value, status, observations, \
                 verification_code, completion_date, created_at, updated_at, is_active, version) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
        )
        .bind(entity.id)
        .bind(entity.client_id)
        .bind(entity.professional_id)
        .bind(entity.title.as_str())
        .bind(entity.description.as_deref())
        .bind(entity.service_address.as_deref())
        .bind(entity.scheduled_date)
        .bind(entity.proposed_value)
        .bind(entity.status)
        .bind(entity.observations.as_deref())
        .bind(entity.verification_code.as_deref())
        .bind(entity.completion_date)
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .bind(entity.is_active)
        .bind(entity.version)
        .execute(&*self.pool)
        .await?;
        Ok(entity.clone())
    }
}

#[async_trait]
impl Update<Postgres, ServiceRequestModel> for ServiceRequestRepositoryImpl {
    async fn update(
        &self,
        entity: &ServiceRequestModel,
    ) -> Result<ServiceRequestModel, Box<dyn Error + Send + Sync>> {
        self.update_checked(entity)
            .await?
            .ok_or_else(|| "Stale or missing service request".into())
    }
}

#[async_trait]
impl FindForProfessional<Postgres, ServiceRequestModel> for ServiceRequestRepositoryImpl {
    async fn find_for_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ServiceRequestModel>, Box<dyn Error + Send + Sync>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM service_requests WHERE professional_id = $1 \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(professional_id)
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(ServiceRequestModel::try_from_row).collect()
    }
}
