use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use marketplace_core_db::{
    models::marketplace::ReviewModel,
    repository::{
        create::Create, find_by_id::FindById, find_by_service_request::FindByServiceRequest,
        find_for_professional::FindForProfessional, update::Update,
    },
};
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use uuid::Uuid;

use crate::utils::{get_optional_heapless_string, TryFromRow};

const SELECT_COLUMNS: &str = "id, client_id, professional_id, service_request_id, \
     price_rating, quality_rating, speed_rating, communication_rating, \
     professionalism_rating, comment, positive_points, negative_points, \
     created_at, updated_at, is_active";

pub struct ReviewRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl ReviewRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ReviewModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ReviewModel {
            id: row.try_get("id")?,
            client_id: row.try_get("client_id")?,
            professional_id: row.try_get("professional_id")?,
            service_request_id: row.try_get("service_request_id")?,
            price_rating: row.try_get("price_rating")?,
            quality_rating: row.try_get("quality_rating")?,
            speed_rating: row.try_get("speed_rating")?,
            communication_rating: row.try_get("communication_rating")?,
            professionalism_rating: row.try_get("professionalism_rating")?,
            comment: get_optional_heapless_string(row, "comment")?,
            positive_points: get_optional_heapless_string(row, "positive_points")?,
            negative_points: get_optional_heapless_string(row, "negative_points")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

#[async_trait]
impl FindById<Postgres, ReviewModel> for ReviewRepositoryImpl {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ReviewModel>, Box<dyn Error + Send + Sync>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM reviews WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(|r| ReviewModel::try_from_row(&r)).transpose()
    }
}

#[async_trait]
impl FindByServiceRequest<Postgres, ReviewModel> for ReviewRepositoryImpl {
    async fn find_by_service_request(
        &self,
        service_request_id: Uuid,
    ) -> Result<Option<ReviewModel>, Box<dyn Error + Send + Sync>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM reviews WHERE service_request_id = $1");
        let row = sqlx::query(&sql)
            .bind(service_request_id)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(|r| ReviewModel::try_from_row(&r)).transpose()
    }
}

#[async_trait]
impl Create<Postgres, ReviewModel> for ReviewRepositoryImpl {
    async fn create(
        &self,
        entity: &ReviewModel,
    ) -> Result<ReviewModel, Box<dyn Error + Send + Sync>> {
        sqlx::query(
            "INSERT INTO reviews (id, client_id, professional_id, service_request_id, \
                 price_rating, quality_rating, speed_rating, communication_rating, \
                 professionalism_rating, comment, positive_points, negative_points, \
                 created_at, updated_at, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(entity.id)
        .bind(entity.client_id)
        .bind(entity.professional_id)
        .bind(entity.service_request_id)
        .bind(entity.price_rating)
        .bind(entity.quality_rating)
        .bind(entity.speed_rating)
        .bind(entity.communication_rating)
        .bind(entity.professionalism_rating)
        .bind(entity.comment.as_deref())
        .bind(entity.positive_points.as_deref())
        .bind(entity.negative_points.as_deref())
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .bind(entity.is_active)
        .execute(&*self.pool)
        .await?;
        Ok(entity.clone())
    }
}

#[async_trait]
impl Update<Postgres, ReviewModel> for ReviewRepositoryImpl {
    async fn update(
        &self,
        entity: &ReviewModel,
    ) -> Result<ReviewModel, Box<dyn Error + Send + Sync>> {
        let result = sqlx::query(
            "UPDATE reviews SET \
                 price_rating = $1, quality_rating = $2, speed_rating = $3, \
                 communication_rating = $4, professionalism_rating = $5, comment = $6, \
                 positive_points = $7, negative_points = $8, updated_at = $9, is_active = $10 \
             WHERE id = $11",
        )
        .bind(entity.price_rating)
        .bind(entity.quality_rating)
        .bind(entity.speed_rating)
        .bind(entity.communication_rating)
        .bind(entity.professionalism_rating)
        .bind(entity.comment.as_deref())
        .bind(entity.positive_points.as_deref())
        .bind(entity.negative_points.as_deref())
        .bind(entity.updated_at)
        .bind(entity.is_active)
        .bind(entity.id)
        .execute(&*self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err("Entity not found".into());
        }
        Ok(entity.clone())
    }
}

#[async_trait]
impl FindForProfessional<Postgres, ReviewModel> for ReviewRepositoryImpl {
    async fn find_for_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ReviewModel>, Box<dyn Error + Send + Sync>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM reviews WHERE professional_id = $1 \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(professional_id)
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(ReviewModel::try_from_row).collect()
    }
}
