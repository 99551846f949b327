use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use marketplace_core_db::{
    models::marketplace::{ClientModel, ProfessionalModel},
    repository::exists_by_id::ExistsById,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Existence checks over the two party tables; the core never mutates
/// clients or professionals.
pub struct PartyRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl PartyRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExistsById<Postgres, ClientModel> for PartyRepositoryImpl {
    async fn exists_by_id(&self, id: Uuid) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1)")
            .bind(id)
            .fetch_one(&*self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl ExistsById<Postgres, ProfessionalModel> for PartyRepositoryImpl {
    async fn exists_by_id(&self, id: Uuid) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM professionals WHERE id = $1)")
                .bind(id)
                .fetch_one(&*self.pool)
                .await?;
        Ok(exists)
    }
}
