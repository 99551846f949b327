use sqlx::PgPool;
use std::sync::Arc;

use crate::repository::marketplace::{
    PartyRepositoryImpl, ReviewRepositoryImpl, ServiceRequestRepositoryImpl,
};

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create the marketplace repositories sharing one connection pool
    pub fn create_marketplace_repositories(&self) -> MarketplaceRepositories {
        MarketplaceRepositories {
            service_request_repository: Arc::new(ServiceRequestRepositoryImpl::new(
                self.pool.clone(),
            )),
            review_repository: Arc::new(ReviewRepositoryImpl::new(self.pool.clone())),
            party_repository: Arc::new(PartyRepositoryImpl::new(self.pool.clone())),
        }
    }
}

pub struct MarketplaceRepositories {
    pub service_request_repository: Arc<ServiceRequestRepositoryImpl>,
    pub review_repository: Arc<ReviewRepositoryImpl>,
    pub party_repository: Arc<PartyRepositoryImpl>,
}
