use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Review, ServiceRequest};
use crate::error::ApiResult;

/// Persistence capability for service requests
///
/// Reads return plain immutable snapshots; `save_request` is the single
/// commit point of a lifecycle operation and must compare-and-swap on
/// `ServiceRequest::version`, returning `ApiError::Conflict` when the stored
/// version differs from the snapshot being written.
#[async_trait]
pub trait ServiceRequestStore: Send + Sync {
    async fn find_request(&self, id: Uuid) -> ApiResult<Option<ServiceRequest>>;

    async fn insert_request(&self, request: ServiceRequest) -> ApiResult<ServiceRequest>;

    /// Atomic versioned upsert; the returned snapshot carries the bumped version
    async fn save_request(&self, request: &ServiceRequest) -> ApiResult<ServiceRequest>;

    async fn list_requests_for_professional(
        &self,
        professional_id: Uuid,
    ) -> ApiResult<Vec<ServiceRequest>>;
}

/// Persistence capability for reviews
///
/// `insert_review` must enforce the one-review-per-request uniqueness at the
/// storage layer and surface a violation as `ApiError::Conflict`.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn find_review(&self, id: Uuid) -> ApiResult<Option<Review>>;

    async fn find_review_by_request(&self, service_request_id: Uuid)
        -> ApiResult<Option<Review>>;

    async fn insert_review(&self, review: Review) -> ApiResult<Review>;

    async fn update_review(&self, review: &Review) -> ApiResult<Review>;

    async fn list_reviews_for_professional(&self, professional_id: Uuid)
        -> ApiResult<Vec<Review>>;
}

/// Existence checks for the referenced parties of a service request
#[async_trait]
pub trait PartyDirectory: Send + Sync {
    async fn client_exists(&self, id: Uuid) -> ApiResult<bool>;

    async fn professional_exists(&self, id: Uuid) -> ApiResult<bool>;
}
