use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use marketplace_core_api::domain::{Review, ServiceRequest};
use marketplace_core_api::error::{ApiError, ApiResult};
use marketplace_core_api::service::stores::{PartyDirectory, ReviewStore, ServiceRequestStore};
use marketplace_core_db::models::marketplace::{
    ClientModel, ProfessionalModel, ReviewModel, ServiceRequestModel,
};
use marketplace_core_db::repository::{
    create::Create, exists_by_id::ExistsById, find_by_id::FindById,
    find_by_service_request::FindByServiceRequest, find_for_professional::FindForProfessional,
    update::Update,
};
use sqlx::Postgres;
use uuid::Uuid;

use crate::repository::marketplace::{
    PartyRepositoryImpl, ReviewRepositoryImpl, ServiceRequestRepositoryImpl,
};

/// Maps a repository-layer failure into the api taxonomy, recognizing the
/// storage-enforced constraints (unique key, foreign key) by SQLSTATE.
fn map_db_error(err: Box<dyn Error + Send + Sync>) -> ApiError {
    if let Some(sqlx::Error::Database(db_err)) = err.downcast_ref::<sqlx::Error>() {
        match db_err.code().as_deref() {
            Some("23505") => return ApiError::Conflict(db_err.to_string()),
            Some("23503") => return ApiError::ReferenceNotFound(db_err.to_string()),
            _ => {}
        }
    }
    ApiError::DatabaseError(err.to_string())
}

/// [`ServiceRequestStore`] backed by the Postgres repository
pub struct PostgresServiceRequestStore {
    repo: Arc<ServiceRequestRepositoryImpl>,
}

impl PostgresServiceRequestStore {
    pub fn new(repo: Arc<ServiceRequestRepositoryImpl>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ServiceRequestStore for PostgresServiceRequestStore {
    async fn find_request(&self, id: Uuid) -> ApiResult<Option<ServiceRequest>> {
        let model = self.repo.find_by_id(id).await.map_err(map_db_error)?;
        Ok(model.map(ServiceRequest::from))
    }

    async fn insert_request(&self, request: ServiceRequest) -> ApiResult<ServiceRequest> {
        let model =
            ServiceRequestModel::try_from(&request).map_err(ApiError::InvalidArgument)?;
        let created = self.repo.create(&model).await.map_err(map_db_error)?;
        Ok(created.into())
    }

    async fn save_request(&self, request: &ServiceRequest) -> ApiResult<ServiceRequest> {
        let model = ServiceRequestModel::try_from(request).map_err(ApiError::InvalidArgument)?;
        match self.repo.update_checked(&model).await.map_err(map_db_error)? {
            Some(saved) => Ok(saved.into()),
            None => {
                // Absent row and stale version both miss the CAS predicate.
                if self
                    .repo
                    .find_by_id(request.id)
                    .await
                    .map_err(map_db_error)?
                    .is_none()
                {
                    Err(ApiError::NotFound(format!("service request {}", request.id)))
                } else {
                    Err(ApiError::Conflict(format!(
                        "service request {} was modified concurrently",
                        request.id
                    )))
                }
            }
        }
    }

    async fn list_requests_for_professional(
        &self,
        professional_id: Uuid,
    ) -> ApiResult<Vec<ServiceRequest>> {
        let models = self
            .repo
            .find_for_professional(professional_id)
            .await
            .map_err(map_db_error)?;
        Ok(models.into_iter().map(ServiceRequest::from).collect())
    }
}

/// [`ReviewStore`] backed by the Postgres repository
pub struct PostgresReviewStore {
    repo: Arc<ReviewRepositoryImpl>,
}

impl PostgresReviewStore {
    pub fn new(repo: Arc<ReviewRepositoryImpl>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ReviewStore for PostgresReviewStore {
    async fn find_review(&self, id: Uuid) -> ApiResult<Option<Review>> {
        let model = self.repo.find_by_id(id).await.map_err(map_db_error)?;
        Ok(model.map(Review::from))
    }

    async fn find_review_by_request(
        &self,
        service_request_id: Uuid,
    ) -> ApiResult<Option<Review>> {
        let model = self
            .repo
            .find_by_service_request(service_request_id)
            .await
            .map_err(map_db_error)?;
        Ok(model.map(Review::from))
    }

    async fn insert_review(&self, review: Review) -> ApiResult<Review> {
        let model = ReviewModel::try_from(&review).map_err(ApiError::InvalidArgument)?;
        let created = self.repo.create(&model).await.map_err(map_db_error)?;
        Ok(created.into())
    }

    async fn update_review(&self, review: &Review) -> ApiResult<Review> {
        let model = ReviewModel::try_from(review).map_err(ApiError::InvalidArgument)?;
        let updated = self.repo.update(&model).await.map_err(map_db_error)?;
        Ok(updated.into())
    }

    async fn list_reviews_for_professional(
        &self,
        professional_id: Uuid,
    ) -> ApiResult<Vec<Review>> {
        let models = self
            .repo
            .find_for_professional(professional_id)
            .await
            .map_err(map_db_error)?;
        Ok(models.into_iter().map(Review::from).collect())
    }
}

/// [`PartyDirectory`] backed by the Postgres party tables
pub struct PostgresPartyDirectory {
    repo: Arc<PartyRepositoryImpl>,
}

impl PostgresPartyDirectory {
    pub fn new(repo: Arc<PartyRepositoryImpl>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl PartyDirectory for PostgresPartyDirectory {
    async fn client_exists(&self, id: Uuid) -> ApiResult<bool> {
        <PartyRepositoryImpl as ExistsById<Postgres, ClientModel>>::exists_by_id(&self.repo, id)
            .await
            .map_err(map_db_error)
    }

    async fn professional_exists(&self, id: Uuid) -> ApiResult<bool> {
        <PartyRepositoryImpl as ExistsById<Postgres, ProfessionalModel>>::exists_by_id(
            &self.repo, id,
        )
        .await
        .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::setup_test_context;
    use marketplace_core_api::domain::{NewReview, NewServiceRequest, RatingSet, ServiceStatus};
    use marketplace_core_api::service::rating::RatingAggregator;
    use marketplace_core_api::service::request_lifecycle::RequestLifecycle;
    use marketplace_core_api::service::verification_code::RandomCodeSource;
    use serial_test::serial;

    fn new_request(client_id: Uuid, professional_id: Uuid) -> NewServiceRequest {
        NewServiceRequest {
            client_id,
            professional_id,
            title: "Repaint the hallway".to_string(),
            description: None,
            service_address: Some("77 Main Street".to_string()),
            scheduled_date: None,
            proposed_value: None,
            observations: None,
        }
    }

    // Requires a reachable DATABASE_URL; run with `cargo test -- --ignored`.
    #[tokio::test]
    #[serial]
    #[ignore]
    async fn full_lifecycle_round_trips_through_postgres() {
        let ctx = setup_test_context().await.unwrap();
        let client_id = ctx.seed_client().await.unwrap();
        let professional_id = ctx.seed_professional().await.unwrap();

        let lifecycle = RequestLifecycle::new(
            ctx.service_request_store(),
            ctx.party_directory(),
            RandomCodeSource,
        );

        let request = lifecycle
            .create(new_request(client_id, professional_id))
            .await
            .unwrap();
        assert_eq!(request.status, ServiceStatus::Pending);

        let accepted = lifecycle
            .update_status(request.id, ServiceStatus::Accepted, None)
            .await
            .unwrap();
        let code = accepted.verification_code.clone().unwrap();

        lifecycle
            .update_status(request.id, ServiceStatus::InProgress, None)
            .await
            .unwrap();
        let completed = lifecycle
            .update_status(request.id, ServiceStatus::Completed, Some(&code))
            .await
            .unwrap();
        assert_eq!(completed.status, ServiceStatus::Completed);
        assert!(completed.completion_date.is_some());

        let aggregator =
            RatingAggregator::new(ctx.review_store(), ctx.service_request_store());
        let review = aggregator
            .create_review(NewReview {
                client_id,
                professional_id,
                service_request_id: request.id,
                ratings: RatingSet {
                    price: 5,
                    quality: 4,
                    speed: 3,
                    communication: 2,
                    professionalism: 1,
                },
                comment: Some("Done on schedule".to_string()),
                positive_points: None,
                negative_points: None,
            })
            .await
            .unwrap();
        assert_eq!(review.overall_rating(), 3.0);

        let err = aggregator
            .create_review(NewReview {
                client_id,
                professional_id,
                service_request_id: request.id,
                ratings: RatingSet {
                    price: 5,
                    quality: 5,
                    speed: 5,
                    communication: 5,
                    professionalism: 5,
                },
                comment: None,
                positive_points: None,
                negative_points: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let summary = aggregator.detail_summary(professional_id).await.unwrap();
        assert_eq!(summary.total_reviews, 1);
        assert_eq!(summary.services_completed, 1);
    }

    // Requires a reachable DATABASE_URL; run with `cargo test -- --ignored`.
    #[tokio::test]
    #[serial]
    #[ignore]
    async fn stale_version_saves_conflict() {
        let ctx = setup_test_context().await.unwrap();
        let client_id = ctx.seed_client().await.unwrap();
        let professional_id = ctx.seed_professional().await.unwrap();

        let store = ctx.service_request_store();
        let lifecycle = RequestLifecycle::new(
            ctx.service_request_store(),
            ctx.party_directory(),
            RandomCodeSource,
        );

        let request = lifecycle
            .create(new_request(client_id, professional_id))
            .await
            .unwrap();

        let stale = store.find_request(request.id).await.unwrap().unwrap();
        let mut competing = stale.clone();
        competing.status = ServiceStatus::Accepted;
        store.save_request(&competing).await.unwrap();

        let err = store.save_request(&stale).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }
}
