use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    NewReview, ProfessionalRatingSummary, RatingBreakdown, Review, ReviewPatch, ServiceStatus,
};
use crate::error::{ApiError, ApiResult};
use crate::service::stores::{ReviewStore, ServiceRequestStore};

/// Number of reviews surfaced on a professional's profile
const RECENT_REVIEW_LIMIT: usize = 5;

/// Multi-criteria review scoring and per-professional aggregate statistics.
///
/// All aggregation is a linear scan over the professional's reviews and
/// requests, recomputed on demand; there is no cached running state to keep
/// consistent.
pub struct RatingAggregator<R, S>
where
    R: ReviewStore,
    S: ServiceRequestStore,
{
    reviews: R,
    requests: S,
}

impl<R, S> RatingAggregator<R, S>
where
    R: ReviewStore,
    S: ServiceRequestStore,
{
    pub fn new(reviews: R, requests: S) -> Self {
        Self { reviews, requests }
    }

    /// Creates the single review allowed for a completed service request
    pub async fn create_review(&self, new_review: NewReview) -> ApiResult<Review> {
        new_review
            .validate()
            .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;

        let request = self
            .requests
            .find_request(new_review.service_request_id)
            .await?
            .ok_or_else(|| {
                ApiError::ReferenceNotFound(format!(
                    "service request {}",
                    new_review.service_request_id
                ))
            })?;

        if request.status != ServiceStatus::Completed {
            return Err(ApiError::InvalidState(format!(
                "service request {} is {} and can only be reviewed once completed",
                request.id, request.status
            )));
        }

        if self
            .reviews
            .find_review_by_request(new_review.service_request_id)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(format!(
                "a review already exists for service request {}",
                new_review.service_request_id
            )));
        }

        let review = Review {
            id: Uuid::new_v4(),
            client_id: new_review.client_id,
            professional_id: new_review.professional_id,
            service_request_id: new_review.service_request_id,
            ratings: new_review.ratings,
            comment: new_review.comment,
            positive_points: new_review.positive_points,
            negative_points: new_review.negative_points,
            created_at: Utc::now(),
            updated_at: None,
            is_active: true,
        };

        let created = self.reviews.insert_review(review).await?;
        info!(review_id = %created.id, request_id = %created.service_request_id, "review created");
        Ok(created)
    }

    /// Replaces a review's rating and text fields; linkage is immutable
    pub async fn update_review(&self, id: Uuid, patch: ReviewPatch) -> ApiResult<Review> {
        patch
            .validate()
            .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;

        let mut review = self
            .reviews
            .find_review(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("review {id}")))?;

        review.ratings = patch.ratings;
        review.comment = patch.comment;
        review.positive_points = patch.positive_points;
        review.negative_points = patch.negative_points;
        review.updated_at = Some(Utc::now());

        let updated = self.reviews.update_review(&review).await?;
        info!(review_id = %updated.id, "review updated");
        Ok(updated)
    }

    pub async fn review_for_request(&self, service_request_id: Uuid) -> ApiResult<Option<Review>> {
        self.reviews.find_review_by_request(service_request_id).await
    }

    /// Mean of derived overall ratings; `0.0` with no reviews, never an error
    pub async fn average_rating(&self, professional_id: Uuid) -> ApiResult<f64> {
        let reviews = self
            .reviews
            .list_reviews_for_professional(professional_id)
            .await?;
        if reviews.is_empty() {
            return Ok(0.0);
        }
        let total: f64 = reviews.iter().map(Review::overall_rating).sum();
        Ok(total / reviews.len() as f64)
    }

    /// Per-criterion means; an all-zero breakdown with no reviews
    pub async fn rating_breakdown(&self, professional_id: Uuid) -> ApiResult<RatingBreakdown> {
        let reviews = self
            .reviews
            .list_reviews_for_professional(professional_id)
            .await?;
        Ok(Self::breakdown_of(&reviews))
    }

    /// Aggregate read model for a professional's profile view
    pub async fn detail_summary(
        &self,
        professional_id: Uuid,
    ) -> ApiResult<ProfessionalRatingSummary> {
        let reviews = self
            .reviews
            .list_reviews_for_professional(professional_id)
            .await?;
        let requests = self
            .requests
            .list_requests_for_professional(professional_id)
            .await?;

        let services_completed = requests
            .iter()
            .filter(|r| r.status == ServiceStatus::Completed)
            .count();
        let services_pending = requests
            .iter()
            .filter(|r| {
                matches!(
                    r.status,
                    ServiceStatus::Pending | ServiceStatus::Accepted | ServiceStatus::InProgress
                )
            })
            .count();

        let average_rating = if reviews.is_empty() {
            0.0
        } else {
            reviews.iter().map(Review::overall_rating).sum::<f64>() / reviews.len() as f64
        };
        let breakdown = Self::breakdown_of(&reviews);

        let mut recent_reviews = reviews.clone();
        recent_reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_reviews.truncate(RECENT_REVIEW_LIMIT);

        Ok(ProfessionalRatingSummary {
            professional_id,
            average_rating,
            total_reviews: reviews.len(),
            breakdown,
            services_completed,
            services_pending,
            recent_reviews,
        })
    }

    fn breakdown_of(reviews: &[Review]) -> RatingBreakdown {
        if reviews.is_empty() {
            return RatingBreakdown::default();
        }
        let count = reviews.len() as f64;
        let mean = |select: fn(&Review) -> i16| {
            reviews.iter().map(|r| f64::from(select(r))).sum::<f64>() / count
        };
        RatingBreakdown {
            price: mean(|r| r.ratings.price),
            quality: mean(|r| r.ratings.quality),
            speed: mean(|r| r.ratings.speed),
            communication: mean(|r| r.ratings.communication),
            professionalism: mean(|r| r.ratings.professionalism),
        }
    }
}
