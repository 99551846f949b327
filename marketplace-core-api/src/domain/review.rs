use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// The five review criteria, each scored on a 1..=5 integer scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RatingSet {
    #[validate(range(min = 1, max = 5, message = "price rating must be between 1 and 5"))]
    pub price: i16,
    #[validate(range(min = 1, max = 5, message = "quality rating must be between 1 and 5"))]
    pub quality: i16,
    #[validate(range(min = 1, max = 5, message = "speed rating must be between 1 and 5"))]
    pub speed: i16,
    #[validate(range(min = 1, max = 5, message = "communication rating must be between 1 and 5"))]
    pub communication: i16,
    #[validate(range(min = 1, max = 5, message = "professionalism rating must be between 1 and 5"))]
    pub professionalism: i16,
}

impl RatingSet {
    /// Unweighted mean of the five criteria, derived at read time
    pub fn overall(&self) -> f64 {
        f64::from(
            self.price + self.quality + self.speed + self.communication + self.professionalism,
        ) / 5.0
    }
}

/// Immutable snapshot of a review as held by the persistence store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub service_request_id: Uuid,
    pub ratings: RatingSet,
    pub comment: Option<String>,
    pub positive_points: Option<String>,
    pub negative_points: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Review {
    /// Derived overall rating; never stored
    pub fn overall_rating(&self) -> f64 {
        self.ratings.overall()
    }
}

/// Command payload for creating a review
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReview {
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub service_request_id: Uuid,
    #[validate(nested)]
    pub ratings: RatingSet,
    #[validate(length(max = 1000, message = "comment must be at most 1000 characters"))]
    pub comment: Option<String>,
    #[validate(length(max = 500, message = "positive points must be at most 500 characters"))]
    pub positive_points: Option<String>,
    #[validate(length(max = 500, message = "negative points must be at most 500 characters"))]
    pub negative_points: Option<String>,
}

/// Command payload for updating an existing review; linkage fields are immutable
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewPatch {
    #[validate(nested)]
    pub ratings: RatingSet,
    #[validate(length(max = 1000, message = "comment must be at most 1000 characters"))]
    pub comment: Option<String>,
    #[validate(length(max = 500, message = "positive points must be at most 500 characters"))]
    pub positive_points: Option<String>,
    #[validate(length(max = 500, message = "negative points must be at most 500 characters"))]
    pub negative_points: Option<String>,
}

/// Per-criterion mean ratings for one professional
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingBreakdown {
    pub price: f64,
    pub quality: f64,
    pub speed: f64,
    pub communication: f64,
    pub professionalism: f64,
}

/// On-demand aggregate for a professional's profile view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalRatingSummary {
    pub professional_id: Uuid,
    pub average_rating: f64,
    pub total_reviews: usize,
    pub breakdown: RatingBreakdown,
    pub services_completed: usize,
    pub services_pending: usize,
    /// Up to five most recent reviews, newest first
    pub recent_reviews: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_is_the_unweighted_mean() {
        let ratings = RatingSet {
            price: 5,
            quality: 4,
            speed: 3,
            communication: 2,
            professionalism: 1,
        };
        assert_eq!(ratings.overall(), 3.0);
    }

    #[test]
    fn overall_keeps_fractional_precision() {
        let ratings = RatingSet {
            price: 5,
            quality: 5,
            speed: 5,
            communication: 5,
            professionalism: 4,
        };
        assert_eq!(ratings.overall(), 4.8);
    }

    #[test]
    fn out_of_range_rating_fails_validation() {
        use validator::Validate;

        let ratings = RatingSet {
            price: 3,
            quality: 6,
            speed: 3,
            communication: 3,
            professionalism: 3,
        };
        assert!(ratings.validate().is_err());
    }
}
