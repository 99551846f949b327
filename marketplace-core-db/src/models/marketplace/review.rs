use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use marketplace_core_api::domain::{RatingSet, Review};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::bounded_opt;
use crate::models::identifiable::Identifiable;

/// Database model for a review
///
/// The overall rating is never stored; it is derived from the five criterion
/// columns at read time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewModel {
    pub id: Uuid,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub service_request_id: Uuid,
    pub price_rating: i16,
    pub quality_rating: i16,
    pub speed_rating: i16,
    pub communication_rating: i16,
    pub professionalism_rating: i16,
    pub comment: Option<HeaplessString<1000>>,
    pub positive_points: Option<HeaplessString<500>>,
    pub negative_points: Option<HeaplessString<500>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Identifiable for ReviewModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review {
            id: model.id,
            client_id: model.client_id,
            professional_id: model.professional_id,
            service_request_id: model.service_request_id,
            ratings: RatingSet {
                price: model.price_rating,
                quality: model.quality_rating,
                speed: model.speed_rating,
                communication: model.communication_rating,
                professionalism: model.professionalism_rating,
            },
            comment: model.comment.map(|v| v.to_string()),
            positive_points: model.positive_points.map(|v| v.to_string()),
            negative_points: model.negative_points.map(|v| v.to_string()),
            created_at: model.created_at,
            updated_at: model.updated_at,
            is_active: model.is_active,
        }
    }
}

impl TryFrom<&Review> for ReviewModel {
    type Error = String;

    fn try_from(snapshot: &Review) -> Result<Self, Self::Error> {
        Ok(ReviewModel {
            id: snapshot.id,
            client_id: snapshot.client_id,
            professional_id: snapshot.professional_id,
            service_request_id: snapshot.service_request_id,
            price_rating: snapshot.ratings.price,
            quality_rating: snapshot.ratings.quality,
            speed_rating: snapshot.ratings.speed,
            communication_rating: snapshot.ratings.communication,
            professionalism_rating: snapshot.ratings.professionalism,
            comment: bounded_opt(snapshot.comment.as_deref(), "comment")?,
            positive_points: bounded_opt(snapshot.positive_points.as_deref(), "positive_points")?,
            negative_points: bounded_opt(snapshot.negative_points.as_deref(), "negative_points")?,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            is_active: snapshot.is_active,
        })
    }
}
