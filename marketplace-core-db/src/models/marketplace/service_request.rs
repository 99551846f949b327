use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use marketplace_core_api::domain::{ServiceRequest, ServiceStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{bounded, bounded_opt};
use crate::models::identifiable::Identifiable;

/// Database model for a service request
///
/// `version` is the optimistic-concurrency token; every committed save bumps
/// it and a stale write must not be applied.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRequestModel {
    pub id: Uuid,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub title: HeaplessString<200>,
    pub description: Option<HeaplessString<1000>>,
    pub service_address: Option<HeaplessString<200>>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub proposed_value: Option<Decimal>,
    pub status: ServiceStatus,
    pub observations: Option<HeaplessString<1000>>,
    pub verification_code: Option<HeaplessString<10>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub version: i32,
}

impl Identifiable for ServiceRequestModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl From<ServiceRequestModel> for ServiceRequest {
    fn from(model: ServiceRequestModel) -> Self {
        ServiceRequest {
            id: model.id,
            client_id: model.client_id,
            professional_id: model.professional_id,
            title: model.title.to_string(),
            description: model.description.map(|v| v.to_string()),
            service_address: model.service_address.map(|v| v.to_string()),
            scheduled_date: model.scheduled_date,
            proposed_value: model.proposed_value,
            status: model.status,
            observations: model.observations.map(|v| v.to_string()),
            verification_code: model.verification_code.map(|v| v.to_string()),
            completion_date: model.completion_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
            is_active: model.is_active,
            version: model.version,
        }
    }
}

impl TryFrom<&ServiceRequest> for ServiceRequestModel {
    type Error = String;

    fn try_from(snapshot: &ServiceRequest) -> Result<Self, Self::Error> {
        Ok(ServiceRequestModel {
            id: snapshot.id,
            client_id: snapshot.client_id,
            professional_id: snapshot.professional_id,
            title: bounded(&snapshot.title, "title")?,
            description: bounded_opt(snapshot.description.as_deref(), "description")?,
            service_address: bounded_opt(snapshot.service_address.as_deref(), "service_address")?,
            scheduled_date: snapshot.scheduled_date,
            proposed_value: snapshot.proposed_value,
            status: snapshot.status,
            observations: bounded_opt(snapshot.observations.as_deref(), "observations")?,
            verification_code: bounded_opt(
                snapshot.verification_code.as_deref(),
                "verification_code",
            )?,
            completion_date: snapshot.completion_date,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            is_active: snapshot.is_active,
            version: snapshot.version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_through_the_model() {
        let snapshot = ServiceRequest {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            title: "Rewire the garage".to_string(),
            description: None,
            service_address: Some("4 Elm Court".to_string()),
            scheduled_date: None,
            proposed_value: Some(Decimal::new(15000, 2)),
            status: ServiceStatus::Accepted,
            observations: None,
            verification_code: Some("482913".to_string()),
            completion_date: None,
            created_at: Utc::now(),
            updated_at: None,
            is_active: true,
            version: 3,
        };

        let model = ServiceRequestModel::try_from(&snapshot).unwrap();
        let back = ServiceRequest::from(model);
        assert_eq!(back.title, snapshot.title);
        assert_eq!(back.verification_code, snapshot.verification_code);
        assert_eq!(back.status, snapshot.status);
        assert_eq!(back.version, 3);
    }

    #[test]
    fn overlong_title_is_rejected() {
        let snapshot = ServiceRequest {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            title: "x".repeat(201),
            description: None,
            service_address: None,
            scheduled_date: None,
            proposed_value: None,
            status: ServiceStatus::Pending,
            observations: None,
            verification_code: None,
            completion_date: None,
            created_at: Utc::now(),
            updated_at: None,
            is_active: true,
            version: 0,
        };

        assert!(ServiceRequestModel::try_from(&snapshot).is_err());
    }
}
