use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a service request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "service_status", rename_all = "PascalCase"))]
pub enum ServiceStatus {
    Pending,
    Accepted,
    Rejected,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    /// Whether no further transitions are modeled from this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ServiceStatus::Rejected | ServiceStatus::Completed | ServiceStatus::Cancelled
        )
    }

    /// Transition legality: Pending -> {Accepted, Rejected};
    /// Accepted -> {InProgress, Cancelled}; InProgress -> {Completed, Cancelled}.
    pub fn can_transition_to(self, target: ServiceStatus) -> bool {
        matches!(
            (self, target),
            (ServiceStatus::Pending, ServiceStatus::Accepted)
                | (ServiceStatus::Pending, ServiceStatus::Rejected)
                | (ServiceStatus::Accepted, ServiceStatus::InProgress)
                | (ServiceStatus::Accepted, ServiceStatus::Cancelled)
                | (ServiceStatus::InProgress, ServiceStatus::Completed)
                | (ServiceStatus::InProgress, ServiceStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceStatus::Pending => write!(f, "Pending"),
            ServiceStatus::Accepted => write!(f, "Accepted"),
            ServiceStatus::Rejected => write!(f, "Rejected"),
            ServiceStatus::InProgress => write!(f, "InProgress"),
            ServiceStatus::Completed => write!(f, "Completed"),
            ServiceStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for ServiceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ServiceStatus::Pending),
            "Accepted" => Ok(ServiceStatus::Accepted),
            "Rejected" => Ok(ServiceStatus::Rejected),
            "InProgress" => Ok(ServiceStatus::InProgress),
            "Completed" => Ok(ServiceStatus::Completed),
            "Cancelled" => Ok(ServiceStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Immutable snapshot of a service request as held by the persistence store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub service_address: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub proposed_value: Option<Decimal>,
    pub status: ServiceStatus,
    pub observations: Option<String>,
    pub verification_code: Option<String>,
    pub completion_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    /// Monotonic optimistic-concurrency token, bumped on every committed save
    pub version: i32,
}

/// Command payload for creating a service request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewServiceRequest {
    pub client_id: Uuid,
    pub professional_id: Uuid,
    #[validate(length(max = 200, message = "title must be at most 200 characters"))]
    pub title: String,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "service address must be at most 200 characters"))]
    pub service_address: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub proposed_value: Option<Decimal>,
    #[validate(length(max = 1000, message = "observations must be at most 1000 characters"))]
    pub observations: Option<String>,
}
