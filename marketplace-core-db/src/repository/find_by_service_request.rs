use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Repository trait for resolving the entity bound to one service request
///
/// At most one review may ever bind to a given request, so the lookup is an
/// Option rather than a listing.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait FindByServiceRequest<DB: Database, T: Identifiable>: Send + Sync {
    /// Find the entity bound to the given service request, if any
    async fn find_by_service_request(
        &self,
        service_request_id: Uuid,
    ) -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>;
}
