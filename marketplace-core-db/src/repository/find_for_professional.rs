use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Repository trait for listing entities scoped to one professional
///
/// Both service requests and reviews are keyed by a professional id; the
/// rating aggregates scan these listings.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait FindForProfessional<DB: Database, T: Identifiable>: Send + Sync {
    /// List all entities referencing the given professional
    async fn find_for_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
