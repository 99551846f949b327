use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for updating an existing entity
///
/// Implementations for versioned entities must compare-and-swap on the
/// entity's version token and report a stale write as an error.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait Update<DB: Database, T: Identifiable>: Send + Sync {
    /// Update an existing entity
    ///
    /// # Returns
    /// * `Ok(T)` - The committed entity
    /// * `Err` - An error if the entity is absent, stale, or the update
    ///   could not be executed
    async fn update(&self, entity: &T) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
