use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for inserting a new entity
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait Create<DB: Database, T: Identifiable>: Send + Sync {
    /// Insert a new entity
    ///
    /// # Returns
    /// * `Ok(T)` - The committed entity
    /// * `Err` - An error if the insert could not be executed (including
    ///   storage-layer uniqueness violations)
    async fn create(&self, entity: &T) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
