use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Database model for a client (the requesting party)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientModel {
    pub id: Uuid,
    pub name: HeaplessString<100>,
    pub email: HeaplessString<100>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Identifiable for ClientModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Database model for a service professional
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfessionalModel {
    pub id: Uuid,
    pub name: HeaplessString<100>,
    pub email: HeaplessString<100>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Identifiable for ProfessionalModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
