//! In-memory doubles for the persistence capabilities, used by the service
//! unit tests in place of a real store.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewServiceRequest, Review, ServiceRequest};
use crate::error::{ApiError, ApiResult};
use crate::service::stores::{PartyDirectory, ReviewStore, ServiceRequestStore};
use crate::service::verification_code::VerificationCodeSource;

/// Always returns the same code
pub(crate) struct FixedCodeSource(pub &'static str);

impl VerificationCodeSource for FixedCodeSource {
    fn next_code(&self) -> String {
        self.0.to_string()
    }
}

/// Returns a scripted sequence of codes, panicking when exhausted
pub(crate) struct SequenceCodeSource {
    codes: Mutex<VecDeque<String>>,
}

impl SequenceCodeSource {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl VerificationCodeSource for SequenceCodeSource {
    fn next_code(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted code sequence exhausted")
    }
}

#[derive(Default)]
struct State {
    clients: HashSet<Uuid>,
    professionals: HashSet<Uuid>,
    requests: HashMap<Uuid, ServiceRequest>,
    reviews: HashMap<Uuid, Review>,
}

/// Shared in-memory store implementing all three capability traits
#[derive(Clone, Default)]
pub(crate) struct InMemoryMarketplace {
    state: Arc<Mutex<State>>,
}

impl InMemoryMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_client(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().clients.insert(id);
        id
    }

    pub fn add_professional(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().professionals.insert(id);
        id
    }
}

#[async_trait]
impl ServiceRequestStore for InMemoryMarketplace {
    async fn find_request(&self, id: Uuid) -> ApiResult<Option<ServiceRequest>> {
        Ok(self.state.lock().unwrap().requests.get(&id).cloned())
    }

    async fn insert_request(&self, request: ServiceRequest) -> ApiResult<ServiceRequest> {
        let mut state = self.state.lock().unwrap();
        state.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn save_request(&self, request: &ServiceRequest) -> ApiResult<ServiceRequest> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .requests
            .get_mut(&request.id)
            .ok_or_else(|| ApiError::NotFound(format!("service request {}", request.id)))?;
        if stored.version != request.version {
            return Err(ApiError::Conflict(format!(
                "service request {} was modified concurrently",
                request.id
            )));
        }
        let mut saved = request.clone();
        saved.version += 1;
        *stored = saved.clone();
        Ok(saved)
    }

    async fn list_requests_for_professional(
        &self,
        professional_id: Uuid,
    ) -> ApiResult<Vec<ServiceRequest>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .requests
            .values()
            .filter(|r| r.professional_id == professional_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReviewStore for InMemoryMarketplace {
    async fn find_review(&self, id: Uuid) -> ApiResult<Option<Review>> {
        Ok(self.state.lock().unwrap().reviews.get(&id).cloned())
    }

    async fn find_review_by_request(
        &self,
        service_request_id: Uuid,
    ) -> ApiResult<Option<Review>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .reviews
            .values()
            .find(|r| r.service_request_id == service_request_id)
            .cloned())
    }

    async fn insert_review(&self, review: Review) -> ApiResult<Review> {
        let mut state = self.state.lock().unwrap();
        // Mirrors the storage-layer uniqueness constraint on service_request_id.
        if state
            .reviews
            .values()
            .any(|r| r.service_request_id == review.service_request_id)
        {
            return Err(ApiError::Conflict(format!(
                "a review already exists for service request {}",
                review.service_request_id
            )));
        }
        state.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update_review(&self, review: &Review) -> ApiResult<Review> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .reviews
            .get_mut(&review.id)
            .ok_or_else(|| ApiError::NotFound(format!("review {}", review.id)))?;
        *stored = review.clone();
        Ok(review.clone())
    }

    async fn list_reviews_for_professional(
        &self,
        professional_id: Uuid,
    ) -> ApiResult<Vec<Review>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .reviews
            .values()
            .filter(|r| r.professional_id == professional_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PartyDirectory for InMemoryMarketplace {
    async fn client_exists(&self, id: Uuid) -> ApiResult<bool> {
        Ok(self.state.lock().unwrap().clients.contains(&id))
    }

    async fn professional_exists(&self, id: Uuid) -> ApiResult<bool> {
        Ok(self.state.lock().unwrap().professionals.contains(&id))
    }
}

/// A plausible command payload targeting the given parties
pub(crate) fn new_request(client_id: Uuid, professional_id: Uuid) -> NewServiceRequest {
    NewServiceRequest {
        client_id,
        professional_id,
        title: "Fix the kitchen sink".to_string(),
        description: Some("The drain leaks under the counter".to_string()),
        service_address: Some("12 Rosewood Lane".to_string()),
        scheduled_date: None,
        proposed_value: None,
        observations: None,
    }
}
