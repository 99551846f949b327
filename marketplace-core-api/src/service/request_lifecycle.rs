use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{NewServiceRequest, ServiceRequest, ServiceStatus};
use crate::error::{ApiError, ApiResult};
use crate::service::stores::{PartyDirectory, ServiceRequestStore};
use crate::service::verification_code::VerificationCodeSource;

/// State machine governing a service request's status, verification-code
/// issuance and client-confirmed completion.
///
/// Every operation is one read-validate-mutate-write sequence; the store's
/// versioned save is the single commit point, so two concurrent transitions
/// on the same request cannot silently clobber each other.
pub struct RequestLifecycle<S, P, C>
where
    S: ServiceRequestStore,
    P: PartyDirectory,
    C: VerificationCodeSource,
{
    requests: S,
    parties: P,
    codes: C,
}

impl<S, P, C> RequestLifecycle<S, P, C>
where
    S: ServiceRequestStore,
    P: PartyDirectory,
    C: VerificationCodeSource,
{
    pub fn new(requests: S, parties: P, codes: C) -> Self {
        Self {
            requests,
            parties,
            codes,
        }
    }

    /// Creates a new request in `Pending` with no code and no completion date
    pub async fn create(&self, new_request: NewServiceRequest) -> ApiResult<ServiceRequest> {
        if new_request.title.trim().is_empty() {
            return Err(ApiError::MissingInput("title is required".to_string()));
        }
        new_request
            .validate()
            .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;

        if !self.parties.client_exists(new_request.client_id).await? {
            return Err(ApiError::ReferenceNotFound(format!(
                "client {}",
                new_request.client_id
            )));
        }
        if !self
            .parties
            .professional_exists(new_request.professional_id)
            .await?
        {
            return Err(ApiError::ReferenceNotFound(format!(
                "professional {}",
                new_request.professional_id
            )));
        }

        let request = ServiceRequest {
            id: Uuid::new_v4(),
            client_id: new_request.client_id,
            professional_id: new_request.professional_id,
            title: new_request.title,
            description: new_request.description,
            service_address: new_request.service_address,
            scheduled_date: new_request.scheduled_date,
            proposed_value: new_request.proposed_value,
            status: ServiceStatus::Pending,
            observations: new_request.observations,
            verification_code: None,
            completion_date: None,
            created_at: Utc::now(),
            updated_at: None,
            is_active: true,
            version: 0,
        };

        let created = self.requests.insert_request(request).await?;
        info!(request_id = %created.id, "service request created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<ServiceRequest> {
        self.requests
            .find_request(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("service request {id}")))
    }

    /// Applies a status transition, enforcing the completion handshake.
    ///
    /// Completing requires an exact, case-sensitive match between
    /// `supplied_code` and the stored verification code; any other target
    /// clears the completion date and rejects an externally supplied code
    /// (issuance belongs to `Accepted` and `generate_verification_code`).
    pub async fn update_status(
        &self,
        id: Uuid,
        target: ServiceStatus,
        supplied_code: Option<&str>,
    ) -> ApiResult<ServiceRequest> {
        let mut request = self
            .requests
            .find_request(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("service request {id}")))?;

        if !request.status.can_transition_to(target) {
            return Err(ApiError::InvalidState(format!(
                "service request {id} cannot move from {} to {target}",
                request.status
            )));
        }

        if target == ServiceStatus::Completed {
            let stored = request.verification_code.clone().ok_or_else(|| {
                ApiError::InvalidState(
                    "a verification code must be issued before completing the service"
                        .to_string(),
                )
            })?;
            let supplied = supplied_code
                .filter(|code| !code.trim().is_empty())
                .ok_or_else(|| {
                    ApiError::MissingInput(
                        "the confirmation code provided by the client is required".to_string(),
                    )
                })?;
            if supplied != stored {
                return Err(ApiError::CodeMismatch);
            }
            request.completion_date = Some(Utc::now());
        } else {
            if supplied_code.is_some_and(|code| !code.trim().is_empty()) {
                return Err(ApiError::InvalidArgument(
                    "a verification code may only be supplied when completing".to_string(),
                ));
            }
            request.completion_date = None;
            if target == ServiceStatus::Accepted && request.verification_code.is_none() {
                request.verification_code = Some(self.codes.next_code());
            }
        }

        request.status = target;
        request.updated_at = Some(Utc::now());

        let saved = self.requests.save_request(&request).await?;
        info!(request_id = %saved.id, status = %saved.status, "service request status updated");
        Ok(saved)
    }

    /// (Re)issues a verification code regardless of status, overwriting any
    /// previously stored code
    pub async fn generate_verification_code(&self, id: Uuid) -> ApiResult<String> {
        let mut request = self
            .requests
            .find_request(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("service request {id}")))?;

        let code = self.codes.next_code();
        request.verification_code = Some(code.clone());
        request.updated_at = Some(Utc::now());

        self.requests.save_request(&request).await?;
        info!(request_id = %id, "verification code generated");
        Ok(code)
    }

    /// Read-only equality check; `false` for an absent request rather than
    /// an error
    pub async fn verify_code(&self, id: Uuid, code: &str) -> ApiResult<bool> {
        match self.requests.find_request(id).await? {
            Some(request) => Ok(request.verification_code.as_deref() == Some(code)),
            None => Ok(false),
        }
    }

    pub async fn requests_for_professional(
        &self,
        professional_id: Uuid,
    ) -> ApiResult<Vec<ServiceRequest>> {
        self.requests
            .list_requests_for_professional(professional_id)
            .await
    }
}
