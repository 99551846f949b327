pub mod party_repository;
pub mod review_repository;
pub mod service_request_repository;

pub use party_repository::PartyRepositoryImpl;
pub use review_repository::ReviewRepositoryImpl;
pub use service_request_repository::ServiceRequestRepositoryImpl;
