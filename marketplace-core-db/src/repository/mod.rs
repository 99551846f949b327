pub mod create;
pub mod exists_by_id;
pub mod find_by_id;
pub mod find_by_service_request;
pub mod find_for_professional;
pub mod load;
pub mod update;

// Re-exports
pub use create::*;
pub use exists_by_id::*;
pub use find_by_id::*;
pub use find_by_service_request::*;
pub use find_for_professional::*;
pub use load::*;
pub use update::*;
