pub mod review;
pub mod service_request;

pub use review::*;
pub use service_request::*;
