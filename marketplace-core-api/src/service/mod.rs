pub mod rating;
pub mod request_lifecycle;
pub mod stores;
pub mod verification_code;

#[cfg(test)]
pub(crate) mod test_support;

pub use rating::*;
pub use request_lifecycle::*;
pub use stores::*;
pub use verification_code::*;
