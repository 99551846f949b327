pub mod identifiable;
pub mod marketplace;

// Re-exports
pub use identifiable::*;
pub use marketplace::*;
