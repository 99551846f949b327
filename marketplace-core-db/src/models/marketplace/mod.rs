pub mod party;
pub mod review;
pub mod service_request;

pub use party::*;
pub use review::*;
pub use service_request::*;

use heapless::String as HeaplessString;
use std::str::FromStr;

/// Converts an unbounded string into a bounded model field, reporting the
/// offending field name on overflow
pub(crate) fn bounded<const N: usize>(
    value: &str,
    field: &str,
) -> Result<HeaplessString<N>, String> {
    HeaplessString::from_str(value)
        .map_err(|_| format!("Value for field '{field}' is too long (max {N} chars)"))
}

/// Optional variant of [`bounded`]
pub(crate) fn bounded_opt<const N: usize>(
    value: Option<&str>,
    field: &str,
) -> Result<Option<HeaplessString<N>>, String> {
    value.map(|v| bounded(v, field)).transpose()
}
