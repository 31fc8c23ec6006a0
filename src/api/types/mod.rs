//! Response types for the market-data REST API.

pub mod instrument;
pub mod ticker;

pub(crate) mod serde_util;

// Re-export all types for convenience
pub use instrument::*;
pub use ticker::*;
