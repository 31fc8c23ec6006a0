//! # OKX Market-Data Rust SDK
//!
//! An async client for the OKX v5 market-data REST API.
//!
//! The centerpiece is [`api::Outcome`]: every call — success, server-side
//! business error, HTTP error status, timeout, cancellation, connection
//! failure — resolves to one uniform value, so callers branch on a flag
//! instead of unwinding errors.
//!
//! ## Modules
//!
//! - [`api`]: the REST client, outcome normalization and response types
//! - [`network`]: default base-URL constants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use okx_market_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = OkxApiClient::new(DEFAULT_API_URL).unwrap();
//!
//!     let ticker = client.get_market_ticker("BTC-USDT").await;
//!     match ticker.data {
//!         Some(t) => println!("BTC-USDT last: {}", t.last),
//!         None => println!("no ticker: {} {}", ticker.code, ticker.message),
//!     }
//! }
//! ```

/// REST API client module: outcome normalization, transport seam, endpoints.
pub mod api;

/// Network URL constants.
pub mod network;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use okx_market_sdk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        codes, BuildError, Envelope, OkxApiClient, OkxApiClientBuilder, Outcome,
        ProgressCallback, RequestOptions, TransportFailure,
        // Common types
        Instrument, InstrumentState, InstrumentType, Ticker,
    };
    pub use crate::network::{AWS_API_URL, DEFAULT_API_URL};
}
