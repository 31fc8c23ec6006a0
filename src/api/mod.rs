//! REST API client module for the OKX v5 market-data API.
//!
//! Every call resolves to a uniform [`Outcome`] value: callers branch on
//! [`Outcome::succeeded`] instead of unwinding errors.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use okx_market_sdk::api::OkxApiClient;
//! use okx_market_sdk::api::types::InstrumentType;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = OkxApiClient::new("https://www.okx.com").unwrap();
//!
//!     let instruments = client.get_instruments(InstrumentType::Spot, None).await;
//!     println!("found {} instruments", instruments.data.unwrap_or_default().len());
//!
//!     let ticker = client.get_market_ticker("BTC-USDT").await;
//!     if let Some(ticker) = ticker.data {
//!         println!("BTC-USDT last: {}", ticker.last);
//!     }
//! }
//! ```
//!
//! # Client Configuration
//!
//! Use the builder pattern for custom configuration:
//!
//! ```rust,ignore
//! use okx_market_sdk::api::OkxApiClient;
//! use std::time::Duration;
//!
//! let client = OkxApiClient::builder("https://www.okx.com")
//!     .timeout(Duration::from_secs(30))
//!     .access_key("my-key")
//!     .header("X-Custom-Header", "value")
//!     .build()?;
//! ```
//!
//! # Error Handling
//!
//! There is no error type to match on at call sites. Transport failures are
//! folded into the outcome under the reserved [`codes`](outcome::codes):
//!
//! ```rust,ignore
//! use okx_market_sdk::api::outcome::codes;
//!
//! let outcome = client.get_market_ticker("BTC-USDT").await;
//! if !outcome.succeeded {
//!     match outcome.code.as_str() {
//!         codes::TIMEOUT => println!("timed out"),
//!         codes::CANCELLED => println!("cancelled"),
//!         other => println!("failed: {} {}", other, outcome.message),
//!     }
//! }
//! ```

pub mod client;
pub mod outcome;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{OkxApiClient, OkxApiClientBuilder, RequestOptions};
pub use outcome::{codes, Envelope, Outcome};
pub use transport::{BuildError, HttpTransport, ProgressCallback, TransportFailure};
pub use types::*;
