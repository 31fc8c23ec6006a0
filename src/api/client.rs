//! OKX market-data REST API client implementation.
//!
//! The [`OkxApiClient`] wraps every call in the uniform [`Outcome`] type:
//! server business errors, HTTP error statuses, timeouts, cancellation and
//! connection failures all come back as a populated `Outcome`, never as an
//! `Err` the caller has to unwind.
//!
//! # Example
//!
//! ```rust,ignore
//! use okx_market_sdk::api::OkxApiClient;
//! use okx_market_sdk::api::types::InstrumentType;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = OkxApiClient::new("https://www.okx.com").unwrap();
//!
//!     let tickers = client.get_tickers(InstrumentType::Spot).await;
//!     if tickers.succeeded {
//!         println!("got {} tickers", tickers.data.unwrap_or_default().len());
//!     } else {
//!         println!("call failed: {} {}", tickers.code, tickers.message);
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::api::outcome::{convert_list, Outcome};
use crate::api::transport::{
    BuildError, HttpTransport, ProgressCallback, TransportCall, DEFAULT_TIMEOUT_SECS,
};
use crate::api::types::{Instrument, InstrumentType, Ticker};

/// Header carrying the optional access credential.
const ACCESS_KEY_HEADER: &str = "OK-ACCESS-KEY";

/// Per-call options for [`OkxApiClient::request`] and the typed helpers.
///
/// Everything is optional; `RequestOptions::default()` is a plain call.
#[derive(Default, Clone)]
pub struct RequestOptions {
    /// Query string pairs appended to the path.
    pub query: Vec<(String, String)>,
    /// Per-call headers; override the client's shared headers on conflict.
    pub headers: Vec<(String, String)>,
    /// Cancellation scope for this call.
    pub cancel: Option<CancellationToken>,
    /// Upload progress callback.
    pub on_send: Option<ProgressCallback>,
    /// Download progress callback.
    pub on_receive: Option<ProgressCallback>,
}

impl RequestOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a per-call header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Attach an upload progress callback.
    pub fn with_send_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_send = Some(callback);
        self
    }

    /// Attach a download progress callback.
    pub fn with_receive_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_receive = Some(callback);
        self
    }
}

/// Builder for configuring [`OkxApiClient`].
#[derive(Debug, Clone)]
pub struct OkxApiClientBuilder {
    base_url: String,
    timeout: Duration,
    access_key: Option<String>,
    default_headers: Vec<(String, String)>,
}

impl OkxApiClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            access_key: None,
            default_headers: Vec::new(),
        }
    }

    /// Set the connect/send/receive timeout (15 s by default).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set the access credential sent as the `OK-ACCESS-KEY` header.
    pub fn access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    /// Add a header applied to every outgoing request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be initialized.
    pub fn build(self) -> Result<OkxApiClient, BuildError> {
        let transport = HttpTransport::new(self.timeout)?;
        Ok(OkxApiClient {
            transport,
            base_url: self.base_url,
            access_key: self.access_key,
            shared_headers: Arc::new(RwLock::new(self.default_headers.into_iter().collect())),
        })
    }
}

/// Market-data REST API client.
///
/// Cheap to clone; clones share the transport connection pool and the
/// mutable header map.
#[derive(Debug, Clone)]
pub struct OkxApiClient {
    transport: HttpTransport,
    base_url: String,
    access_key: Option<String>,
    shared_headers: Arc<RwLock<HashMap<String, String>>>,
}

impl OkxApiClient {
    /// Create a new client with the given base URL and default settings
    /// (15 s timeouts, connection pooling).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BuildError> {
        OkxApiClientBuilder::new(base_url).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(base_url: impl Into<String>) -> OkxApiClientBuilder {
        OkxApiClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Shared header mutation
    // =========================================================================

    /// Add (or replace) a header applied to all subsequent requests.
    ///
    /// In-flight requests keep the snapshot taken when they started.
    pub fn add_header(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut headers = self.shared_headers.write().expect("header map poisoned");
        headers.insert(name.into(), value.into());
    }

    /// Remove a shared header; subsequent requests no longer carry it.
    pub fn remove_header(&self, name: &str) {
        let mut headers = self.shared_headers.write().expect("header map poisoned");
        headers.remove(name);
    }

    // =========================================================================
    // Generic request surface
    // =========================================================================

    /// Execute a request and normalize the result.
    ///
    /// All failure paths resolve to a populated [`Outcome`]; this method
    /// never returns an error. The converter receives the envelope's `data`
    /// value and a converter fault surfaces as an internal-error outcome.
    pub async fn request<T, C>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        opts: RequestOptions,
        convert: C,
    ) -> Outcome<T>
    where
        C: FnOnce(Value) -> serde_json::Result<T> + Send,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending API request");

        let call = TransportCall {
            method,
            url,
            query: opts.query,
            headers: self.header_snapshot(opts.headers),
            body,
            cancel: opts.cancel,
            on_send: opts.on_send,
            on_receive: opts.on_receive,
        };

        match self.transport.send(call).await {
            Ok((_, raw)) => match serde_json::from_value(raw) {
                Ok(envelope) => Outcome::from_envelope(envelope, convert),
                Err(err) => Outcome::internal(err.to_string()),
            },
            Err(failure) => {
                tracing::warn!(%path, %failure, "API request failed at transport level");
                Outcome::from_failure(&failure)
            }
        }
    }

    /// Snapshot of the shared headers plus the access key, overlaid with the
    /// per-call headers (per-call wins on conflict).
    fn header_snapshot(&self, call_headers: Vec<(String, String)>) -> Vec<(String, String)> {
        let mut merged: HashMap<String, String> = self
            .shared_headers
            .read()
            .expect("header map poisoned")
            .clone();
        if let Some(key) = &self.access_key {
            merged.insert(ACCESS_KEY_HEADER.to_string(), key.clone());
        }
        merged.extend(call_headers);
        merged.into_iter().collect()
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    /// GET a single-object endpoint; `map` is applied to the `data` value.
    pub async fn get<T, M>(&self, path: &str, opts: RequestOptions, map: M) -> Outcome<T>
    where
        M: FnOnce(Value) -> serde_json::Result<T> + Send,
    {
        self.request(Method::GET, path, None, opts, map).await
    }

    /// GET a list endpoint; `map` is applied element-wise and a `null`
    /// payload converts to an empty vector.
    pub async fn get_list<T, M>(&self, path: &str, opts: RequestOptions, map: M) -> Outcome<Vec<T>>
    where
        M: Fn(Value) -> serde_json::Result<T> + Send,
    {
        self.request(Method::GET, path, None, opts, convert_list(map))
            .await
    }

    /// POST a single-object endpoint.
    pub async fn post<T, M>(
        &self,
        path: &str,
        body: Option<Value>,
        opts: RequestOptions,
        map: M,
    ) -> Outcome<T>
    where
        M: FnOnce(Value) -> serde_json::Result<T> + Send,
    {
        self.request(Method::POST, path, body, opts, map).await
    }

    /// POST a list endpoint.
    pub async fn post_list<T, M>(
        &self,
        path: &str,
        body: Option<Value>,
        opts: RequestOptions,
        map: M,
    ) -> Outcome<Vec<T>>
    where
        M: Fn(Value) -> serde_json::Result<T> + Send,
    {
        self.request(Method::POST, path, body, opts, convert_list(map))
            .await
    }

    // =========================================================================
    // Instrument endpoints
    // =========================================================================

    /// List instruments, optionally narrowed to a single instrument ID.
    pub async fn get_instruments(
        &self,
        inst_type: InstrumentType,
        inst_id: Option<&str>,
    ) -> Outcome<Vec<Instrument>> {
        let mut opts = RequestOptions::new().with_query("instType", inst_type.to_string());
        if let Some(id) = inst_id {
            opts = opts.with_query("instId", id);
        }
        self.get_list("/api/v5/public/instruments", opts, serde_json::from_value)
            .await
    }

    // =========================================================================
    // Ticker endpoints
    // =========================================================================

    /// List 24-hour tickers for all instruments of a type.
    pub async fn get_tickers(&self, inst_type: InstrumentType) -> Outcome<Vec<Ticker>> {
        let opts = RequestOptions::new().with_query("instType", inst_type.to_string());
        self.get_list("/api/v5/market/tickers", opts, serde_json::from_value)
            .await
    }

    /// Fetch the ticker for one instrument.
    ///
    /// The endpoint answers with a list; the first element is taken and an
    /// empty list yields `data == None` while preserving the list call's
    /// code, message and success flag.
    pub async fn get_market_ticker(&self, inst_id: &str) -> Outcome<Ticker> {
        let opts = RequestOptions::new().with_query("instId", inst_id);
        self.get_list("/api/v5/market/ticker", opts, serde_json::from_value)
            .await
            .map_data(|tickers| tickers.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OkxApiClient::new("https://www.okx.com").unwrap();
        assert_eq!(client.base_url(), "https://www.okx.com");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = OkxApiClient::builder("https://www.okx.com/")
            .timeout_secs(60)
            .header("X-Custom", "test")
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://www.okx.com");
    }

    #[test]
    fn test_header_snapshot_merges_access_key_and_call_headers() {
        let client = OkxApiClient::builder("https://www.okx.com")
            .access_key("key-123")
            .header("X-Shared", "shared")
            .build()
            .unwrap();

        let snapshot = client.header_snapshot(vec![("X-Shared".to_string(), "call".to_string())]);
        let lookup: HashMap<_, _> = snapshot.into_iter().collect();
        assert_eq!(
            lookup.get(ACCESS_KEY_HEADER).map(String::as_str),
            Some("key-123")
        );
        // Per-call headers win on conflict.
        assert_eq!(lookup.get("X-Shared").map(String::as_str), Some("call"));
    }

    #[test]
    fn test_add_and_remove_header() {
        let client = OkxApiClient::new("https://www.okx.com").unwrap();
        client.add_header("X-Trace", "abc");
        let lookup: HashMap<_, _> = client.header_snapshot(Vec::new()).into_iter().collect();
        assert_eq!(lookup.get("X-Trace").map(String::as_str), Some("abc"));

        client.remove_header("X-Trace");
        let lookup: HashMap<_, _> = client.header_snapshot(Vec::new()).into_iter().collect();
        assert!(!lookup.contains_key("X-Trace"));
    }

    #[test]
    fn test_request_options_builders() {
        let opts = RequestOptions::new()
            .with_query("instType", "SPOT")
            .with_header("X-Call", "1")
            .with_cancel(CancellationToken::new());

        assert_eq!(
            opts.query,
            vec![("instType".to_string(), "SPOT".to_string())]
        );
        assert_eq!(opts.headers, vec![("X-Call".to_string(), "1".to_string())]);
        assert!(opts.cancel.is_some());
    }
}
