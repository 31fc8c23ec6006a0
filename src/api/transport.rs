//! HTTP transport seam for the API client.
//!
//! [`HttpTransport`] is the only place reqwest errors exist; everything it
//! raises is a [`TransportFailure`], the tagged failure description that
//! [`Outcome::from_failure`](crate::api::Outcome::from_failure) classifies.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method};
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Fixed connect/send/receive timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Progress callback: bytes transferred so far and total if known.
///
/// Invoked zero or more times with non-decreasing counts; carries no
/// correctness obligation.
pub type ProgressCallback = Arc<dyn Fn(u64, Option<u64>) + Send + Sync>;

/// Transport-level failure raised by [`HttpTransport::send`].
#[derive(Debug, Error)]
pub enum TransportFailure {
    /// The request timed out before the response arrived.
    #[error("send timed out")]
    SendTimeout,
    /// The response body timed out mid-read.
    #[error("receive timed out")]
    ReceiveTimeout,
    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
    /// The server answered with a non-success HTTP status.
    #[error("bad response status {status}")]
    BadResponse {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase, when the status has one.
        status_message: Option<String>,
        /// Inner response body, when it parsed as JSON.
        body: Option<Value>,
    },
    /// TLS certificate verification failed.
    #[error("certificate error: {0}")]
    BadCertificate(String),
    /// Low-level connection failure (refused, reset, DNS).
    #[error("connection error: {0}")]
    Connect(String),
    /// The response body was not valid JSON.
    #[error("response decode error: {0}")]
    Decode(String),
    /// Anything the other classes do not cover.
    #[error("transport error: {0}")]
    Unknown(String),
}

/// Failed to construct the underlying HTTP client.
#[derive(Debug, Error)]
pub enum BuildError {
    /// reqwest refused the client configuration.
    #[error("failed to initialize HTTP transport: {0}")]
    Http(#[from] reqwest::Error),
}

/// A single outgoing call, fully resolved by the client layer.
pub(crate) struct TransportCall {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub cancel: Option<CancellationToken>,
    pub on_send: Option<ProgressCallback>,
    pub on_receive: Option<ProgressCallback>,
}

#[derive(Clone, Copy)]
enum Stage {
    Send,
    Receive,
}

/// Thin reqwest wrapper with fixed per-client timeouts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Build a transport with the given total timeout; connect and read
    /// timeouts are pinned to the same value.
    pub fn new(timeout: Duration) -> Result<Self, BuildError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self { http })
    }

    /// Execute one call, returning the status and parsed JSON body.
    ///
    /// Non-2xx statuses surface as [`TransportFailure::BadResponse`] with
    /// the body attached when it is JSON. The body is read chunkwise so
    /// cancellation can interrupt mid-read and the receive progress
    /// callback sees running byte counts.
    pub(crate) async fn send(&self, call: TransportCall) -> Result<(u16, Value), TransportFailure> {
        let mut request = self.http.request(call.method, &call.url);
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        for (name, value) in &call.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &call.body {
            let bytes =
                serde_json::to_vec(body).map_err(|e| TransportFailure::Unknown(e.to_string()))?;
            if let Some(on_send) = &call.on_send {
                on_send(bytes.len() as u64, Some(bytes.len() as u64));
            }
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        let send = request.send();
        let response = match &call.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(TransportFailure::Cancelled),
                result = send => result,
            },
            None => send.await,
        }
        .map_err(|e| classify(&e, Stage::Send))?;

        let status = response.status();
        let status_message = status.canonical_reason().map(str::to_owned);
        let bytes = read_body(
            response,
            call.cancel.as_ref(),
            call.on_receive.as_ref(),
        )
        .await?;

        if !status.is_success() {
            return Err(TransportFailure::BadResponse {
                status: status.as_u16(),
                status_message,
                body: serde_json::from_slice(&bytes).ok(),
            });
        }

        let parsed =
            serde_json::from_slice(&bytes).map_err(|e| TransportFailure::Decode(e.to_string()))?;
        Ok((status.as_u16(), parsed))
    }
}

async fn read_body(
    mut response: reqwest::Response,
    cancel: Option<&CancellationToken>,
    on_receive: Option<&ProgressCallback>,
) -> Result<Vec<u8>, TransportFailure> {
    let total = response.content_length();
    let mut buf = Vec::new();
    loop {
        let next = response.chunk();
        let chunk = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(TransportFailure::Cancelled),
                result = next => result,
            },
            None => next.await,
        }
        .map_err(|e| classify(&e, Stage::Receive))?;

        match chunk {
            Some(bytes) => {
                buf.extend_from_slice(&bytes);
                if let Some(on_receive) = on_receive {
                    on_receive(buf.len() as u64, total);
                }
            }
            None => return Ok(buf),
        }
    }
}

fn classify(err: &reqwest::Error, stage: Stage) -> TransportFailure {
    if err.is_timeout() {
        return match stage {
            Stage::Send => TransportFailure::SendTimeout,
            Stage::Receive => TransportFailure::ReceiveTimeout,
        };
    }
    if is_certificate_error(err) {
        return TransportFailure::BadCertificate(err.to_string());
    }
    if err.is_connect() {
        return TransportFailure::Connect(err.to_string());
    }
    TransportFailure::Unknown(err.to_string())
}

/// Walk the error source chain looking for a TLS certificate failure;
/// reqwest does not expose one as a predicate.
fn is_certificate_error(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if format!("{inner:?}").to_ascii_lowercase().contains("certificate") {
            return true;
        }
        source = inner.source();
    }
    false
}
