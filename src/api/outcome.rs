//! Uniform call outcome for the OKX REST API client.
//!
//! Every API call resolves to an [`Outcome<T>`] value. The server's JSON
//! envelope and every class of transport failure are normalized here, so
//! callers only ever branch on [`Outcome::succeeded`] and never handle a
//! raw HTTP or network error.

use serde::Deserialize;
use serde_json::Value;

use crate::api::transport::TransportFailure;

/// Reserved status codes produced by the client layer itself.
///
/// The server's code space is numeric strings, so the `client:` prefix keeps
/// these sentinels disjoint from anything the API can return.
pub mod codes {
    /// Server-side success code.
    pub const SUCCESS: &str = "0";
    /// The call was cancelled by the caller.
    pub const CANCELLED: &str = "client:cancelled";
    /// Unexpected client-side failure (malformed body, converter fault).
    pub const INTERNAL: &str = "client:internal-error";
    /// Transport failure that fits no other class.
    pub const UNKNOWN: &str = "client:unknown-error";
    /// Send or receive timed out.
    pub const TIMEOUT: &str = "client:timeout";
    /// TLS certificate verification failed.
    pub const BAD_CERTIFICATE: &str = "client:bad-certificate";
    /// Low-level connection failure (refused, reset, DNS).
    pub const CONNECT_ERROR: &str = "client:connect-error";
}

/// The server's uniform JSON wrapper around every endpoint's payload.
///
/// Decoded defensively: a body missing `code` is treated as an internal
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Outcome code; `"0"` means success.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable explanation.
    #[serde(default)]
    pub msg: Option<String>,
    /// Endpoint payload; shape varies per endpoint, `null` on failure.
    #[serde(default)]
    pub data: Value,
    /// Explicit success override; rarely sent by the server.
    #[serde(default)]
    pub success: Option<bool>,
}

/// Uniform outcome of an API call.
///
/// `data` is populated only when the call succeeded at the transport level
/// and the server signaled success; a failed outcome always carries
/// `data == None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    /// Server code, or one of the reserved [`codes`] sentinels.
    pub code: String,
    /// Human-readable explanation.
    pub message: String,
    /// Converted payload, present only on success.
    pub data: Option<T>,
    /// Whether the call succeeded end to end.
    pub succeeded: bool,
}

impl<T> Outcome<T> {
    /// A failed outcome with no payload.
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
            succeeded: false,
        }
    }

    /// A failed outcome with the reserved internal-error code.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::failure(codes::INTERNAL, message)
    }

    /// Map a structured server response into an outcome.
    ///
    /// On `code == "0"` the converter is applied to the `data` field; a
    /// converter fault becomes an internal-error outcome. Any other code is
    /// surfaced verbatim with no payload. An explicit `success: false` in
    /// the envelope overrides the code check and drops the payload, keeping
    /// the `data ⇒ succeeded` invariant.
    pub fn from_envelope<C>(envelope: Envelope, convert: C) -> Self
    where
        C: FnOnce(Value) -> serde_json::Result<T>,
    {
        let code = envelope
            .code
            .unwrap_or_else(|| codes::INTERNAL.to_string());
        let message = envelope.msg.unwrap_or_default();

        if code != codes::SUCCESS || envelope.success == Some(false) {
            return Self::failure(code, message);
        }

        match convert(envelope.data) {
            Ok(data) => Self {
                code,
                message,
                data: Some(data),
                succeeded: true,
            },
            Err(err) => Self::internal(err.to_string()),
        }
    }

    /// Classify a transport failure into an outcome.
    ///
    /// Pure over the failure description; every branch yields a non-empty
    /// code and message.
    pub fn from_failure(failure: &TransportFailure) -> Self {
        match failure {
            TransportFailure::SendTimeout | TransportFailure::ReceiveTimeout => {
                Self::failure(codes::TIMEOUT, "connectionTimeout")
            }
            TransportFailure::Cancelled => Self::failure(codes::CANCELLED, "requestCancelled"),
            TransportFailure::BadResponse {
                status,
                status_message,
                ..
            } => match status_text(*status) {
                Some(text) => Self::failure(status.to_string(), text),
                None => Self::failure(
                    codes::INTERNAL,
                    status_message
                        .clone()
                        .unwrap_or_else(|| "unknownError".to_string()),
                ),
            },
            TransportFailure::BadCertificate(_) => {
                Self::failure(codes::BAD_CERTIFICATE, "badCertificate")
            }
            TransportFailure::Connect(_) => Self::failure(codes::CONNECT_ERROR, "connectionError"),
            TransportFailure::Decode(detail) => Self::internal(detail.clone()),
            TransportFailure::Unknown(_) => Self::failure(codes::UNKNOWN, "unknownError"),
        }
    }

    /// Transform the payload while preserving code, message and success flag.
    pub fn map_data<U>(self, f: impl FnOnce(T) -> Option<U>) -> Outcome<U> {
        Outcome {
            code: self.code,
            message: self.message,
            data: self.data.and_then(f),
            succeeded: self.succeeded,
        }
    }
}

/// Fixed messages for well-known HTTP error statuses.
///
/// Message values are the UI-facing translation keys used by consumers of
/// this SDK, which is why they are camelCase identifiers rather than prose.
pub(crate) fn status_text(status: u16) -> Option<&'static str> {
    let text = match status {
        400 => "badRequest",
        401 => "unauthorizedRequest",
        403 => "serverRefused",
        404 => "cannotReachServer",
        405 => "methodForbidden",
        500 => "serverInternalError",
        502 => "badGateway",
        503 => "serviceUnavailable",
        505 => "unsupportedHttpVersion",
        _ => return None,
    };
    Some(text)
}

/// Build a list converter from a per-element mapper.
///
/// `null` (or an absent field, which decodes as `null`) converts to an empty
/// vector; an array is mapped element-wise; any other shape is a converter
/// fault and surfaces as an internal-error outcome.
pub(crate) fn convert_list<T, M>(map: M) -> impl FnOnce(Value) -> serde_json::Result<Vec<T>>
where
    M: Fn(Value) -> serde_json::Result<T>,
{
    move |value| match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(&map).collect(),
        other => Err(serde::de::Error::custom(format!(
            "expected array payload, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(body: Value) -> Envelope {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn success_envelope_converts_data() {
        let env = envelope(json!({"code": "0", "msg": "", "data": 7}));
        let outcome = Outcome::from_envelope(env, serde_json::from_value::<i64>);
        assert!(outcome.succeeded);
        assert_eq!(outcome.code, codes::SUCCESS);
        assert_eq!(outcome.data, Some(7));
    }

    #[test]
    fn server_error_code_preserved_verbatim() {
        let env = envelope(json!({"code": "51001", "msg": "Instrument ID does not exist"}));
        let outcome = Outcome::from_envelope(env, serde_json::from_value::<i64>);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.code, "51001");
        assert_eq!(outcome.message, "Instrument ID does not exist");
        assert_eq!(outcome.data, None);
    }

    #[test]
    fn missing_code_maps_to_internal() {
        let env = envelope(json!({"msg": "half a body"}));
        let outcome = Outcome::from_envelope(env, serde_json::from_value::<i64>);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.code, codes::INTERNAL);
    }

    #[test]
    fn explicit_success_false_overrides_code_and_drops_data() {
        let env = envelope(json!({"code": "0", "msg": "rejected", "data": 7, "success": false}));
        let outcome = Outcome::from_envelope(env, serde_json::from_value::<i64>);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.code, "0");
        assert_eq!(outcome.data, None);
    }

    #[test]
    fn converter_fault_becomes_internal_error() {
        let env = envelope(json!({"code": "0", "data": "not a number"}));
        let outcome = Outcome::from_envelope(env, serde_json::from_value::<i64>);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.code, codes::INTERNAL);
        assert!(!outcome.message.is_empty());
    }

    #[test]
    fn list_converter_handles_null_and_arrays() {
        let empty = convert_list(serde_json::from_value::<i64>)(Value::Null).unwrap();
        assert!(empty.is_empty());

        let items = convert_list(serde_json::from_value::<i64>)(json!([1, 2, 3])).unwrap();
        assert_eq!(items, vec![1, 2, 3]);

        assert!(convert_list(serde_json::from_value::<i64>)(json!({"k": 1})).is_err());
    }

    #[test]
    fn timeouts_classify_to_timeout_code() {
        for failure in [TransportFailure::SendTimeout, TransportFailure::ReceiveTimeout] {
            let outcome = Outcome::<()>::from_failure(&failure);
            assert_eq!(outcome.code, codes::TIMEOUT);
            assert_eq!(outcome.message, "connectionTimeout");
            assert!(!outcome.succeeded);
        }
    }

    #[test]
    fn cancellation_classifies_to_cancel_code() {
        let outcome = Outcome::<()>::from_failure(&TransportFailure::Cancelled);
        assert_eq!(outcome.code, codes::CANCELLED);
        assert_eq!(outcome.data, None);
    }

    #[test]
    fn known_status_maps_to_fixed_message() {
        let failure = TransportFailure::BadResponse {
            status: 404,
            status_message: Some("Not Found".to_string()),
            body: None,
        };
        let outcome = Outcome::<()>::from_failure(&failure);
        assert_eq!(outcome.code, "404");
        assert_eq!(outcome.message, "cannotReachServer");
    }

    #[test]
    fn unmapped_status_falls_back_to_internal() {
        let failure = TransportFailure::BadResponse {
            status: 599,
            status_message: Some("Network Connect Timeout".to_string()),
            body: None,
        };
        let outcome = Outcome::<()>::from_failure(&failure);
        assert_eq!(outcome.code, codes::INTERNAL);
        assert_eq!(outcome.message, "Network Connect Timeout");

        let bare = TransportFailure::BadResponse {
            status: 599,
            status_message: None,
            body: None,
        };
        let outcome = Outcome::<()>::from_failure(&bare);
        assert_eq!(outcome.message, "unknownError");
    }

    #[test]
    fn certificate_connect_and_unknown_failures() {
        let cert = Outcome::<()>::from_failure(&TransportFailure::BadCertificate(
            "self signed".to_string(),
        ));
        assert_eq!(cert.code, codes::BAD_CERTIFICATE);

        let conn =
            Outcome::<()>::from_failure(&TransportFailure::Connect("refused".to_string()));
        assert_eq!(conn.code, codes::CONNECT_ERROR);

        let unknown =
            Outcome::<()>::from_failure(&TransportFailure::Unknown("odd".to_string()));
        assert_eq!(unknown.code, codes::UNKNOWN);
        assert_eq!(unknown.message, "unknownError");
    }

    #[test]
    fn decode_failure_carries_description() {
        let outcome = Outcome::<()>::from_failure(&TransportFailure::Decode(
            "expected value at line 1".to_string(),
        ));
        assert_eq!(outcome.code, codes::INTERNAL);
        assert_eq!(outcome.message, "expected value at line 1");
    }

    #[test]
    fn map_data_preserves_code_and_flag() {
        let outcome = Outcome {
            code: codes::SUCCESS.to_string(),
            message: String::new(),
            data: Some(vec![1, 2]),
            succeeded: true,
        };
        let first = outcome.map_data(|v| v.into_iter().next());
        assert!(first.succeeded);
        assert_eq!(first.data, Some(1));

        let empty: Outcome<Vec<i64>> = Outcome {
            code: codes::SUCCESS.to_string(),
            message: String::new(),
            data: Some(Vec::new()),
            succeeded: true,
        };
        let first = empty.map_data(|v| v.into_iter().next());
        assert!(first.succeeded);
        assert_eq!(first.data, None);
    }
}
