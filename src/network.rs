//! Network URL constants for the SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://www.okx.com";

/// Alternative base URL served from AWS, for deployments closer to it.
pub const AWS_API_URL: &str = "https://aws.okx.com";
