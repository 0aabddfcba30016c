//! Error types for the bookstore API client.
//!
//! # Design
//! Resource operations hand back raw `HttpResponse` values, so an HTTP error
//! status is normally data for the caller to assert on. `Http` is only
//! produced by `UserApi::validate_username`, the one operation that enforces
//! a 2xx status before decoding its body.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the client and the test-data factory.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The server answered with a non-2xx status where success was required.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A response body or fixture document could not be decoded.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The fixture file could not be read.
    #[error("failed to read fixture file {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A random pick was requested from an empty collection.
    #[error("cannot pick from empty collection: {0}")]
    EmptyCollection(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_status_and_body() {
        let err = ApiError::Http {
            status: 503,
            body: "maintenance".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("503"));
        assert!(display.contains("maintenance"));
    }

    #[test]
    fn fixture_error_display_names_the_path() {
        let err = ApiError::Fixture {
            path: PathBuf::from("missing/test_data.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let display = err.to_string();
        assert!(display.contains("missing/test_data.json"));
        assert!(display.contains("no such file"));
    }

    #[test]
    fn empty_collection_display() {
        let err = ApiError::EmptyCollection("valid_users");
        assert_eq!(err.to_string(), "cannot pick from empty collection: valid_users");
    }
}
