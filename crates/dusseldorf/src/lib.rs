//! Async client for the Open Data Platform of Düsseldorf.
//!
//! Fetches garages, park and ride facilities and disabled parking spaces and
//! maps the upstream JSON onto the records in [`model`].

use std::error;
use std::fmt;
use std::sync::Arc;

pub mod client;
pub mod config;
pub mod disabled_parkings;
pub mod garages;
pub mod model;
pub mod park_and_rides;
mod response;

pub use client::{OdpDusseldorf, Request, Session, SessionOwnership};
pub use config::ClientConfig;
pub use model::{DisabledParking, Garage, ParkAndRide};

/// Datastore search endpoint, relative to the datastore path.
pub const SEARCH_URI: &str = "search.json";
/// Number of records requested when the caller has no preference.
pub const DEFAULT_LIMIT: u32 = 10;

pub const TIMEOUT_MESSAGE: &str =
    "Timeout occurred while connecting to the Open Data Platform API.";
pub const COMMUNICATION_MESSAGE: &str =
    "Error occurred while communicating with Open Data Platform API.";
pub const CONTENT_TYPE_MESSAGE: &str =
    "Unexpected content type response from the Open Data Platform API";

/// The two kinds of failure a caller has to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Timeout, network failure or an error status from the server.
    Connection,
    /// The server answered, but the answer can not be used.
    Api,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    Connection {
        message: &'static str,
        source: Option<Arc<reqwest::Error>>,
    },
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    UnexpectedContentType {
        content_type: String,
        response: String,
    },
    JsonError(Arc<serde_json::Error>),
    /// The element at `index` of the result array could not be converted.
    Conversion {
        index: usize,
        source: Arc<serde_json::Error>,
    },
    Config(String),
}

impl ApiError {
    pub fn timeout() -> Self {
        ApiError::Connection {
            message: TIMEOUT_MESSAGE,
            source: None,
        }
    }

    pub fn conversion(index: usize, why: serde_json::Error) -> Self {
        ApiError::Conversion {
            index,
            source: Arc::new(why),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Connection { .. } | ApiError::InvalidResponse { .. } => {
                ErrorKind::Connection
            }
            ApiError::UnexpectedContentType { .. }
            | ApiError::JsonError(_)
            | ApiError::Conversion { .. }
            | ApiError::Config(_) => ErrorKind::Api,
        }
    }

    pub fn is_connection_error(&self) -> bool {
        self.kind() == ErrorKind::Connection
    }
}

impl error::Error for ApiError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ApiError::Connection {
                source: Some(e), ..
            } => Some(e.as_ref()),
            ApiError::JsonError(e) => Some(e.as_ref()),
            ApiError::Conversion { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Connection { message, source } => match source {
                Some(e) => write!(f, "{message} ({e})"),
                None => write!(f, "{message}"),
            },
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
            ApiError::UnexpectedContentType {
                content_type,
                response,
            } => write!(
                f,
                "{CONTENT_TYPE_MESSAGE} (Content-Type: '{content_type}', Response: '{response}')"
            ),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::Conversion { index, source } => {
                write!(f, "Could not convert record {}: {}", index, source)
            }
            ApiError::Config(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

/// Every transport level failure of reqwest is reported as communication error.
impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Connection {
            message: COMMUNICATION_MESSAGE,
            source: Some(Arc::new(e)),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_communication_messages_differ() {
        let timeout = ApiError::timeout();
        assert!(timeout.is_connection_error());
        assert_eq!(timeout.to_string(), TIMEOUT_MESSAGE);
        assert_ne!(TIMEOUT_MESSAGE, COMMUNICATION_MESSAGE);
    }

    #[test]
    fn error_kinds() {
        let invalid = ApiError::InvalidResponse {
            status_code: reqwest::StatusCode::NOT_FOUND,
            url: "https://opendata.duesseldorf.de/api/action/datastore/x".to_owned(),
            response: None,
        };
        assert_eq!(invalid.kind(), ErrorKind::Connection);

        let content_type = ApiError::UnexpectedContentType {
            content_type: "text/plain".to_owned(),
            response: "Goodmorning!".to_owned(),
        };
        assert_eq!(content_type.kind(), ErrorKind::Api);
        let text = content_type.to_string();
        assert!(text.contains("text/plain") && text.contains("Goodmorning!"));

        let why = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let conversion = ApiError::conversion(3, why);
        assert_eq!(conversion.kind(), ErrorKind::Api);
        assert!(conversion.to_string().starts_with("Could not convert record 3"));
    }
}
