use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSecondsWithFrac};

use crate::ApiError;

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_DATASTORE_HOST: &str = "opendata.duesseldorf.de";
pub const DEFAULT_DATASTORE_PATH: &str = "/api/action/datastore/";
pub const DEFAULT_GEOSERVICE_HOST: &str = "maps.duesseldorf.de";
pub const DEFAULT_GEOSERVICE_PATH: &str = "/services/verkehr/wfs";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const TIMEOUT_ENV: &str = "ODP_DUSSELDORF_TIMEOUT";
pub const PROXY_ENV: &str = "ODP_DUSSELDORF_PROXY";

/// Where and how the client talks to the Open Data Platform.
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub scheme: String,

    /// host of the datastore search API (garages, park and ride)
    pub datastore_host: String,
    pub datastore_path: String,

    /// host of the WFS geoservice (disabled parking)
    pub geoservice_host: String,
    pub geoservice_path: String,

    /// Upper bound for connecting, sending and reading the whole body.
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub request_timeout: Duration,

    /// Only used for sessions the client creates itself.
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_owned(),
            datastore_host: DEFAULT_DATASTORE_HOST.to_owned(),
            datastore_path: DEFAULT_DATASTORE_PATH.to_owned(),
            geoservice_host: DEFAULT_GEOSERVICE_HOST.to_owned(),
            geoservice_path: DEFAULT_GEOSERVICE_PATH.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            proxy: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `ODP_DUSSELDORF_TIMEOUT` (seconds) and
    /// `ODP_DUSSELDORF_PROXY` when set.
    pub fn env() -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Ok(timeout) = env::var(TIMEOUT_ENV) {
            config.request_timeout = parse_timeout(&timeout)?;
        }
        if let Ok(proxy) = env::var(PROXY_ENV) {
            config.proxy = Some(proxy).filter(|proxy| !proxy.is_empty());
        }

        Ok(config)
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Points both APIs at one plain http host, e.g. a local mock server.
    pub fn with_base_url(mut self, scheme: &str, host: &str) -> Self {
        self.scheme = scheme.to_owned();
        self.datastore_host = host.to_owned();
        self.geoservice_host = host.to_owned();
        self
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ApiError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
        .ok_or_else(|| {
            ApiError::Config(format!("{TIMEOUT_ENV} must be a number of seconds, got '{value}'"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_duesseldorf() {
        let config = ClientConfig::default();
        assert_eq!(config.scheme, "https");
        assert_eq!(config.datastore_host, "opendata.duesseldorf.de");
        assert_eq!(config.datastore_path, "/api/action/datastore/");
        assert_eq!(config.geoservice_host, "maps.duesseldorf.de");
        assert_eq!(config.request_timeout, Duration::from_secs_f64(10.0));
        assert_eq!(config.proxy, None);
    }

    #[test]
    fn deserialize_partial_config() {
        let config: ClientConfig = serde_json::from_str(
            r#"{ "requestTimeout": 0.5, "proxy": "http://localhost:3128" }"#,
        )
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_millis(500));
        assert_eq!(config.proxy.as_deref(), Some("http://localhost:3128"));
        assert_eq!(config.datastore_host, DEFAULT_DATASTORE_HOST);
    }

    #[test]
    fn serialize_skips_missing_proxy() {
        let json = serde_json::to_value(ClientConfig::default()).unwrap();
        assert_eq!(json["requestTimeout"], 10.0);
        assert!(json.get("proxy").is_none());
    }

    #[test]
    fn timeout_values() {
        assert_eq!(parse_timeout("2.5").unwrap(), Duration::from_millis(2500));
        assert_eq!(parse_timeout(" 10 ").unwrap(), Duration::from_secs(10));
        assert!(matches!(parse_timeout("ten"), Err(ApiError::Config(_))));
        assert!(matches!(parse_timeout("-1"), Err(ApiError::Config(_))));
    }
}
