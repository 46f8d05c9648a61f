use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Url};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{ApiError, ClientConfig};

pub const USER_AGENT_VALUE: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// A connection session together with who is responsible for it.
#[derive(Debug, Clone)]
pub enum Session {
    /// Handed in by the caller, who keeps it alive and closes it.
    Borrowed(reqwest::Client),
    /// Created by the client on its first request, released on `close`.
    Owned(reqwest::Client),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOwnership {
    Borrowed,
    Owned,
}

impl Session {
    fn http(&self) -> &reqwest::Client {
        match self {
            Self::Borrowed(client) | Self::Owned(client) => client,
        }
    }

    pub fn ownership(&self) -> SessionOwnership {
        match self {
            Self::Borrowed(_) => SessionOwnership::Borrowed,
            Self::Owned(_) => SessionOwnership::Owned,
        }
    }
}

/// One call against the Open Data Platform.
///
/// `uri` is resolved relative to the base path, so `"search.json"` against
/// `/api/action/datastore/` requests `/api/action/datastore/search.json`.
/// Host and path default to the datastore API of the client config.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    uri: &'a str,
    host: Option<&'a str>,
    path: Option<&'a str>,
    method: Method,
    params: Vec<(&'a str, String)>,
}

impl<'a> Request<'a> {
    pub fn get(uri: &'a str) -> Self {
        Self {
            uri,
            host: None,
            path: None,
            method: Method::GET,
            params: Vec::new(),
        }
    }

    pub fn host(mut self, host: &'a str) -> Self {
        self.host = Some(host);
        self
    }

    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn param<V: ToString>(mut self, key: &'a str, value: V) -> Self {
        self.params.push((key, value.to_string()));
        self
    }
}

pub struct OdpDusseldorf {
    config: ClientConfig,
    session: RwLock<Option<Session>>,
}

impl OdpDusseldorf {
    /// The session is created with the first request.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            session: RwLock::new(None),
        }
    }

    /// Uses `session` for all requests; `close` leaves it open.
    pub fn with_session(config: ClientConfig, session: reqwest::Client) -> Self {
        Self {
            config,
            session: RwLock::new(Some(Session::Borrowed(session))),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn session_ownership(&self) -> Option<SessionOwnership> {
        self.session.read().await.as_ref().map(Session::ownership)
    }

    /// Releases the session if this client created it.
    pub async fn close(&self) {
        let mut session = self.session.write().await;
        if let Some(Session::Owned(_)) = *session {
            log::debug!("Closing owned session.");
            *session = None;
        }
    }

    async fn session(&self) -> Result<reqwest::Client, ApiError> {
        if let Some(session) = self.session.read().await.as_ref() {
            return Ok(session.http().clone());
        }

        /* another request may have created the session while we waited for the lock */
        let mut session = self.session.write().await;
        if let Some(existing) = session.as_ref() {
            return Ok(existing.http().clone());
        }
        let http = self.build_session()?;
        *session = Some(Session::Owned(http.clone()));
        Ok(http)
    }

    fn build_session(&self) -> Result<reqwest::Client, ApiError> {
        /* build a new http client with optional proxy */
        match &self.config.proxy {
            Some(proxy_url) => {
                log::debug!("Creating session using proxy '{proxy_url}'.");
                let proxy = reqwest::Proxy::all(proxy_url).map_err(|why| {
                    ApiError::Config(format!("invalid proxy '{proxy_url}': {why}"))
                })?;
                Ok(reqwest::Client::builder().proxy(proxy).build()?)
            }
            None => {
                log::debug!("Creating session.");
                Ok(reqwest::Client::new())
            }
        }
    }

    fn url(&self, request: &Request) -> Result<Url, ApiError> {
        let host = request.host.unwrap_or(&self.config.datastore_host);
        let path = request.path.unwrap_or(&self.config.datastore_path);
        let separator = if path.starts_with('/') { "" } else { "/" };
        let base = format!("{}://{}{}{}", self.config.scheme, host, separator, path);

        Url::parse(&base)
            .and_then(|url| url.join(request.uri))
            .map_err(|why| {
                ApiError::Config(format!("invalid url '{base}' + '{}': {why}", request.uri))
            })
    }

    /// Perform `request`, returning the decoded JSON body.
    ///
    /// Sending and reading the body together must finish within the
    /// configured request timeout.
    pub async fn request(&self, request: Request<'_>) -> Result<Value, ApiError> {
        let url = self.url(&request)?;
        let session = self.session().await?;
        log::debug!("Requesting '{url}' {:?}.", request.params);

        let call = async {
            let response = session
                .request(request.method.clone(), url.clone())
                .query(&request.params)
                .header(ACCEPT, JSON)
                .header(USER_AGENT, USER_AGENT_VALUE)
                .send()
                .await?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_owned();
            let body = response.bytes().await?;

            Ok::<_, ApiError>((status, content_type, body))
        };

        let (status, content_type, body) =
            match tokio::time::timeout(self.config.request_timeout, call).await {
                Ok(result) => result.inspect_err(|why| log::warn!("{url}: {why}"))?,
                Err(_) => {
                    log::warn!("{url}: no response within {:?}", self.config.request_timeout);
                    return Err(ApiError::timeout());
                }
            };

        /* parse response */
        if !status.is_success() {
            log::warn!("{url}: status {status}");
            return Err(ApiError::InvalidResponse {
                status_code: status,
                url: url.to_string(),
                response: String::from_utf8(body.to_vec()).ok(),
            });
        }

        if !content_type.contains(JSON) {
            return Err(ApiError::UnexpectedContentType {
                content_type,
                response: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
