//! Shared HTTP transport, response classification, and CLI error types.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use repoflow_api_models::{ErrorBody, ErrorList};
use repoflow_config::ConfigError;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, RenderError};
use crate::output::OutputFormat;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const APPLICATION_JSON: &str = "application/json";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        Self::failure(error)
    }
}

impl From<RenderError> for CliError {
    fn from(error: RenderError) -> Self {
        Self::failure(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::InvalidUrl { .. } => Self::validation(format!("{:#}", anyhow!(error))),
            other => Self::failure(other),
        }
    }
}

/// Application context passed to command handlers.
#[derive(Clone, Debug)]
pub(crate) struct AppContext {
    pub(crate) api: ApiClient,
    pub(crate) output: OutputFormat,
}

/// Client for the `RepoFlow` API rooted at a configured base URL.
///
/// Every request carries `Accept: application/json`, the bearer token when
/// one is configured, and the invocation's request identifier.
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Construct a client with the shared timeout and request-id header.
    pub(crate) fn new(base_url: Url, token: Option<String>, trace_id: &str) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(default_headers)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Append path segments to the base URL, keeping any base path prefix.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Perform one request and read the whole response body.
    pub(crate) async fn send<P>(
        &self,
        method: Method,
        segments: &[&str],
        payload: Option<&P>,
    ) -> Result<Exchange, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, APPLICATION_JSON);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        tracing::debug!(method = %method, url = %url, "sending API request");
        let transport = |source| ApiError::Transport {
            method: method.clone(),
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;

        Ok(Exchange::new(method, url.to_string(), status, body.to_vec()))
    }

    /// Send, classify, then decode the body of a successful response.
    pub(crate) async fn call<T, P>(
        &self,
        method: Method,
        segments: &[&str],
        payload: Option<&P>,
        what: &'static str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let exchange = self.send(method, segments, payload).await?;
        classify_response(&exchange)?;
        exchange.decode(what)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        what: &'static str,
    ) -> Result<T, ApiError> {
        self.call(Method::GET, segments, None::<&()>, what).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        what: &'static str,
    ) -> Result<T, ApiError> {
        self.call(Method::DELETE, segments, None::<&()>, what).await
    }

    pub(crate) async fn post<T, P>(
        &self,
        segments: &[&str],
        payload: &P,
        what: &'static str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.call(Method::POST, segments, Some(payload), what).await
    }
}

/// A completed request: its target, the status, and the buffered body.
#[derive(Debug, Clone)]
pub(crate) struct Exchange {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) status: StatusCode,
    body: Vec<u8>,
}

impl Exchange {
    pub(crate) const fn new(
        method: Method,
        url: String,
        status: StatusCode,
        body: Vec<u8>,
    ) -> Self {
        Self {
            method,
            url,
            status,
            body,
        }
    }

    pub(crate) fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decode the body as JSON. An empty body decodes as `null`.
    pub(crate) fn decode<T: DeserializeOwned>(&self, what: &'static str) -> Result<T, ApiError> {
        let bytes: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(bytes).map_err(|source| ApiError::Decode { what, source })
    }
}

/// Classify a completed exchange as success or an [`ApiError`].
///
/// Statuses below 400 succeed. Error bodies are tried as a single
/// `{code, message}` document, then as an `{errors: [...]}` list, before
/// falling back to the status line.
pub(crate) fn classify_response(exchange: &Exchange) -> Result<(), ApiError> {
    tracing::debug!(
        method = %exchange.method,
        url = %exchange.url,
        status = exchange.status.as_u16(),
        payload = %String::from_utf8_lossy(exchange.body()),
        "API response received"
    );

    if exchange.status.as_u16() < 400 {
        return Ok(());
    }

    let status = exchange.status.as_u16();
    if let Ok(body) = serde_json::from_slice::<ErrorBody>(exchange.body())
        && !body.message.is_empty()
    {
        return Err(ApiError::Api {
            status,
            code: body.code,
            message: body.message,
        });
    }
    if let Ok(list) = serde_json::from_slice::<ErrorList>(exchange.body())
        && !list.errors.is_empty()
    {
        return Err(ApiError::Errors {
            status,
            messages: list.errors,
        });
    }
    Err(ApiError::Status {
        status: exchange.status,
    })
}
