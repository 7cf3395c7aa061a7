use async_trait::async_trait;
use futures::{StreamExt, stream::BoxStream};
use lsv_core::RequestError;
use reqwest::{
    Client, StatusCode, Url,
    header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE},
};

use crate::sse::{EventStream, decode_stream};

pub const STREAM_LOGS_PATH: &str = "/stream_logs";
pub const CLEAR_LOGS_PATH: &str = "/clear_logs";
pub const RUN_SCRIPT_PATH: &str = "/run_script";

const EVENT_STREAM_MIME: &str = "text/event-stream";
const FORM_MIME: &str = "application/x-www-form-urlencoded";
const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// A response body nobody reads, polled only to keep
/// the connection open.
pub type BodyDrain = BoxStream<'static, ()>;

/// The answer to a run request.
///
/// The status is never used to decide anything; the body
/// is never inspected.
pub struct RunResponse {
    pub status: StatusCode,
    body: Option<BodyDrain>,
}

impl RunResponse {
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    #[must_use]
    pub fn with_body(status: StatusCode, body: BodyDrain) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    #[must_use]
    pub fn into_body(self) -> Option<BodyDrain> {
        self.body
    }
}

impl std::fmt::Debug for RunResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunResponse")
            .field("status", &self.status)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// The three endpoints of the log server.
#[async_trait]
pub trait LogBackend: Send + Sync {
    /// Opens a long-lived event stream of log lines.
    async fn open_stream(&self) -> Result<EventStream, RequestError>;

    /// Asks the server to clear its logs, returning whatever
    /// status it answered with.
    async fn clear_logs(&self) -> Result<StatusCode, RequestError>;

    /// Asks the server to run `script_name`.
    /// Resolves for any status, failing only if the request itself failed.
    async fn run_script(&self, script_name: &str) -> Result<RunResponse, RequestError>;
}

/// [`LogBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    stream_url: Url,
    clear_url: Url,
    run_url: Url,
}

impl HttpBackend {
    /// # Errors
    /// - `base_url` isn't an absolute `http(s)` URL
    /// - the HTTP client couldn't be set up
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        let client = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Self::with_client(client, base_url)
    }

    /// # Errors
    /// `base_url` isn't an absolute `http(s)` URL
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, RequestError> {
        let invalid = |reason: String| RequestError::InvalidUrl {
            url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", base.scheme())));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("not a base url".to_owned()));
        }
        // Endpoints are absolute paths, so they resolve against the
        // server root even if the base url has a path.
        let join = |path: &str| base.join(path).map_err(|err| invalid(err.to_string()));
        Ok(Self {
            stream_url: join(STREAM_LOGS_PATH)?,
            clear_url: join(CLEAR_LOGS_PATH)?,
            run_url: join(RUN_SCRIPT_PATH)?,
            client,
        })
    }
}

#[async_trait]
impl LogBackend for HttpBackend {
    async fn open_stream(&self) -> Result<EventStream, RequestError> {
        let response = self
            .client
            .get(self.stream_url.clone())
            .header(ACCEPT, EVENT_STREAM_MIME)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                code: status,
                url: self.stream_url.to_string(),
            });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|n| n.to_str().ok())
            .unwrap_or_default();
        if !is_event_stream(content_type) {
            return Err(RequestError::NotAnEventStream {
                url: self.stream_url.to_string(),
                content_type: content_type.to_owned(),
            });
        }

        Ok(decode_stream(response.bytes_stream()))
    }

    async fn clear_logs(&self) -> Result<StatusCode, RequestError> {
        let response = self.client.get(self.clear_url.clone()).send().await?;
        Ok(response.status())
    }

    async fn run_script(&self, script_name: &str) -> Result<RunResponse, RequestError> {
        let body = format!("script_name={}", urlencoding::encode(script_name));
        let response = self
            .client
            .post(self.run_url.clone())
            .header(CONTENT_TYPE, FORM_MIME)
            .body(body)
            .send()
            .await?;
        let status = response.status();
        Ok(RunResponse::with_body(
            status,
            response.bytes_stream().map(|_| ()).boxed(),
        ))
    }
}

/// Compares the MIME essence only, ignoring case and parameters.
fn is_event_stream(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(EVENT_STREAM_MIME))
}
