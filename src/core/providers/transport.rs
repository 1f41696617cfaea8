//! Timeout-bounded transport
//!
//! Every outbound vendor call goes through this module. A call is raced
//! against its deadline and the caller's cancellation token; whichever fires
//! first drops the in-flight future, which aborts the underlying request.

use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default budget for a single outbound call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw description of a failed outbound call, before classification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallFailure {
    /// No response was received (DNS, connect, reset, broken body stream)
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The vendor answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The call did not finish within its deadline
    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// A success response whose body could not be understood
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The caller cancelled the call
    #[error("Call cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl CallFailure {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Per-call bounds handed to a provider adapter
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Budget for the whole call, including any polling the adapter does
    pub timeout: Duration,
    /// Fires when the caller gives up on the request
    pub cancel: CancellationToken,
}

impl CallContext {
    pub fn new(timeout: Duration, cancel: CancellationToken) -> Self {
        Self { timeout, cancel }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_TIMEOUT, CancellationToken::new())
    }
}

/// Run `future` with a hard deadline and cancellation
///
/// The caller is never left waiting past `timeout`. Cancellation wins ties.
pub async fn with_deadline<F, T>(
    timeout: Duration,
    cancel: &CancellationToken,
    future: F,
) -> Result<T, CallFailure>
where
    F: Future<Output = Result<T, CallFailure>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Outbound call cancelled by caller");
            Err(CallFailure::Cancelled)
        }
        outcome = tokio::time::timeout(timeout, future) => match outcome {
            Ok(result) => result,
            Err(_) => {
                debug!(timeout_ms = timeout.as_millis() as u64, "Outbound call deadline exceeded");
                Err(CallFailure::DeadlineExceeded(timeout))
            }
        },
    }
}

/// Shared HTTP client with deadline-bounded request helpers
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a pooled client
    pub fn new(user_agent: &str) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Underlying client, for adapters that need to build requests
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// POST a JSON body and decode a JSON response
    pub async fn post_json<B, T>(
        &self,
        url: &str,
        bearer: Option<&str>,
        headers: &[(&str, &str)],
        body: &B,
        ctx: &CallContext,
    ) -> Result<T, CallFailure>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(self.client.post(url), bearer, headers).json(body);
        let bytes = self.execute(request, ctx).await?.1;
        decode_json(&bytes)
    }

    /// GET and decode a JSON response
    pub async fn get_json<T>(
        &self,
        url: &str,
        bearer: Option<&str>,
        headers: &[(&str, &str)],
        ctx: &CallContext,
    ) -> Result<T, CallFailure>
    where
        T: DeserializeOwned,
    {
        let request = self.request(self.client.get(url), bearer, headers);
        let bytes = self.execute(request, ctx).await?.1;
        decode_json(&bytes)
    }

    /// POST a JSON body and return the raw response with its content type
    pub async fn post_for_bytes<B>(
        &self,
        url: &str,
        bearer: Option<&str>,
        headers: &[(&str, &str)],
        body: &B,
        ctx: &CallContext,
    ) -> Result<(String, Bytes), CallFailure>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(self.client.post(url), bearer, headers).json(body);
        self.execute(request, ctx).await
    }

    fn request(
        &self,
        mut request: RequestBuilder,
        bearer: Option<&str>,
        headers: &[(&str, &str)],
    ) -> RequestBuilder {
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        request
    }

    /// Send and read the full body under one deadline
    async fn execute(
        &self,
        request: RequestBuilder,
        ctx: &CallContext,
    ) -> Result<(String, Bytes), CallFailure> {
        let timeout = ctx.timeout;
        with_deadline(timeout, &ctx.cancel, async move {
            let response = request
                .send()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;
            read_response(response, timeout).await
        })
        .await
    }
}

async fn read_response(response: Response, timeout: Duration) -> Result<(String, Bytes), CallFailure> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| map_reqwest_error(e, timeout))?;

    if !status.is_success() {
        return Err(CallFailure::Http {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    Ok((content_type, bytes))
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CallFailure> {
    serde_json::from_slice(bytes).map_err(|e| CallFailure::decode(e.to_string()))
}

/// Map a reqwest error onto the failure taxonomy
pub fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> CallFailure {
    // A connect timeout reports both; it is a connectivity failure, not the call deadline
    if err.is_connect() {
        CallFailure::Connect(err.to_string())
    } else if err.is_timeout() {
        CallFailure::DeadlineExceeded(timeout)
    } else if err.is_decode() {
        CallFailure::decode(err.to_string())
    } else if err.is_request() || err.is_body() {
        CallFailure::Connect(err.to_string())
    } else if let Some(status) = err.status() {
        CallFailure::Http {
            status: status.as_u16(),
            body: String::new(),
        }
    } else {
        CallFailure::other(err.to_string())
    }
}
