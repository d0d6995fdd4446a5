//! Transport for admin API calls
//!
//! A thin layer over `reqwest::Client`. Whether a transmission may be resent
//! is decided per send by a [`RetryPolicy`]: the refresh call always goes
//! out once, and ordinary calls only resend safe methods, at most once.

use std::time::Duration;

use memberdesk_domain::constants::DEFAULT_TIMEOUT_SECS;
use memberdesk_domain::{ApiConfig, MemberdeskError};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

const DEFAULT_RESEND_DELAY: Duration = Duration::from_millis(200);

/// When a failed transmission may go out a second time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Transmit exactly once.
    #[default]
    Once,
    /// Resend a `GET`/`HEAD`/`OPTIONS` once after a connect or timeout
    /// failure or a 5xx, waiting `delay` first.
    ResendSafe {
        /// Pause before the resend
        delay: Duration,
    },
}

impl RetryPolicy {
    /// Policy for the `[api]` section: `max_attempts = 2` enables one resend.
    pub fn from_config(config: &ApiConfig) -> Self {
        if config.transport_attempts() > 1 {
            Self::ResendSafe { delay: DEFAULT_RESEND_DELAY }
        } else {
            Self::Once
        }
    }

    /// Delay before resending `method`, or `None` when it must not be resent.
    fn resend_delay(self, method: &Method) -> Option<Duration> {
        match self {
            Self::Once => None,
            Self::ResendSafe { delay } => is_safe(method).then_some(delay),
        }
    }
}

// PUT is left out: the swap endpoints are PUTs and a resend would undo them.
fn is_safe(method: &Method) -> bool {
    [Method::GET, Method::HEAD, Method::OPTIONS].contains(method)
}

fn worth_resending(outcome: &Result<Response, reqwest::Error>) -> bool {
    match outcome {
        Ok(response) => response.status().is_server_error(),
        Err(err) => err.is_timeout() || err.is_connect(),
    }
}

fn network_error(err: reqwest::Error) -> MemberdeskError {
    InfraError::from(err).into()
}

/// Shared HTTP transport
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    policy: RetryPolicy,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Transport with the default timeout that never resends.
    pub fn new() -> Result<Self, MemberdeskError> {
        Self::builder().build()
    }

    /// Transport configured from the `[api]` section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, MemberdeskError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .retry_policy(RetryPolicy::from_config(config))
            .user_agent(concat!("memberdesk/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    /// Policy applied by [`HttpClient::send`].
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Transmit under the configured policy.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, MemberdeskError> {
        self.send_with(builder, self.policy).await
    }

    /// Transmit exactly once, whatever the configured policy.
    pub async fn send_once(&self, builder: RequestBuilder) -> Result<Response, MemberdeskError> {
        self.send_with(builder, RetryPolicy::Once).await
    }

    async fn send_with(
        &self,
        builder: RequestBuilder,
        policy: RetryPolicy,
    ) -> Result<Response, MemberdeskError> {
        let request = builder.build().map_err(network_error)?;
        let method = request.method().clone();
        let url = request.url().clone();

        // Bodies that cannot be cloned are simply never resent.
        let resend = policy
            .resend_delay(&method)
            .and_then(|delay| request.try_clone().map(|copy| (delay, copy)));

        debug!(%method, %url, "sending HTTP request");
        let outcome = self.client.execute(request).await;

        let Some((delay, copy)) = resend.filter(|_| worth_resending(&outcome)) else {
            return outcome.map_err(network_error);
        };

        match &outcome {
            Ok(response) => warn!(%method, %url, status = %response.status(), "resending once"),
            Err(err) => warn!(%method, %url, error = %err, "resending once"),
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.client.execute(copy).await.map_err(network_error)
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    policy: RetryPolicy,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            policy: RetryPolicy::Once,
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    /// Whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resend policy for [`HttpClient::send`] (default [`RetryPolicy::Once`]).
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// `User-Agent` header value.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<HttpClient, MemberdeskError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(network_error)?;
        Ok(HttpClient { client, policy: self.policy })
    }
}
