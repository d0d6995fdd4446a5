//! Outbound request values
//!
//! An [`ApiRequest`] is immutable once built. The retry guard lives in its
//! [`Attempt`]: a request can move from `Initial` to `Retried` exactly once,
//! and `retried_with` refuses to go further.

use memberdesk_domain::{impl_wire_enum_conversions, QueryPairs};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::errors::ApiError;

/// Per-call notification switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Show the body's `message` as a success notification
    pub show_success: bool,
    /// Hide the business-failure notification
    pub suppress_error: bool,
    /// Answer a 401 with refresh-and-retry. Off for the login call, where a
    /// 401 means bad credentials rather than a stale token.
    pub refresh_on_unauthorized: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { show_success: true, suppress_error: false, refresh_on_unauthorized: true }
    }
}

/// How many times this request has been transmitted after a 401
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attempt {
    #[default]
    Initial,
    Retried,
}

impl Attempt {
    /// The next attempt, or `None` once the single retry is spent.
    pub const fn retry(self) -> Option<Self> {
        match self {
            Self::Initial => Some(Self::Retried),
            Self::Retried => None,
        }
    }

    pub const fn is_retried(self) -> bool {
        matches!(self, Self::Retried)
    }
}

impl_wire_enum_conversions!(Attempt {
    Initial => "initial",
    Retried => "retried",
});

/// A request as handed to [`super::ApiClient::send`]
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    options: RequestOptions,
    attempt: Attempt,
    bearer: Option<String>,
}

impl ApiRequest {
    /// `path` is joined onto the base URL unless it is already absolute.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            options: RequestOptions::default(),
            attempt: Attempt::Initial,
            bearer: None,
        }
    }

    /// `GET path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT path`.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `DELETE path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Client(format!("Failed to serialize body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attach an already-encoded JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append one query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append every set field of a query struct.
    pub fn query_pairs(mut self, query: &impl QueryPairs) -> Self {
        self.query.extend(query.to_query_pairs());
        self
    }

    /// Replace every notification and refresh option at once.
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Skip the success notification.
    pub fn silent(mut self) -> Self {
        self.options.show_success = false;
        self
    }

    /// Skip the business-failure notification.
    pub fn suppress_error(mut self) -> Self {
        self.options.suppress_error = true;
        self
    }

    /// Report a 401 as a plain transport failure.
    pub fn without_refresh(mut self) -> Self {
        self.options.refresh_on_unauthorized = false;
        self
    }

    /// Use this token instead of the stored one.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// The same request, marked retried and carrying `token`.
    ///
    /// Returns `None` when the request was already retried.
    pub fn retried_with(self, token: impl Into<String>) -> Option<Self> {
        let attempt = self.attempt.retry()?;
        Some(Self { attempt, bearer: Some(token.into()), ..self })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn json_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn request_options(&self) -> RequestOptions {
        self.options
    }

    pub fn attempt(&self) -> Attempt {
        self.attempt
    }

    /// Token set with [`ApiRequest::bearer`] or by a retry.
    pub fn bearer_override(&self) -> Option<&str> {
        self.bearer.as_deref()
    }
}
