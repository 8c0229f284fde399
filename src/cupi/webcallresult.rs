use std::fmt;

use crate::cupi::transport::Method;

/// Outcome of a single call against the Unity Connection REST interface.
///
/// Every remote operation builds one of these, whether it succeeded or not. A failed call keeps
/// the status code and the raw body verbatim so callers can show the server's own explanation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebCallResult {
    /// True only for a 2xx response whose body had the expected shape.
    pub success: bool,
    /// HTTP status code, or 0 when the call never reached the server.
    pub status_code: u16,
    /// Raw response body.
    pub response_text: String,
    /// Id of the resource produced by a create call.
    pub returned_object_id: String,
    /// `@total` reported by a list endpoint.
    pub total_object_count: usize,
    /// Client-side explanation for failures detected before or after the request.
    pub error_text: String,
    /// Method of the attempted call, if one was attempted.
    pub method: Option<Method>,
    /// Full url of the attempted call.
    pub url: String,
    /// Body sent with the attempted call.
    pub request_body: String,
}

impl WebCallResult {
    /// Failure detected before any request was issued.
    pub fn rejected(error_text: impl Into<String>) -> Self {
        Self {
            success: false,
            error_text: error_text.into(),
            ..Default::default()
        }
    }

    pub(crate) fn attempted(method: Method, url: &str, request_body: &str) -> Self {
        Self {
            method: Some(method),
            url: url.to_string(),
            request_body: request_body.to_string(),
            ..Default::default()
        }
    }

    /// Marks the result failed with a client-side explanation, keeping status and body.
    pub(crate) fn fail(mut self, error_text: impl Into<String>) -> Self {
        self.success = false;
        self.error_text = error_text.into();
        self
    }

    /// Short description of what was attempted, e.g. `GET https://cuc/vmrest/users`.
    pub fn attempted_operation(&self) -> String {
        match self.method {
            Some(method) => format!("{} {}", method, self.url),
            None => "no request issued".to_string(),
        }
    }
}

impl fmt::Display for WebCallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Success: {}", self.success)?;
        writeln!(f, "Operation: {}", self.attempted_operation())?;
        if !self.request_body.is_empty() {
            writeln!(f, "Request body: {}", self.request_body)?;
        }
        writeln!(f, "Status code: {}", self.status_code)?;
        if !self.error_text.is_empty() {
            writeln!(f, "Error: {}", self.error_text)?;
        }
        if !self.returned_object_id.is_empty() {
            writeln!(f, "Returned object id: {}", self.returned_object_id)?;
        }
        if self.total_object_count > 0 {
            writeln!(f, "Total object count: {}", self.total_object_count)?;
        }
        write!(f, "Response: {}", self.response_text)
    }
}

impl std::error::Error for WebCallResult {}

/// A successful call together with the value it produced.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub result: WebCallResult,
    pub value: T,
}

/// Result of an operation that produces a value.
pub type CallResult<T> = Result<Fetched<T>, WebCallResult>;
