use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::auth::credentials::Credentials;

/// HTTP verbs used by the provisioning interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// One request handed to a transport.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub credentials: Credentials,
    /// JSON body for POST/PUT.
    pub body: Option<String>,
}

/// Status and body text of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues raw HTTP calls for the connection server.
///
/// `Err` means the request never produced a response (connection refused, timeout, TLS failure).
/// Any response, including 4xx/5xx, is `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, String>;
}

/// Transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, accept_invalid_certs: bool) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, String> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };

        let mut builder = builder
            .header("Authorization", request.credentials.authorization_header())
            .header("Accept", "application/json");

        if let Some(body) = request.body {
            builder = builder.header("Content-Type", "application/json").body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| format!("Failed to read response body: {e}"))?;

        Ok(TransportResponse { status, body })
    }
}
