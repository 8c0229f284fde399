use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use uuid::Uuid;

use crate::LogLevel;
use crate::auth::credentials::Credentials;
use crate::cupi::entity::Record;
use crate::cupi::entitydescriptor::EntityDescriptor;
use crate::cupi::error::ResolutionError;
use crate::cupi::parse::{
    PropertyDiagnostic, parse_total_count, populate_list_from_json, populate_record_from_json,
};
use crate::cupi::query::{QueryClauses, build_url};
use crate::cupi::transport::{HttpTransport, Method, ReqwestTransport, TransportRequest};
use crate::cupi::webcallresult::{CallResult, Fetched, WebCallResult};

const DEFAULT_PORT: u16 = 8443;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Receives every mapper diagnostic produced by calls on a server.
pub type DiagnosticSink = Arc<dyn Fn(&PropertyDiagnostic) + Send + Sync>;

/// Per-server settings. Replaces process-wide debug switches.
#[derive(Clone)]
pub struct ServerOptions {
    pub log_level: LogLevel,
    pub timeout: Duration,
    /// Unity Connection ships with a self-signed certificate.
    pub accept_invalid_certs: bool,
    /// Rows requested per page by [`ConnectionServer::get_all_records`].
    pub page_size: u32,
    pub diagnostic_sink: Option<DiagnosticSink>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
            page_size: DEFAULT_PAGE_SIZE,
            diagnostic_sink: None,
        }
    }
}

impl ServerOptions {
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_diagnostic_sink(mut self, sink: DiagnosticSink) -> Self {
        self.diagnostic_sink = Some(sink);
        self
    }
}

impl fmt::Debug for ServerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerOptions")
            .field("log_level", &self.log_level)
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("page_size", &self.page_size)
            .field("diagnostic_sink", &self.diagnostic_sink.is_some())
            .finish()
    }
}

/// Which credential of a user to reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Pin,
    Password,
}

impl CredentialKind {
    fn path_segment(&self) -> &'static str {
        match self {
            CredentialKind::Pin => "pin",
            CredentialKind::Password => "password",
        }
    }
}

/// Product version reported by `/vmrest/version/product`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub rev: u32,
    pub build: u32,
    pub raw: String,
}

impl ServerVersion {
    /// Parse `12.5.1.11900-57` style version strings. Missing parts are 0.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw
            .trim()
            .split(['.', '-'])
            .map(|part| part.trim().parse::<u32>());

        let major = parts.next()?.ok()?;
        let mut next = || parts.next().and_then(Result::ok).unwrap_or(0);

        Some(ServerVersion {
            major,
            minor: next(),
            rev: next(),
            build: next(),
            raw: raw.trim().to_string(),
        })
    }

    pub fn is_at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

#[derive(Debug, Deserialize)]
struct ProductVersion {
    version: String,
}

/// True when `text` is shaped like a CUPI object id (a GUID, braces optional).
pub fn is_object_id(text: &str) -> bool {
    Uuid::parse_str(bare_object_id(text)).is_ok()
}

/// Object id as it goes into a resource url: no surrounding whitespace or braces.
fn bare_object_id(text: &str) -> &str {
    text.trim().trim_matches(|ch| ch == '{' || ch == '}').trim()
}

/// Client for one Unity Connection server's provisioning interface.
///
/// Every operation is a single request. Failures come back as a [`WebCallResult`] with
/// `success == false`; nothing is retried.
pub struct ConnectionServer {
    transport: Option<Arc<dyn HttpTransport>>,
    base_url: String,
    credentials: Credentials,
    options: ServerOptions,
}

impl ConnectionServer {
    /// Connect to `server_name` (host name, or a full `https://host:port` url) over HTTPS.
    pub fn new(
        server_name: &str,
        login: &str,
        password: &str,
        options: ServerOptions,
    ) -> Result<Self, String> {
        if server_name.trim().is_empty() {
            return Err("Empty server name passed".to_string());
        }

        let credentials = Credentials::new(login, password);
        if credentials.is_blank() {
            return Err("Empty login or password passed".to_string());
        }

        let transport = ReqwestTransport::new(options.timeout, options.accept_invalid_certs)?;

        Ok(Self::with_transport(
            &base_url_for(server_name),
            credentials,
            Arc::new(transport),
            options,
        ))
    }

    /// Use a caller-supplied transport, e.g. [`CannedTransport`](crate::cupi::cannedtransport::CannedTransport).
    pub fn with_transport(
        base_url: &str,
        credentials: Credentials,
        transport: Arc<dyn HttpTransport>,
        options: ServerOptions,
    ) -> Self {
        Self {
            transport: Some(transport),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            options,
        }
    }

    /// A server with no transport. Every operation fails before touching the network.
    pub fn detached(base_url: &str, credentials: Credentials, options: ServerOptions) -> Self {
        Self {
            transport: None,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            options,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn options(&self) -> &ServerOptions {
        &self.options
    }

    fn is_debug(&self) -> bool {
        matches!(self.options.log_level, LogLevel::Debug)
    }

    fn resource_url(
        &self,
        descriptor: &'static EntityDescriptor,
        parent: Option<&str>,
    ) -> Result<String, WebCallResult> {
        let path = descriptor.path(parent).map_err(WebCallResult::rejected)?;
        Ok(format!("{}/{}", self.base_url, path))
    }

    fn report(&self, diagnostics: &[PropertyDiagnostic]) {
        if let Some(sink) = &self.options.diagnostic_sink {
            for diagnostic in diagnostics {
                (sink.as_ref())(diagnostic);
            }
        }
    }

    /// Issue one request and classify the response by status.
    async fn send(&self, method: Method, url: &str, body: Option<String>) -> WebCallResult {
        let mut result =
            WebCallResult::attempted(method, url, body.as_deref().unwrap_or_default());

        let Some(transport) = &self.transport else {
            return result.fail("No transport configured for the connection server");
        };

        if self.is_debug() {
            log::debug!("{} {}", method, url);
            if let Some(body) = &body {
                log::debug!("Body: {}", body);
            }
        }

        let request = TransportRequest {
            method,
            url: url.to_string(),
            credentials: self.credentials.clone(),
            body,
        };

        let response = match transport.request(request).await {
            Ok(response) => response,
            Err(e) => {
                log::info!("{} {} failed: {}", method, url, e);
                return result.fail(e);
            }
        };

        result.status_code = response.status;
        result.success = response.is_success();
        result.response_text = response.body;

        if self.is_debug() {
            log::debug!("Status: {}", result.status_code);
            log::debug!("Response: {}", result.response_text);
        }

        if !result.success {
            log::info!("{} {} returned {}", method, url, result.status_code);
            let error_text = format!("Unity Connection API error ({})", result.status_code);
            return result.fail(error_text);
        }

        result
    }

    /// Fetch one record by object id.
    pub async fn get_record(
        &self,
        descriptor: &'static EntityDescriptor,
        parent: Option<&str>,
        object_id: &str,
    ) -> CallResult<Record> {
        let object_id = bare_object_id(object_id);
        if object_id.is_empty() {
            return Err(WebCallResult::rejected(format!(
                "Empty object id passed for {}",
                descriptor.type_name
            )));
        }

        let url = format!("{}/{}", self.resource_url(descriptor, parent)?, object_id);
        let result = self.send(Method::Get, &url, None).await;
        if !result.success {
            return Err(result);
        }

        let populated = match populate_record_from_json(&result.response_text, descriptor) {
            Ok(populated) => populated,
            Err(e) => return Err(result.fail(e)),
        };
        self.report(&populated.diagnostics);

        let mut record = populated.value;
        if let Some(parent) = parent {
            record = record.with_parent(parent);
        }

        Ok(Fetched {
            result,
            value: record,
        })
    }

    /// Fetch one page (or the server's default page) of records matching the clauses.
    ///
    /// Zero matches is a success with an empty list. A body that cannot be read as a list is
    /// also an empty list; only the HTTP status decides failure here.
    pub async fn get_records(
        &self,
        descriptor: &'static EntityDescriptor,
        parent: Option<&str>,
        clauses: &QueryClauses,
    ) -> CallResult<Vec<Record>> {
        let url = build_url(&self.resource_url(descriptor, parent)?, clauses);
        let mut result = self.send(Method::Get, &url, None).await;
        if !result.success {
            return Err(result);
        }

        let populated = populate_list_from_json(&result.response_text, descriptor);
        self.report(&populated.diagnostics);

        let mut records = populated.value;
        if let Some(parent) = parent {
            records = records
                .into_iter()
                .map(|record| record.with_parent(parent))
                .collect();
        }

        result.total_object_count = match parse_total_count(&result.response_text) {
            0 => records.len(),
            total => total,
        };

        Ok(Fetched {
            result,
            value: records,
        })
    }

    /// Walk every page of a collection. Any paging clauses passed in are replaced.
    pub async fn get_all_records(
        &self,
        descriptor: &'static EntityDescriptor,
        parent: Option<&str>,
        clauses: &QueryClauses,
    ) -> CallResult<Vec<Record>> {
        let base = clauses.without("rowsPerPage").without("pageNumber");
        let page_size = self.options.page_size.max(1);

        let mut page = 1;
        let mut records: Vec<Record> = vec![];

        loop {
            let paged = base.clone().rows_per_page(page_size).page_number(page);

            if self.is_debug() {
                log::debug!("Fetch {} page: {}", descriptor.type_name, page);
            }

            let fetched = self.get_records(descriptor, parent, &paged).await?;
            let returned = fetched.value.len();
            // 0 when the page carries no `@total`; paging then runs until a short page.
            let total = parse_total_count(&fetched.result.response_text);
            records.extend(fetched.value);

            let complete = total > 0 && records.len() >= total;
            if returned == 0 || returned < page_size as usize || complete {
                let mut result = fetched.result;
                result.total_object_count = total.max(records.len());
                return Ok(Fetched {
                    result,
                    value: records,
                });
            }

            page += 1;
        }
    }

    /// Number of records matching the clauses, read from `@total`.
    pub async fn get_record_count(
        &self,
        descriptor: &'static EntityDescriptor,
        parent: Option<&str>,
        clauses: &QueryClauses,
    ) -> CallResult<usize> {
        let base = clauses.without("rowsPerPage").without("pageNumber");
        let fetched = self
            .get_records(descriptor, parent, &base.rows_per_page(1).page_number(1))
            .await?;

        let count = fetched.result.total_object_count;
        Ok(Fetched {
            result: fetched.result,
            value: count,
        })
    }

    /// Create a resource from the pending changes of a new record.
    ///
    /// Extra clauses carry creation parameters such as `templateAlias=voicemailusertemplate`.
    /// The new id is in `returned_object_id`.
    pub async fn add_record(
        &self,
        record: &Record,
        clauses: &QueryClauses,
    ) -> Result<WebCallResult, WebCallResult> {
        let descriptor = record.descriptor();
        if record.pending_changes().is_empty() {
            return Err(WebCallResult::rejected(format!(
                "No fields provided for new {}",
                descriptor.type_name
            )));
        }

        let url = build_url(&self.resource_url(descriptor, record.parent())?, clauses);
        let body = record.patch_document().to_string();
        let mut result = self.send(Method::Post, &url, Some(body)).await;
        if !result.success {
            return Err(result);
        }

        result.returned_object_id = returned_object_id(&result.response_text);
        Ok(result)
    }

    /// Save the pending changes of a fetched record. Only changed fields are sent.
    pub async fn update_record(&self, record: &mut Record) -> Result<WebCallResult, WebCallResult> {
        let descriptor = record.descriptor();
        let Some(object_id) = record.object_id().map(str::to_string) else {
            return Err(WebCallResult::rejected(format!(
                "Empty object id on {} record",
                descriptor.type_name
            )));
        };

        if record.pending_changes().is_empty() {
            return Err(WebCallResult::rejected(format!(
                "Update called for {} {} but there are no pending changes",
                descriptor.type_name, object_id
            )));
        }

        let url = format!(
            "{}/{}",
            self.resource_url(descriptor, record.parent())?,
            object_id
        );
        let body = record.patch_document().to_string();
        let result = self.send(Method::Put, &url, Some(body)).await;
        if !result.success {
            return Err(result);
        }

        record.commit_pending_changes();
        Ok(result)
    }

    /// Delete a resource by object id.
    pub async fn delete_record(
        &self,
        descriptor: &'static EntityDescriptor,
        parent: Option<&str>,
        object_id: &str,
    ) -> Result<WebCallResult, WebCallResult> {
        let object_id = bare_object_id(object_id);
        if object_id.is_empty() {
            return Err(WebCallResult::rejected(format!(
                "Empty object id passed for {}",
                descriptor.type_name
            )));
        }

        let url = format!("{}/{}", self.resource_url(descriptor, parent)?, object_id);
        let result = self.send(Method::Delete, &url, None).await;
        if !result.success {
            return Err(result);
        }
        Ok(result)
    }

    /// Resolve `identifier` to exactly one record: by object id when it is GUID-shaped, by
    /// the descriptor's lookup field otherwise.
    pub async fn bind(
        &self,
        descriptor: &'static EntityDescriptor,
        parent: Option<&str>,
        identifier: &str,
    ) -> Result<Record, ResolutionError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ResolutionError::MissingIdentifier {
                type_name: descriptor.type_name,
            });
        }

        if is_object_id(identifier) {
            return match self.get_record(descriptor, parent, identifier).await {
                Ok(fetched) => Ok(fetched.value),
                Err(result) if result.status_code == 404 => Err(ResolutionError::NotFound {
                    type_name: descriptor.type_name,
                    identifier: identifier.to_string(),
                }),
                Err(result) => Err(ResolutionError::Call {
                    type_name: descriptor.type_name,
                    result: Box::new(result),
                }),
            };
        }

        let Some(lookup_field) = descriptor.lookup_field else {
            return Err(ResolutionError::NoLookupField {
                type_name: descriptor.type_name,
            });
        };

        let clauses = QueryClauses::new().query(&format!("({} is {})", lookup_field, identifier));
        let mut records = self
            .get_records(descriptor, parent, &clauses)
            .await
            .map_err(|result| ResolutionError::Call {
                type_name: descriptor.type_name,
                result: Box::new(result),
            })?
            .value;

        match records.len() {
            1 => Ok(records.remove(0)),
            0 => Err(ResolutionError::NotFound {
                type_name: descriptor.type_name,
                identifier: identifier.to_string(),
            }),
            count => Err(ResolutionError::Ambiguous {
                type_name: descriptor.type_name,
                identifier: identifier.to_string(),
                count,
            }),
        }
    }

    /// Reset a user's phone PIN or web password.
    pub async fn reset_user_credential(
        &self,
        user_object_id: &str,
        kind: CredentialKind,
        new_value: &str,
    ) -> Result<WebCallResult, WebCallResult> {
        let user_object_id = user_object_id.trim();
        if user_object_id.is_empty() {
            return Err(WebCallResult::rejected("Empty user object id passed"));
        }
        if new_value.is_empty() {
            return Err(WebCallResult::rejected(format!(
                "Empty {} passed",
                kind.path_segment()
            )));
        }

        let url = format!(
            "{}/users/{}/credential/{}",
            self.base_url,
            user_object_id,
            kind.path_segment()
        );
        let body = serde_json::json!({ "Credentials": new_value }).to_string();
        let mut result = self.send(Method::Put, &url, Some(body)).await;

        // Never keep the new secret around in the result.
        result.request_body.clear();
        if !result.success {
            return Err(result);
        }
        Ok(result)
    }

    /// Read the server's product version.
    pub async fn fetch_version(&self) -> CallResult<ServerVersion> {
        let url = format!("{}/version/product", self.base_url);
        let result = self.send(Method::Get, &url, None).await;
        if !result.success {
            return Err(result);
        }

        let product: ProductVersion = match serde_json::from_str(&result.response_text) {
            Ok(product) => product,
            Err(e) => return Err(result.fail(format!("Failed to parse JSON: {e}"))),
        };

        match ServerVersion::parse(&product.version) {
            Some(version) => Ok(Fetched {
                result,
                value: version,
            }),
            None => {
                let error_text = format!("Unrecognised version string: {}", product.version);
                Err(result.fail(error_text))
            }
        }
    }
}

impl Record {
    /// Bind to an existing resource by object id or lookup name.
    pub async fn bind(
        server: &ConnectionServer,
        descriptor: &'static EntityDescriptor,
        identifier: &str,
    ) -> Result<Record, ResolutionError> {
        server.bind(descriptor, None, identifier).await
    }

    /// Create a new resource from this record's pending changes.
    pub async fn create(
        &self,
        server: &ConnectionServer,
        clauses: &QueryClauses,
    ) -> Result<WebCallResult, WebCallResult> {
        server.add_record(self, clauses).await
    }

    /// Save pending changes.
    pub async fn save(&mut self, server: &ConnectionServer) -> Result<WebCallResult, WebCallResult> {
        server.update_record(self).await
    }

    /// Re-read the record from the server, dropping pending changes.
    pub async fn refetch(&mut self, server: &ConnectionServer) -> Result<WebCallResult, WebCallResult> {
        let Some(object_id) = self.object_id().map(str::to_string) else {
            return Err(WebCallResult::rejected(format!(
                "Empty object id on {} record",
                self.descriptor().type_name
            )));
        };

        let parent = self.parent().map(str::to_string);
        let fetched = server
            .get_record(self.descriptor(), parent.as_deref(), &object_id)
            .await?;
        *self = fetched.value;
        Ok(fetched.result)
    }

    /// Delete the resource. The record is consumed either way.
    pub async fn delete(self, server: &ConnectionServer) -> Result<WebCallResult, WebCallResult> {
        let object_id = self.object_id().unwrap_or_default().to_string();
        server
            .delete_record(self.descriptor(), self.parent(), &object_id)
            .await
    }
}

fn base_url_for(server_name: &str) -> String {
    let server_name = server_name.trim().trim_end_matches('/');
    if server_name.starts_with("http://") || server_name.starts_with("https://") {
        if server_name.ends_with("/vmrest") {
            return server_name.to_string();
        }
        return format!("{}/vmrest", server_name);
    }
    format!("https://{}:{}/vmrest", server_name, DEFAULT_PORT)
}

/// Pull the new object id out of a create response (`/vmrest/users/<id>`).
pub(crate) fn returned_object_id(response_text: &str) -> String {
    let text = response_text.trim().trim_matches('"');
    let candidate = text
        .rsplit('/')
        .find(|segment| !segment.trim().is_empty())
        .unwrap_or_default()
        .trim();

    if text.contains('/') || is_object_id(candidate) {
        candidate.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::cupi::cannedtransport::CannedTransport;
    use crate::cupi::entities::{NOTIFICATION_DEVICE, USER};

    const BASE: &str = "https://cuc.test:8443/vmrest";
    const USER_ID: &str = "4f3a2b1c-0000-4000-8000-000000000001";

    fn server(transport: Arc<CannedTransport>, options: ServerOptions) -> ConnectionServer {
        ConnectionServer::with_transport(
            BASE,
            Credentials::new("admin", "secret"),
            transport,
            options,
        )
    }

    #[test]
    fn base_url_defaults_to_https_8443() {
        assert_eq!(base_url_for("cuc.test"), "https://cuc.test:8443/vmrest");
        assert_eq!(base_url_for("https://cuc.test:443/"), "https://cuc.test:443/vmrest");
        assert_eq!(base_url_for("http://cuc.test/vmrest"), "http://cuc.test/vmrest");
    }

    #[test]
    fn returned_object_id_from_uri() {
        assert_eq!(returned_object_id(&format!("/vmrest/users/{}", USER_ID)), USER_ID);
        assert_eq!(returned_object_id(USER_ID), USER_ID);
        assert_eq!(returned_object_id(""), "");
        assert_eq!(returned_object_id("created"), "");
    }

    #[test]
    fn version_parsing() {
        let version = ServerVersion::parse("12.5.1.11900-57").unwrap();
        assert_eq!((version.major, version.minor, version.rev, version.build), (12, 5, 1, 11900));
        assert!(version.is_at_least(12, 0));
        assert!(!version.is_at_least(14, 0));
        assert!(ServerVersion::parse("unknown").is_none());
    }

    #[test]
    fn object_id_detection() {
        assert!(is_object_id(USER_ID));
        assert!(is_object_id(&format!("{{{}}}", USER_ID)));
        assert!(!is_object_id("jdoe"));
    }

    #[tokio::test]
    async fn detached_server_fails_without_request() {
        let server = ConnectionServer::detached(
            BASE,
            Credentials::new("admin", "secret"),
            ServerOptions::default(),
        );

        let result = server.get_record(&USER, None, USER_ID).await.unwrap_err();
        assert!(!result.success);
        assert_eq!(result.status_code, 0);
        assert!(result.error_text.contains("No transport"));
    }

    #[tokio::test]
    async fn blank_object_id_is_rejected_before_request() {
        let transport = Arc::new(CannedTransport::new());
        let server = server(transport.clone(), ServerOptions::default());

        let result = server.get_record(&USER, None, "  ").await.unwrap_err();
        assert!(!result.success);
        assert_eq!(result.method, None);
        assert_eq!(transport.request_count().await, 0);
    }

    #[tokio::test]
    async fn braced_object_id_is_stripped_from_url() {
        let transport = Arc::new(CannedTransport::new());
        transport
            .respond(Method::Get, "/users/", 200, r#"{"Alias":"jdoe"}"#)
            .await;
        transport.respond(Method::Delete, "/users/", 204, "").await;

        let server = server(transport.clone(), ServerOptions::default());
        let braced = format!("{{{}}}", USER_ID);
        let record = server.bind(&USER, None, &braced).await.unwrap();
        assert_eq!(record.get_str("Alias"), Some("jdoe"));
        server.delete_record(&USER, None, &braced).await.unwrap();

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2);
        for request in requests {
            assert_eq!(request.url, format!("{}/users/{}", BASE, USER_ID));
        }
    }

    #[tokio::test]
    async fn paging_without_total_runs_to_short_page() {
        let transport = Arc::new(CannedTransport::new());
        transport
            .enqueue(200, r#"[{"Alias":"a"},{"Alias":"b"}]"#)
            .await;
        transport.enqueue(200, r#"[{"Alias":"c"}]"#).await;

        let server = server(transport.clone(), ServerOptions::default().with_page_size(2));
        let fetched = server
            .get_all_records(&USER, None, &QueryClauses::new())
            .await
            .unwrap();

        let aliases = fetched
            .value
            .iter()
            .filter_map(|user| user.get_str("Alias"))
            .collect::<Vec<&str>>();
        assert_eq!(aliases, vec!["a", "b", "c"]);
        assert_eq!(fetched.result.total_object_count, 3);
        assert_eq!(transport.request_count().await, 2);
    }

    #[tokio::test]
    async fn nested_descriptor_requires_parent() {
        let transport = Arc::new(CannedTransport::new());
        let server = server(transport.clone(), ServerOptions::default());

        let result = server
            .get_records(&NOTIFICATION_DEVICE, None, &QueryClauses::new())
            .await
            .unwrap_err();
        assert!(result.error_text.contains("parent"));
        assert_eq!(transport.request_count().await, 0);
    }

    #[tokio::test]
    async fn diagnostics_reach_the_sink() {
        let transport = Arc::new(CannedTransport::new());
        transport
            .respond(Method::Get, "/users/", 200, r#"{"Alias":"jdoe","Brand":"new"}"#)
            .await;

        let seen = Arc::new(Mutex::new(vec![]));
        let sink_seen = seen.clone();
        let options = ServerOptions::default().with_diagnostic_sink(Arc::new(move |d: &PropertyDiagnostic| {
            sink_seen.lock().unwrap().push(d.field_name.clone());
        }));

        let server = server(transport, options);
        let fetched = server.get_record(&USER, None, USER_ID).await.unwrap();

        assert_eq!(fetched.value.get_str("Alias"), Some("jdoe"));
        assert_eq!(*seen.lock().unwrap(), vec!["Brand".to_string()]);
    }

    #[tokio::test]
    async fn requests_carry_basic_auth() {
        let transport = Arc::new(CannedTransport::new());
        transport.respond(Method::Get, "/users", 200, r#"{"@total":"0"}"#).await;

        let server = server(transport.clone(), ServerOptions::default());
        server
            .get_records(&USER, None, &QueryClauses::new())
            .await
            .unwrap();

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, format!("{}/users", BASE));
        assert_eq!(
            requests[0].credentials.authorization_header(),
            "Basic YWRtaW46c2VjcmV0"
        );
    }

    #[tokio::test]
    async fn credential_reset_hides_secret() {
        let transport = Arc::new(CannedTransport::new());
        transport.respond(Method::Put, "/credential/pin", 204, "").await;

        let server = server(transport.clone(), ServerOptions::default());
        let result = server
            .reset_user_credential(USER_ID, CredentialKind::Pin, "24680")
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.request_body.is_empty());
        let requests = transport.requests().await;
        assert_eq!(
            requests[0].url,
            format!("{}/users/{}/credential/pin", BASE, USER_ID)
        );
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"Credentials":"24680"}"#));
    }

    #[tokio::test]
    async fn version_is_read_from_product_endpoint() {
        let transport = Arc::new(CannedTransport::new());
        transport
            .respond(
                Method::Get,
                "/version/product",
                200,
                r#"{"name":"Cisco Unity Connection","version":"14.0.1.10000-17"}"#,
            )
            .await;

        let server = server(transport, ServerOptions::default());
        let version = server.fetch_version().await.unwrap().value;
        assert_eq!(version.major, 14);
        assert_eq!(version.raw, "14.0.1.10000-17");
    }
}
