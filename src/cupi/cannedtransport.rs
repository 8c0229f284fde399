use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::cupi::transport::{HttpTransport, Method, TransportRequest, TransportResponse};

enum Reply {
    Response(TransportResponse),
    Created(String),
    ConnectionError(String),
}

struct Route {
    method: Method,
    url_contains: String,
    reply: Reply,
}

#[derive(Default)]
struct State {
    queued: VecDeque<Reply>,
    routes: Vec<Route>,
    requests: Vec<TransportRequest>,
}

/// In-memory transport returning scripted responses, for harness tests and offline demos.
///
/// Queued replies are consumed first, in order. Otherwise the most recently added route whose
/// method matches and whose text is contained in the url answers. Unmatched requests get a 404.
#[derive(Default)]
pub struct CannedTransport {
    state: Mutex<State>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot response.
    pub async fn enqueue(&self, status: u16, body: &str) {
        let mut state = self.state.lock().await;
        state
            .queued
            .push_back(Reply::Response(TransportResponse::new(status, body)));
    }

    /// Queue a one-shot connection failure.
    pub async fn enqueue_connection_error(&self, message: &str) {
        let mut state = self.state.lock().await;
        state
            .queued
            .push_back(Reply::ConnectionError(message.to_string()));
    }

    /// Answer every matching request with the same status and body.
    pub async fn respond(&self, method: Method, url_contains: &str, status: u16, body: &str) {
        self.add_route(
            method,
            url_contains,
            Reply::Response(TransportResponse::new(status, body)),
        )
        .await;
    }

    /// Answer matching POSTs with 201 and `/vmrest/{resource_path}/{new guid}`.
    pub async fn respond_created(&self, resource_path: &str) {
        self.add_route(
            Method::Post,
            resource_path,
            Reply::Created(resource_path.trim_matches('/').to_string()),
        )
        .await;
    }

    async fn add_route(&self, method: Method, url_contains: &str, reply: Reply) {
        let mut state = self.state.lock().await;
        state.routes.push(Route {
            method,
            url_contains: url_contains.to_string(),
            reply,
        });
    }

    /// Every request seen so far, oldest first.
    pub async fn requests(&self) -> Vec<TransportRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }
}

fn answer(reply: &Reply) -> Result<TransportResponse, String> {
    match reply {
        Reply::Response(response) => Ok(response.clone()),
        Reply::Created(path) => Ok(TransportResponse {
            status: 201,
            body: format!("/vmrest/{}/{}", path, Uuid::new_v4()),
        }),
        Reply::ConnectionError(message) => Err(message.clone()),
    }
}

#[async_trait]
impl HttpTransport for CannedTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, String> {
        let mut state = self.state.lock().await;
        let method = request.method;
        let url = request.url.clone();
        state.requests.push(request);

        if let Some(reply) = state.queued.pop_front() {
            return answer(&reply);
        }

        let route = state
            .routes
            .iter()
            .rev()
            .find(|route| route.method == method && url.contains(&route.url_contains));

        match route {
            Some(route) => answer(&route.reply),
            None => Ok(TransportResponse::new(
                404,
                &format!("No canned response for {} {}", method, url),
            )),
        }
    }
}
