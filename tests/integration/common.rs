//! Shared helpers: client construction and a cooperative crawler stub

use crawler_control::{ClientConfig, CrawlerClient};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Creates a client pointed at the given mock server
pub fn client_for(server: &MockServer) -> CrawlerClient {
    client_at(&server.uri())
}

/// Creates a client pointed at an arbitrary base URL
pub fn client_at(base_url: &str) -> CrawlerClient {
    let config = ClientConfig::new(base_url, TEST_TOKEN);
    CrawlerClient::new(&config).expect("Failed to create client")
}

/// Returns a base URL on which nothing is listening
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}", addr)
}

#[derive(Default)]
struct StubState {
    queues: HashMap<String, VecDeque<Value>>,
    deadletters: Vec<(String, Value)>,
}

/// An in-memory crawler service that keeps queues FIFO and honors requeues
#[derive(Clone, Default)]
pub struct CrawlerStub {
    state: Arc<Mutex<StubState>>,
}

impl CrawlerStub {
    /// Starts a mock server backed by a fresh stub
    pub async fn start() -> (MockServer, Self) {
        let server = MockServer::start().await;
        let stub = Self::default();

        for verb in ["GET", "HEAD", "POST", "PUT", "DELETE"] {
            Mock::given(method(verb))
                .respond_with(StubResponder {
                    stub: stub.clone(),
                    verb,
                })
                .mount(&server)
                .await;
        }

        (server, stub)
    }

    /// Parks a request as a deadletter under the given urn
    pub fn add_deadletter(&self, urn: &str, request: Value) {
        let mut state = self.state.lock().unwrap();
        state.deadletters.push((urn.to_string(), request));
    }

    /// Current length of a queue as the stub sees it
    pub fn queue_len(&self, queue: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.queues.get(queue).map(VecDeque::len).unwrap_or(0)
    }
}

struct StubResponder {
    stub: CrawlerStub,
    verb: &'static str,
}

fn not_found(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({ "message": message }))
}

impl Respond for StubResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|segments| segments.map(str::to_string).collect())
            .unwrap_or_default();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        let count = query
            .get("count")
            .and_then(|count| count.parse::<usize>().ok())
            .unwrap_or(1);

        let mut state = self.stub.state.lock().unwrap();

        match (self.verb, segments.as_slice()) {
            ("POST", ["requests", queue]) => {
                let items: Vec<Value> = serde_json::from_slice(&request.body).unwrap();
                state
                    .queues
                    .entry(queue.to_string())
                    .or_default()
                    .extend(items);
                ResponseTemplate::new(201)
            }
            ("GET", ["requests", queue]) => {
                let items: Vec<Value> = state
                    .queues
                    .get(*queue)
                    .map(|q| q.iter().take(count).cloned().collect())
                    .unwrap_or_default();
                ResponseTemplate::new(200).set_body_json(items)
            }
            ("DELETE", ["requests", queue]) => {
                let q = state.queues.entry(queue.to_string()).or_default();
                let n = count.min(q.len());
                let removed: Vec<Value> = q.drain(..n).collect();
                ResponseTemplate::new(200).set_body_json(removed)
            }
            ("PUT", ["queues", queue]) => {
                state.queues.remove(*queue);
                ResponseTemplate::new(200)
            }
            ("GET", ["queues", queue, "info"]) => {
                let depth = state.queues.get(*queue).map(VecDeque::len).unwrap_or(0);
                ResponseTemplate::new(200).set_body_json(json!({ "count": depth }))
            }
            ("GET", ["deadletters"]) => {
                let listing: Vec<Value> = state
                    .deadletters
                    .iter()
                    .map(|(urn, request)| json!({ "urn": urn, "request": request }))
                    .collect();
                ResponseTemplate::new(200).set_body_json(listing)
            }
            ("HEAD", ["deadletters"]) => ResponseTemplate::new(200)
                .insert_header("x-total-count", state.deadletters.len().to_string().as_str()),
            ("GET", ["deadletters", urn]) => {
                match state.deadletters.iter().find(|(candidate, _)| candidate == urn) {
                    Some((urn, request)) => ResponseTemplate::new(200)
                        .set_body_json(json!({ "urn": urn, "request": request })),
                    None => not_found("Deadletter not found"),
                }
            }
            ("DELETE", ["deadletters", urn]) => {
                let Some(index) = state
                    .deadletters
                    .iter()
                    .position(|(candidate, _)| candidate == urn)
                else {
                    return not_found("Deadletter not found");
                };

                let (_, request) = state.deadletters.remove(index);
                if let Some(target) = query.get("requeue") {
                    state
                        .queues
                        .entry(target.clone())
                        .or_default()
                        .push_back(request);
                }
                ResponseTemplate::new(200)
            }
            _ => not_found("No such route"),
        }
    }
}
