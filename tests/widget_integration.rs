use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use chat_widget::reply::{HttpReplyFetcher, ReplyFetcher, ReplyUnavailable};
use chat_widget::widget::{
    ChatWidget, CycleId, MemoryInput, MemorySurface, Message, REPLY_ERROR_TEXT, SubmitOutcome,
    SurfaceNode, WidgetState,
};
use serde_json::{Value, json};

/// Requests seen by the stub reply service: (content-type, body).
#[derive(Clone, Default)]
struct Seen {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn spawn_stub(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn greeting_stub() -> (SocketAddr, Seen) {
    async fn chat(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        seen.requests.lock().unwrap().push((content_type, body));
        Json(json!({ "response": "Hi!" }))
    }

    let seen = Seen::default();
    let router = Router::new().route("/chat", post(chat)).with_state(seen.clone());
    (spawn_stub(router).await, seen)
}

fn http_widget(addr: SocketAddr) -> (ChatWidget<MemorySurface, MemoryInput>, MemorySurface) {
    let surface = MemorySurface::new();
    let fetcher = HttpReplyFetcher::new(format!("http://{addr}/chat")).unwrap();
    let widget = ChatWidget::new(surface.clone(), MemoryInput::new(), Arc::new(fetcher));
    (widget, surface)
}

#[tokio::test]
async fn test_round_trip_against_http_stub() {
    let (addr, seen) = greeting_stub().await;
    let (mut widget, surface) = http_widget(addr);

    let outcome = widget.submit("Hi there").await;

    assert_eq!(outcome, SubmitOutcome::Replied(CycleId::new(1)));

    let requests = seen.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0.as_deref(), Some("application/json"));
    assert_eq!(requests[0].1, json!({ "message": "Hi there" }));

    let transcript: Vec<String> = surface.bubbles().iter().map(ToString::to_string).collect();
    assert_eq!(transcript, vec![r#"USER:"Hi there""#, r#"AGENT:"Hi!""#]);
    assert_eq!(surface.indicator_count(), 0);
    assert_eq!(widget.transcript().indicator_count(), 0);
    assert_eq!(widget.state(), WidgetState::Idle);
}

#[tokio::test]
async fn test_sends_trimmed_text() {
    let (addr, seen) = greeting_stub().await;
    let (mut widget, surface) = http_widget(addr);

    widget.submit("   padded message \n").await;

    assert_eq!(
        seen.requests.lock().unwrap()[0].1,
        json!({ "message": "padded message" })
    );
    assert_eq!(surface.bubbles()[0], Message::user("padded message"));
}

#[tokio::test]
async fn test_blank_input_makes_no_request() {
    let (addr, seen) = greeting_stub().await;
    let (mut widget, surface) = http_widget(addr);

    for raw in ["", "   ", "\n\t"] {
        assert_eq!(widget.submit(raw).await, SubmitOutcome::Ignored);
    }

    assert!(seen.requests.lock().unwrap().is_empty());
    assert!(surface.nodes().is_empty());
}

async fn assert_failure_renders_error(router: Router) {
    let addr = spawn_stub(router).await;
    let (mut widget, surface) = http_widget(addr);

    let outcome = widget.submit("hello").await;

    assert_eq!(outcome, SubmitOutcome::Failed(CycleId::new(1)));
    assert_eq!(
        surface.bubbles(),
        vec![Message::user("hello"), Message::agent(REPLY_ERROR_TEXT)]
    );
    assert_eq!(surface.indicator_count(), 0);
}

#[tokio::test]
async fn test_server_error_is_failure() {
    async fn broken() -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "response": "should not be shown" })),
        )
    }
    assert_failure_renders_error(Router::new().route("/chat", post(broken))).await;
}

#[tokio::test]
async fn test_non_json_body_is_failure() {
    async fn garbage() -> &'static str {
        "not json"
    }
    assert_failure_renders_error(Router::new().route("/chat", post(garbage))).await;
}

#[tokio::test]
async fn test_missing_response_field_is_failure() {
    async fn wrong_shape() -> Json<Value> {
        Json(json!({ "reply": "Hi!" }))
    }
    assert_failure_renders_error(Router::new().route("/chat", post(wrong_shape))).await;
}

#[tokio::test]
async fn test_unreachable_service_is_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (mut widget, surface) = http_widget(addr);
    assert_eq!(widget.submit("hello").await, SubmitOutcome::Failed(CycleId::new(1)));
    assert_eq!(surface.bubbles().last(), Some(&Message::agent(REPLY_ERROR_TEXT)));
}

/// Captures what the page looked like when the request went out.
struct SnapshotFetcher {
    surface: MemorySurface,
    input: MemoryInput,
    seen: Mutex<Option<(Vec<SurfaceNode>, String)>>,
}

#[async_trait]
impl ReplyFetcher for SnapshotFetcher {
    async fn fetch_reply(&self, _message: &str) -> Result<String, ReplyUnavailable> {
        *self.seen.lock().unwrap() = Some((self.surface.nodes(), self.input.value()));
        Ok("Hello".to_string())
    }
}

#[tokio::test]
async fn test_bubble_and_indicator_precede_network_call() {
    let surface = MemorySurface::new();
    let input = MemoryInput::new();
    input.set("Hi there");

    let fetcher = Arc::new(SnapshotFetcher {
        surface: surface.clone(),
        input: input.clone(),
        seen: Mutex::new(None),
    });
    let mut widget = ChatWidget::new(surface.clone(), input.clone(), Arc::clone(&fetcher) as Arc<dyn ReplyFetcher>);

    widget.submit("Hi there").await;

    let (nodes, draft) = fetcher.seen.lock().unwrap().clone().unwrap();
    assert_eq!(
        nodes,
        vec![
            SurfaceNode::Bubble(Message::user("Hi there")),
            SurfaceNode::Indicator(CycleId::new(1).marker()),
        ]
    );
    assert_eq!(draft, "");

    assert_eq!(surface.bubbles(), vec![Message::user("Hi there"), Message::agent("Hello")]);
    assert_eq!(surface.indicator_count(), 0);
}
