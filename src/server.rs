//! HTTP surface: the page, the htmx widget routes and static assets.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::reply::HttpReplyFetcher;
use crate::session::{PageWidget, Session, SessionStore};
use crate::ui::Fragments;
use crate::ui::render::render_page;
use crate::widget::{ChatTranscript, CycleId, Message, PendingReply};

/// Header htmx reads to fire an event once the swap has settled.
pub const SCROLL_HEADER: &str = "hx-trigger-after-settle";

/// Event fired on `#chat-box` when the widget asked for a scroll.
pub const SCROLL_TRIGGER: &str = r##"{"chat:scroll":{"target":"#chat-box"}}"##;

/// Request header htmx sets on every request it issues.
pub const HTMX_REQUEST_HEADER: &str = "hx-request";

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let fetcher = Arc::new(HttpReplyFetcher::from_config(&config.reply)?);
    info!(
        name: "reply.config.loaded",
        endpoint = %fetcher.endpoint(),
        timeout_secs = ?config.reply.timeout_secs,
        "Reply service configured"
    );

    let sessions = SessionStore::new(fetcher);
    let sweeper = sessions.spawn_sweeper(
        Duration::from_secs(config.session.sweep_interval_secs),
        Duration::from_secs(config.session.idle_timeout_secs),
    );

    let state = AppState {
        sessions,
        config: Arc::clone(&config),
    };
    let app = build_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        name: "server.started",
        address = %format!("http://{address}"),
        "Server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    Ok(())
}

/// Build the router. Separate from [`start_server`] so tests can drive it.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.ui.static_dir.clone();

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/widget/submit", post(submit_handler))
        .route("/widget/{session_id}/reply/{cycle}", post(reply_handler))
        .route("/api/sessions/{id}/transcript", get(transcript_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!(name: "server.stopping", "Shutdown signal received");
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PageQuery {
    session_id: Option<String>,
}

/// GET / - Fresh session, empty transcript.
///
/// `?session_id=` re-renders a live session; plain form posts land here.
async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    if let Some(session) = query.session_id.as_deref().and_then(|id| state.sessions.get(id)) {
        let transcript = session.widget().await.transcript().clone();
        return Html(render_page(&state.config.ui, session.id(), &transcript));
    }

    let session = state.sessions.create();
    Html(render_page(&state.config.ui, session.id(), &ChatTranscript::new()))
}

async fn health_handler() -> &'static str {
    "ok"
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Form posted by the chat input.
#[derive(Debug, Deserialize)]
struct SubmitForm {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    message: String,
}

/// POST /widget/submit - User bubble, indicator and a cleared input.
///
/// Without htmx on the page the form posts natively; that path runs the
/// whole cycle before answering.
async fn submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SubmitForm>,
) -> Response {
    if form.session_id.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "missing session_id").into_response();
    }

    let session = state.sessions.get_or_create(&form.session_id);
    if !headers.contains_key(HTMX_REQUEST_HEADER) {
        return submit_full_page(&session, &form.message).await;
    }

    let mut widget = session.widget().await;

    if widget.begin_submit(&form.message).is_none() {
        return StatusCode::NO_CONTENT.into_response();
    }

    fragment_response(&mut widget)
}

/// Plain form submission: submit, wait for the reply, then redirect the
/// browser to its re-rendered page.
async fn submit_full_page(session: &Session, message: &str) -> Response {
    let (pending, fetcher) = {
        let mut widget = session.widget().await;
        let pending = widget.begin_submit(message);
        discard_fragments(&mut widget);
        (pending, widget.fetcher())
    };

    if let Some(PendingReply { cycle, message }) = pending {
        let result = fetcher.fetch_reply(&message).await;
        let mut widget = session.widget().await;
        widget.resolve(cycle, result);
        discard_fragments(&mut widget);
    }

    Redirect::to(&page_url(session.id())).into_response()
}

/// POST /widget/:session_id/reply/:cycle - Fetch and render one cycle's reply.
///
/// The widget lock is released while the reply service is called.
async fn reply_handler(
    State(state): State<AppState>,
    Path((session_id, cycle)): Path<(String, u64)>,
) -> Response {
    let Some(session) = state.sessions.get(&session_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let cycle = CycleId::new(cycle);

    let (message, fetcher) = {
        let widget = session.widget().await;
        match widget.pending_message(cycle) {
            Some(message) => (message.to_string(), widget.fetcher()),
            None => return StatusCode::OK.into_response(),
        }
    };

    let result = fetcher.fetch_reply(&message).await;

    let mut widget = session.widget().await;
    widget.resolve(cycle, result);
    fragment_response(&mut widget)
}

/// GET /api/sessions/:id/transcript - Messages as JSON.
async fn transcript_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    let session = state.sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let widget = session.widget().await;
    Ok(Json(widget.transcript().messages().cloned().collect()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Page URL that re-renders session `id`.
fn page_url(id: &str) -> String {
    let id: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("/?session_id={id}")
}

/// Drop fragments nobody will swap in; the next page render shows the state.
fn discard_fragments(widget: &mut PageWidget) {
    let _ = widget.container_mut().take();
    let _ = widget.input_mut().take_fragment();
}

/// Drain the widget's handles into one htmx response.
fn fragment_response(widget: &mut PageWidget) -> Response {
    let Fragments { mut html, scroll } = widget.container_mut().take();
    if let Some(field) = widget.input_mut().take_fragment() {
        html.push_str(&field);
    }

    let mut response = Html(html).into_response();
    if scroll {
        response
            .headers_mut()
            .insert(SCROLL_HEADER, HeaderValue::from_static(SCROLL_TRIGGER));
    }
    response
}
