//! Pure projections from widget data to HTML.
//!
//! Everything here is a plain function of its arguments; nothing reads
//! session or page state.

use leptos::prelude::*;

use super::chat::{ChatShell, DraftField, LoadingIndicator, MessageBubble};
use crate::config::UiConfig;
use crate::widget::{ChatTranscript, CycleId, IndicatorMarker, Message};

/// Route an indicator posts to in order to resolve its cycle.
#[must_use]
pub fn reply_url(session_id: &str, cycle: CycleId) -> String {
    format!("/widget/{session_id}/reply/{cycle}")
}

#[must_use]
pub fn render_bubble(message: &Message) -> String {
    let message = message.clone();
    view! { <MessageBubble message=message /> }.to_html()
}

#[must_use]
pub fn render_indicator(session_id: &str, cycle: CycleId) -> String {
    let url = reply_url(session_id, cycle);
    view! { <LoadingIndicator cycle=cycle reply_url=url /> }.to_html()
}

/// Out-of-band instruction that deletes the element carrying `marker`.
#[must_use]
pub fn render_indicator_removal(marker: &IndicatorMarker) -> String {
    let id = marker.to_string();
    view! { <div id=id hx-swap-oob="delete"></div> }.to_html()
}

/// The draft field; with `oob` it replaces the live field out of band.
#[must_use]
pub fn render_draft_field(oob: bool) -> String {
    view! { <DraftField oob=oob /> }.to_html()
}

/// The chat shell with `transcript` already rendered.
#[must_use]
pub fn render_chat_shell(title: &str, session_id: &str, transcript: &ChatTranscript) -> String {
    let title = title.to_string();
    let session_id = session_id.to_string();
    let transcript = transcript.clone();
    view! { <ChatShell title=title session_id=session_id transcript=transcript /> }.to_html()
}

/// Full HTML document for the chat page.
#[must_use]
pub fn render_page(ui: &UiConfig, session_id: &str, transcript: &ChatTranscript) -> String {
    let content = render_chat_shell(&ui.title, session_id, transcript);
    html_shell(&ui.title, &ui.htmx_src, &content)
}

fn html_shell(title: &str, htmx_src: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>

    <script src="{htmx_src}"></script>
    <script defer src="/static/chat.js"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="min-h-screen bg-gray-900 text-gray-100 antialiased">
    <main id="app" class="container mx-auto px-4 py-8 max-w-3xl">
        {content}
    </main>
</body>
</html>"#
    )
}
