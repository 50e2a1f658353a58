//! Message bubbles and the typing indicator.

use leptos::prelude::*;

use crate::widget::{CycleId, Message, Origin};

const USER_ROW: &str = "flex justify-end";
const AGENT_ROW: &str = "flex justify-start";

const USER_BUBBLE: &str =
    "bg-blue-600 text-white px-5 py-3 rounded-2xl rounded-tr-none max-w-xs lg:max-w-md shadow-md";
const AGENT_BUBBLE: &str = "bg-gray-700 text-gray-100 px-5 py-3 rounded-2xl rounded-tl-none \
                            max-w-xs lg:max-w-md shadow-md whitespace-pre-wrap";

/// One chat message. The text is emitted as an escaped text node.
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let (row, bubble, origin) = match message.origin() {
        Origin::User => (USER_ROW, USER_BUBBLE, "user"),
        Origin::Agent => (AGENT_ROW, AGENT_BUBBLE, "agent"),
    };
    let text = message.text().to_string();

    view! {
        <div class=row data-origin=origin>
            <div class=bubble>{text}</div>
        </div>
    }
}

/// Three bouncing dots shown while a reply is outstanding.
///
/// The element fetches its own reply as soon as htmx loads it and appends
/// the result to `#chat-box`.
#[component]
pub fn LoadingIndicator(
    cycle: CycleId,
    /// Route that resolves this cycle.
    reply_url: String,
) -> impl IntoView {
    let marker = cycle.marker().to_string();

    view! {
        <div
            id=marker
            class=AGENT_ROW
            hx-post=reply_url
            hx-trigger="load"
            hx-target="#chat-box"
            hx-swap="beforeend"
        >
            <div class="bg-gray-700 px-4 py-3 rounded-2xl rounded-tl-none shadow-md flex gap-1 items-center">
                <div class="w-2 h-2 bg-gray-400 rounded-full typing-dot"></div>
                <div class="w-2 h-2 bg-gray-400 rounded-full typing-dot"></div>
                <div class="w-2 h-2 bg-gray-400 rounded-full typing-dot"></div>
            </div>
        </div>
    }
}
