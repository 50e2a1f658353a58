//! Transcript container component.

use leptos::prelude::*;

use super::{LoadingIndicator, MessageBubble};
use crate::ui::render::reply_url;
use crate::widget::{ChatTranscript, Entry};

/// Id of the transcript container. Fragments are appended to it.
pub const CHAT_BOX_ID: &str = "chat-box";

/// The `#chat-box` container with every entry of `transcript`.
#[component]
pub fn ChatMessageList(
    transcript: ChatTranscript,
    /// Session the indicators report back to.
    session_id: String,
) -> impl IntoView {
    let entries = transcript
        .entries()
        .iter()
        .cloned()
        .map(|entry| match entry {
            Entry::Message(message) => view! { <MessageBubble message=message /> }.into_any(),
            Entry::Indicator(cycle) => {
                let url = reply_url(&session_id, cycle);
                view! { <LoadingIndicator cycle=cycle reply_url=url /> }.into_any()
            }
        })
        .collect_view();

    view! {
        <div
            id=CHAT_BOX_ID
            class="flex-1 overflow-y-auto p-4 space-y-4"
            aria-live="polite"
            aria-label="Chat messages"
        >
            {entries}
        </div>
    }
}
