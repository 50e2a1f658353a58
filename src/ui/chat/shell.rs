//! Chat shell layout component.

use leptos::prelude::*;

use super::{ChatHeader, ChatInputArea, ChatMessageList};
use crate::widget::ChatTranscript;

/// Complete chat interface: header, transcript and input form.
#[component]
pub fn ChatShell(
    title: String,
    session_id: String,
    transcript: ChatTranscript,
) -> impl IntoView {
    let list_session = session_id.clone();

    view! {
        <div class="chat-shell flex flex-col h-[calc(100vh-4rem)] bg-gray-800 border border-gray-700 rounded-2xl overflow-hidden">
            <ChatHeader title=title />
            <ChatMessageList transcript=transcript session_id=list_session />
            <ChatInputArea session_id=session_id />
        </div>
    }
}
