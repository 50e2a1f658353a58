//! Chat input area component.

use leptos::prelude::*;

use crate::ui::components::{Button, ButtonSize, SendIcon};

/// Id of the draft text field.
pub const DRAFT_FIELD_ID: &str = "user-input";

/// The draft text field.
///
/// With `oob` set the element carries `hx-swap-oob`, so a response can
/// replace the live field with an empty one.
#[component]
pub fn DraftField(#[prop(default = false)] oob: bool) -> impl IntoView {
    let swap_oob = oob.then_some("true");

    view! {
        <input
            id=DRAFT_FIELD_ID
            type="text"
            name="message"
            value=""
            autocomplete="off"
            autofocus=true
            placeholder="Type your message..."
            class="flex-1 h-11 px-4 rounded-xl border border-gray-600 bg-gray-900 text-gray-100 \
                   placeholder:text-gray-500 focus:outline-none focus:ring-2 focus:ring-blue-500"
            hx-swap-oob=swap_oob
        />
    }
}

/// Submission form. Posts to the widget and appends the answer to `#chat-box`.
#[component]
pub fn ChatInputArea(session_id: String) -> impl IntoView {
    view! {
        <div class="border-t border-gray-700 p-4 bg-gray-800/80">
            <form
                id="chat-form"
                class="flex gap-2"
                action="/widget/submit"
                method="post"
                hx-post="/widget/submit"
                hx-target="#chat-box"
                hx-swap="beforeend"
            >
                <input type="hidden" name="session_id" value=session_id />
                <DraftField />
                <Button
                    size=ButtonSize::Icon
                    button_type="submit"
                >
                    <SendIcon class="h-5 w-5" />
                </Button>
            </form>
        </div>
    }
}
