//! Chat header component.

use leptos::prelude::*;

use crate::ui::components::SparklesIcon;

/// Chat header with title.
#[component]
pub fn ChatHeader(title: String) -> impl IntoView {
    view! {
        <header class="flex items-center gap-2 px-4 py-3 border-b border-gray-700 bg-gray-800/80 backdrop-blur-sm">
            <SparklesIcon class="h-5 w-5 text-blue-400" />
            <h2 class="font-semibold text-lg">{title}</h2>
        </header>
    }
}
