//! Element handles that turn widget mutations into htmx fragments.
//!
//! Every mutation is rendered immediately and buffered; the request handler
//! drains the buffer into its response after the widget call returns.

use std::collections::HashSet;

use super::render::{render_bubble, render_draft_field, render_indicator, render_indicator_removal};
use crate::widget::{CycleId, DraftInput, IndicatorMarker, Message, TranscriptContainer};

/// Fragments collected during one widget call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Fragments {
    /// Markup to append to `#chat-box`, including out-of-band swaps.
    pub html: String,
    /// Whether the container asked to be scrolled to the bottom.
    pub scroll: bool,
}

/// `#chat-box` as seen from the server.
///
/// Tracks which indicators the page currently shows so that removing an
/// absent indicator emits nothing.
#[derive(Debug)]
pub struct FragmentSurface {
    session_id: String,
    live: HashSet<IndicatorMarker>,
    pending: Fragments,
}

impl FragmentSurface {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            live: HashSet::new(),
            pending: Fragments::default(),
        }
    }

    /// Drain everything rendered since the last call.
    pub fn take(&mut self) -> Fragments {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn live_indicators(&self) -> usize {
        self.live.len()
    }
}

impl TranscriptContainer for FragmentSurface {
    fn append_bubble(&mut self, message: &Message) {
        self.pending.html.push_str(&render_bubble(message));
    }

    fn append_indicator(&mut self, cycle: CycleId) {
        self.live.insert(cycle.marker());
        self.pending
            .html
            .push_str(&render_indicator(&self.session_id, cycle));
    }

    fn remove_indicator(&mut self, marker: &IndicatorMarker) -> bool {
        if !self.live.remove(marker) {
            return false;
        }
        self.pending.html.push_str(&render_indicator_removal(marker));
        true
    }

    fn scroll_to_bottom(&mut self) {
        self.pending.scroll = true;
    }
}

/// The draft field as seen from the server.
#[derive(Debug, Default)]
pub struct FormInput {
    cleared: bool,
}

impl FormInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Out-of-band replacement field if the widget cleared the input since
    /// the last call.
    pub fn take_fragment(&mut self) -> Option<String> {
        std::mem::take(&mut self.cleared).then(|| render_draft_field(true))
    }
}

impl DraftInput for FormInput {
    fn clear(&mut self) {
        self.cleared = true;
    }
}
