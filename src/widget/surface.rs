//! Handles to the page elements the widget writes to.
//!
//! The widget never looks elements up on its own; it is handed a
//! [`TranscriptContainer`] and a [`DraftInput`] at construction. The HTTP
//! deployment uses fragment-producing handles (see `crate::ui::fragments`);
//! [`MemorySurface`] and [`MemoryInput`] keep everything in memory.

use std::sync::{Arc, Mutex};

use super::message::Message;
use super::transcript::{CycleId, IndicatorMarker};

/// The element that displays the transcript.
pub trait TranscriptContainer: Send {
    /// Append a bubble for `message`.
    fn append_bubble(&mut self, message: &Message);

    /// Append the loading indicator for `cycle`.
    fn append_indicator(&mut self, cycle: CycleId);

    /// Remove the indicator carrying `marker`.
    ///
    /// Must be a no-op returning `false` when no such indicator is present.
    fn remove_indicator(&mut self, marker: &IndicatorMarker) -> bool;

    /// Scroll the container to its newest content.
    fn scroll_to_bottom(&mut self);
}

/// The text field holding the draft message.
pub trait DraftInput: Send {
    fn clear(&mut self);
}

/// A node in a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceNode {
    Bubble(Message),
    Indicator(IndicatorMarker),
}

#[derive(Debug, Default)]
struct MemorySurfaceInner {
    nodes: Vec<SurfaceNode>,
    scrolls: usize,
}

/// In-memory transcript container.
///
/// Clones share the same nodes, so a clone kept by the caller observes every
/// mutation the widget makes.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    inner: Arc<Mutex<MemorySurfaceInner>>,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current nodes.
    #[must_use]
    pub fn nodes(&self) -> Vec<SurfaceNode> {
        self.inner.lock().unwrap().nodes.clone()
    }

    /// Bubbles currently displayed, in order.
    #[must_use]
    pub fn bubbles(&self) -> Vec<Message> {
        self.inner
            .lock()
            .unwrap()
            .nodes
            .iter()
            .filter_map(|node| match node {
                SurfaceNode::Bubble(message) => Some(message.clone()),
                SurfaceNode::Indicator(_) => None,
            })
            .collect()
    }

    #[must_use]
    pub fn indicator_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .nodes
            .iter()
            .filter(|node| matches!(node, SurfaceNode::Indicator(_)))
            .count()
    }

    /// Number of scroll-to-bottom requests received.
    #[must_use]
    pub fn scroll_count(&self) -> usize {
        self.inner.lock().unwrap().scrolls
    }
}

impl TranscriptContainer for MemorySurface {
    fn append_bubble(&mut self, message: &Message) {
        self.inner
            .lock()
            .unwrap()
            .nodes
            .push(SurfaceNode::Bubble(message.clone()));
    }

    fn append_indicator(&mut self, cycle: CycleId) {
        self.inner
            .lock()
            .unwrap()
            .nodes
            .push(SurfaceNode::Indicator(cycle.marker()));
    }

    fn remove_indicator(&mut self, marker: &IndicatorMarker) -> bool {
        let mut guard = self.inner.lock().unwrap();
        let position = guard
            .nodes
            .iter()
            .position(|node| matches!(node, SurfaceNode::Indicator(m) if m == marker));
        match position {
            Some(index) => {
                guard.nodes.remove(index);
                true
            }
            None => false,
        }
    }

    fn scroll_to_bottom(&mut self) {
        self.inner.lock().unwrap().scrolls += 1;
    }
}

/// In-memory draft field. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryInput {
    value: Arc<Mutex<String>>,
}

impl MemoryInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: impl Into<String>) {
        *self.value.lock().unwrap() = value.into();
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.value.lock().unwrap().clone()
    }
}

impl DraftInput for MemoryInput {
    fn clear(&mut self) {
        self.value.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_absent_indicator_is_noop() {
        let mut surface = MemorySurface::new();
        surface.append_bubble(&Message::user("hello"));

        assert!(!surface.remove_indicator(&CycleId::new(3).marker()));
        assert_eq!(surface.nodes().len(), 1);
    }

    #[test]
    fn test_clones_share_nodes() {
        let surface = MemorySurface::new();
        let mut handle = surface.clone();
        handle.append_indicator(CycleId::new(1));

        assert_eq!(surface.indicator_count(), 1);
        assert!(handle.remove_indicator(&CycleId::new(1).marker()));
        assert_eq!(surface.indicator_count(), 0);
    }

    #[test]
    fn test_input_clear() {
        let input = MemoryInput::new();
        input.set("draft");
        let mut handle = input.clone();
        handle.clear();
        assert_eq!(input.value(), "");
    }
}
