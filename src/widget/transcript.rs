//! The in-memory transcript: messages plus any live loading indicators.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::message::Message;

/// Prefix of every indicator marker. The cycle number is appended.
pub const INDICATOR_MARKER_PREFIX: &str = "loading-indicator";

/// Correlation token for one submit/reply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(u64);

impl CycleId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Marker that identifies this cycle's loading indicator.
    #[must_use]
    pub fn marker(self) -> IndicatorMarker {
        IndicatorMarker(format!("{INDICATOR_MARKER_PREFIX}-{}", self.0))
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique marker used to locate a loading indicator (an element id on the page).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicatorMarker(String);

impl IndicatorMarker {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndicatorMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One slot in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Message(Message),
    Indicator(CycleId),
}

/// Ordered, append-only chat history.
///
/// Only indicators are ever removed; messages stay where they were appended.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    entries: Vec<Entry>,
}

impl ChatTranscript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_message(&mut self, message: Message) {
        self.entries.push(Entry::Message(message));
    }

    /// Add an indicator for `cycle`. Returns `false` if one is already live.
    pub fn show_indicator(&mut self, cycle: CycleId) -> bool {
        if self.has_indicator(cycle) {
            return false;
        }
        self.entries.push(Entry::Indicator(cycle));
        true
    }

    /// Remove the indicator for `cycle`. No-op (returns `false`) when absent.
    pub fn remove_indicator(&mut self, cycle: CycleId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !matches!(entry, Entry::Indicator(c) if *c == cycle));
        before != self.entries.len()
    }

    #[must_use]
    pub fn has_indicator(&self, cycle: CycleId) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, Entry::Indicator(c) if *c == cycle))
    }

    #[must_use]
    pub fn indicator_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, Entry::Indicator(_)))
            .count()
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Messages in display order, indicators skipped.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            Entry::Indicator(_) => None,
        })
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_carries_cycle() {
        assert_eq!(CycleId::new(7).marker().as_str(), "loading-indicator-7");
    }

    #[test]
    fn test_indicator_removal_is_idempotent() {
        let mut transcript = ChatTranscript::new();
        let cycle = CycleId::new(1);

        assert!(!transcript.remove_indicator(cycle));

        assert!(transcript.show_indicator(cycle));
        assert!(!transcript.show_indicator(cycle));
        assert_eq!(transcript.indicator_count(), 1);

        assert!(transcript.remove_indicator(cycle));
        assert!(!transcript.remove_indicator(cycle));
        assert_eq!(transcript.indicator_count(), 0);
    }

    #[test]
    fn test_removal_only_touches_its_own_cycle() {
        let mut transcript = ChatTranscript::new();
        transcript.push_message(Message::user("first"));
        transcript.show_indicator(CycleId::new(1));
        transcript.push_message(Message::user("second"));
        transcript.show_indicator(CycleId::new(2));

        transcript.remove_indicator(CycleId::new(2));

        assert!(transcript.has_indicator(CycleId::new(1)));
        assert!(!transcript.has_indicator(CycleId::new(2)));
        assert_eq!(transcript.message_count(), 2);
    }
}
