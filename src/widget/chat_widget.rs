//! The chat widget: submit, wait, render the reply.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::message::Message;
use super::surface::{DraftInput, TranscriptContainer};
use super::transcript::{ChatTranscript, CycleId};
use crate::reply::{ReplyFetcher, ReplyUnavailable};

/// Text shown in place of a reply when the reply service fails.
pub const REPLY_ERROR_TEXT: &str = "Sorry, something went wrong. Please check your connection.";

/// Coarse widget state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    /// At least one reply is outstanding.
    AwaitingReply { pending: usize },
}

/// A submission whose reply has not arrived yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub cycle: CycleId,
    /// The trimmed user text to send.
    pub message: String,
}

/// Result of a full [`ChatWidget::submit`] cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming; nothing happened.
    Ignored,
    /// The reply was rendered.
    Replied(CycleId),
    /// The fixed error bubble was rendered.
    Failed(CycleId),
}

/// Mediates between user input, the transcript display and the reply fetcher.
///
/// Each submission gets its own [`CycleId`]; indicator removal and reply
/// rendering only ever touch the cycle they belong to, so overlapping
/// submissions cannot remove each other's indicators. Submissions are not
/// serialised: a second submit while a reply is pending is accepted, and
/// replies are appended in the order they arrive.
pub struct ChatWidget<C, I> {
    container: C,
    input: I,
    fetcher: Arc<dyn ReplyFetcher>,
    transcript: ChatTranscript,
    pending: HashMap<CycleId, String>,
    last_cycle: u64,
}

impl<C, I> std::fmt::Debug for ChatWidget<C, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("transcript", &self.transcript)
            .field("pending", &self.pending.len())
            .field("last_cycle", &self.last_cycle)
            .finish_non_exhaustive()
    }
}

impl<C, I> ChatWidget<C, I>
where
    C: TranscriptContainer,
    I: DraftInput,
{
    /// Bind a widget to its container, its draft input and a reply fetcher.
    pub fn new(container: C, input: I, fetcher: Arc<dyn ReplyFetcher>) -> Self {
        Self {
            container,
            input,
            fetcher,
            transcript: ChatTranscript::new(),
            pending: HashMap::new(),
            last_cycle: 0,
        }
    }

    /// Run one full cycle: render the user bubble and indicator, fetch the
    /// reply, then render the reply or the error bubble.
    pub async fn submit(&mut self, raw_input: &str) -> SubmitOutcome {
        let Some(pending) = self.begin_submit(raw_input) else {
            return SubmitOutcome::Ignored;
        };

        let fetcher = Arc::clone(&self.fetcher);
        let result = fetcher.fetch_reply(&pending.message).await;
        let replied = result.is_ok();
        self.resolve(pending.cycle, result);

        if replied {
            SubmitOutcome::Replied(pending.cycle)
        } else {
            SubmitOutcome::Failed(pending.cycle)
        }
    }

    /// Synchronous half of a submission.
    ///
    /// Returns `None` (and touches nothing) when the input trims to empty.
    /// Otherwise appends the user bubble, clears the input, shows the
    /// indicator and returns what still has to be sent.
    pub fn begin_submit(&mut self, raw_input: &str) -> Option<PendingReply> {
        let text = raw_input.trim();
        if text.is_empty() {
            debug!(name: "widget.submit.ignored", "Ignoring empty submission");
            return None;
        }

        let message = Message::user(text);
        self.container.append_bubble(&message);
        self.container.scroll_to_bottom();
        self.transcript.push_message(message);

        self.input.clear();

        self.last_cycle += 1;
        let cycle = CycleId::new(self.last_cycle);
        self.show_loading(cycle);
        self.pending.insert(cycle, text.to_string());

        info!(
            name: "widget.submit.accepted",
            cycle = %cycle,
            message_length = text.len(),
            pending = self.pending.len(),
            "Submission accepted"
        );

        Some(PendingReply {
            cycle,
            message: text.to_string(),
        })
    }

    /// Dispatch a completed fetch to the success or failure path.
    pub fn resolve(&mut self, cycle: CycleId, result: Result<String, ReplyUnavailable>) -> bool {
        match result {
            Ok(response_text) => self.on_reply_success(cycle, response_text),
            Err(err) => self.on_reply_failure(cycle, &err),
        }
    }

    /// Remove the cycle's indicator and append the reply verbatim.
    ///
    /// Returns `false` without rendering anything if the cycle is unknown or
    /// already resolved.
    pub fn on_reply_success(&mut self, cycle: CycleId, response_text: impl Into<String>) -> bool {
        if !self.finish_cycle(cycle) {
            return false;
        }
        let response_text = response_text.into();
        info!(
            name: "widget.reply.received",
            cycle = %cycle,
            response_length = response_text.len(),
            "Reply received"
        );
        self.append_agent(Message::agent(response_text));
        true
    }

    /// Remove the cycle's indicator and append the fixed error bubble.
    pub fn on_reply_failure(&mut self, cycle: CycleId, error: &ReplyUnavailable) -> bool {
        if !self.finish_cycle(cycle) {
            return false;
        }
        warn!(
            name: "widget.reply.failed",
            cycle = %cycle,
            error = %error,
            "Reply unavailable"
        );
        self.append_agent(Message::agent(REPLY_ERROR_TEXT));
        true
    }

    /// Remove the indicator for `cycle`. No-op if it is not present.
    pub fn remove_loading(&mut self, cycle: CycleId) -> bool {
        let in_transcript = self.transcript.remove_indicator(cycle);
        let on_surface = self.container.remove_indicator(&cycle.marker());
        in_transcript || on_surface
    }

    /// Text still waiting for a reply in `cycle`.
    #[must_use]
    pub fn pending_message(&self, cycle: CycleId) -> Option<&str> {
        self.pending.get(&cycle).map(String::as_str)
    }

    #[must_use]
    pub fn state(&self) -> WidgetState {
        if self.pending.is_empty() {
            WidgetState::Idle
        } else {
            WidgetState::AwaitingReply {
                pending: self.pending.len(),
            }
        }
    }

    #[must_use]
    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    #[must_use]
    pub fn fetcher(&self) -> Arc<dyn ReplyFetcher> {
        Arc::clone(&self.fetcher)
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    fn show_loading(&mut self, cycle: CycleId) {
        self.transcript.show_indicator(cycle);
        self.container.append_indicator(cycle);
        self.container.scroll_to_bottom();
    }

    fn finish_cycle(&mut self, cycle: CycleId) -> bool {
        if self.pending.remove(&cycle).is_none() {
            debug!(name: "widget.reply.stale", cycle = %cycle, "Completion for unknown or resolved cycle");
            return false;
        }
        self.remove_loading(cycle);
        true
    }

    fn append_agent(&mut self, message: Message) {
        self.container.append_bubble(&message);
        self.container.scroll_to_bottom();
        self.transcript.push_message(message);
    }
}
