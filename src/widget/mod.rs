//! Chat widget core.
//!
//! The widget owns the transcript data and pushes every visible change to
//! injected element handles. Nothing here knows about HTTP or HTML.
//!
//! # Structure
//!
//! - [`message`]: [`Message`] and [`Origin`]
//! - [`transcript`]: [`ChatTranscript`], [`CycleId`], indicator markers
//! - [`surface`]: element handle traits and in-memory implementations
//! - [`chat_widget`]: [`ChatWidget`] itself

pub mod chat_widget;
pub mod message;
pub mod surface;
pub mod transcript;

pub use chat_widget::{ChatWidget, PendingReply, REPLY_ERROR_TEXT, SubmitOutcome, WidgetState};
pub use message::{Message, Origin};
pub use surface::{DraftInput, MemoryInput, MemorySurface, SurfaceNode, TranscriptContainer};
pub use transcript::{ChatTranscript, CycleId, Entry, INDICATOR_MARKER_PREFIX, IndicatorMarker};
