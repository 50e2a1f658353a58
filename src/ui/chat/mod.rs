//! Chat-specific UI components.

mod bubble;
mod header;
mod input_area;
mod message_list;
mod shell;

pub use bubble::{LoadingIndicator, MessageBubble};
pub use header::ChatHeader;
pub use input_area::{ChatInputArea, DRAFT_FIELD_ID, DraftField};
pub use message_list::{CHAT_BOX_ID, ChatMessageList};
pub use shell::ChatShell;
