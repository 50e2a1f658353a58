//! Chat widget server.
//!
//! Renders a chat page, relays each submitted message to a chat-reply
//! service and shows the reply. The widget runs server-side; htmx swaps the
//! fragments it produces into the page.
//!
//! # Modules
//!
//! - [`widget`]: transcript model and the [`ChatWidget`](widget::ChatWidget) core
//! - [`reply`]: the reply-fetch collaborator (`POST /chat`)
//! - [`ui`]: Leptos SSR components and fragment-producing element handles
//! - [`session`]: one widget per page load
//! - [`server`]: axum routes
//! - [`config`]: layered configuration

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod reply;
pub mod server;
pub mod session;
pub mod ui;
pub mod widget;

use std::sync::Arc;

use crate::config::AppConfig;
use session::SessionStore;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// One session per page load.
    pub sessions: SessionStore,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
