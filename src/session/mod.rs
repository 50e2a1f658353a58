//! Session management.
//!
//! Every page load gets its own [`Session`], which owns the
//! [`ChatWidget`](crate::widget::ChatWidget) serving that page. Sessions
//! live in memory only and are swept after a period of inactivity.
//!
//! # Example
//!
//! ```rust,ignore
//! let store = SessionStore::new(fetcher);
//! let session = store.create();
//! let pending = session.widget().await.begin_submit("Hello!");
//! ```

mod thread;

pub use thread::{DEFAULT_SESSION_TIMEOUT, PageWidget, Session, SessionStore};
