//! Reusable UI components, rendered via Leptos SSR.
//!
//! - [`Button`]: styled button
//! - [`SendIcon`], [`SparklesIcon`]: inline SVG icons

mod button;
mod icons;

pub use button::{Button, ButtonSize};
pub use icons::{SendIcon, SparklesIcon};
