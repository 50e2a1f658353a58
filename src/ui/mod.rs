//! Server-rendered UI.
//!
//! Leptos SSR components render the page and every fragment htmx swaps into
//! it. The widget talks to the page only through the handles in
//! [`fragments`].
//!
//! # Structure
//!
//! - [`components`]: reusable building blocks
//! - [`chat`]: chat layout, bubbles and the typing indicator
//! - [`render`]: pure data-to-HTML functions
//! - [`fragments`]: [`FragmentSurface`] and [`FormInput`]

pub mod chat;
pub mod components;
pub mod fragments;
pub mod render;

pub use fragments::{FormInput, FragmentSurface, Fragments};
