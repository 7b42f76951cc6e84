//! SlideDeck - markdown slide deck editor core
//!
//! Presentations are kept as one JSON map in a key-value storage backend,
//! edited through a [`core::session::SessionManager`] and opened by route.

pub mod app;
pub mod core;
pub mod router;
