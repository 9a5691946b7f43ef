//! Utility helpers shared across page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure helpers (validation, URI encoding, banner text) and the timer task
//! primitive, kept apart from components so they test without a document.

pub mod email;
pub mod logging;
pub mod mailto;
pub mod task;
