//! Page component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each component finds its elements through `Dom`, wires listeners and
//! timers, and skips itself when its elements are missing. Decisions live in
//! `state`; components only translate them into document edits.

pub mod contact_form;
pub mod effects;
pub mod loading_overlay;
pub mod navigation;
pub mod reveal;
pub mod scroll_top;
pub mod typing;
