//! Page state and its transitions, independent of the document.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components own the wiring to `Dom`; these modules own the decisions so they
//! can be tested as plain values.

pub mod animator;
pub mod form;
pub mod nav;
