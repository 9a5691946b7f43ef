//! Document capability used by every page component.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components never touch `web_sys` directly. They talk to a `Dom`, which the
//! browser build backs with `WebDom` and tests back with an in-memory fake.
//!
//! DESIGN
//! ======
//! The page is single-threaded, so handlers and timer callbacks are plain
//! `'static` boxed closures and shared state lives in `Rc`. Mutations that the
//! browser can reject only during setup (element creation, insertion) return
//! `Result`; class/style/text edits are fire-and-forget.

use std::cell::Cell;

use crate::error::Result;

#[cfg(test)]
pub mod fake;
#[cfg(feature = "csr")]
pub mod web;

/// Where an event listener is attached.
#[derive(Clone, Debug, PartialEq)]
pub enum Target<E> {
    Window,
    Document,
    Element(E),
    /// The `(prefers-color-scheme: dark)` media query list.
    ColorScheme,
}

/// Document loading phase, as reported by `document.readyState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// Intersection watcher settings.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionOptions {
    pub threshold: f64,
    pub root_margin: String,
}

/// Whether an intersection watcher keeps observing an element after a callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    Keep,
    Stop,
}

/// Event view handed to listeners.
#[derive(Debug)]
pub struct DomEvent<E> {
    pub target: Option<E>,
    pub message: Option<String>,
    prevented: Cell<bool>,
}

impl<E> DomEvent<E> {
    pub fn new(target: Option<E>) -> Self {
        Self { target, message: None, prevented: Cell::new(false) }
    }

    #[must_use]
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Suppress the browser default action once the handler returns.
    pub fn prevent_default(&self) {
        self.prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

pub type Handler<E> = Box<dyn FnMut(&DomEvent<E>)>;
pub type IntersectionHandler<E> = Box<dyn FnMut(&E, bool) -> Observation>;

pub trait Dom: 'static {
    type Element: Clone + 'static;

    // Lookup.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query_in(&self, root: &Self::Element, selector: &str) -> Option<Self::Element>;
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    // Element state.
    fn add_class(&self, el: &Self::Element, class: &str);
    fn remove_class(&self, el: &Self::Element, class: &str);
    fn has_class(&self, el: &Self::Element, class: &str) -> bool;
    fn set_class_name(&self, el: &Self::Element, value: &str);
    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);
    fn remove_attribute(&self, el: &Self::Element, name: &str);
    fn text(&self, el: &Self::Element) -> String;
    fn set_text(&self, el: &Self::Element, text: &str);
    fn set_style(&self, el: &Self::Element, property: &str, value: &str);
    fn offset_top(&self, el: &Self::Element) -> f64;
    fn offset_height(&self, el: &Self::Element) -> f64;

    fn toggle_class(&self, el: &Self::Element, class: &str) {
        if self.has_class(el, class) {
            self.remove_class(el, class);
        } else {
            self.add_class(el, class);
        }
    }

    fn set_disabled(&self, el: &Self::Element, disabled: bool) {
        if disabled {
            self.set_attribute(el, "disabled", "");
        } else {
            self.remove_attribute(el, "disabled");
        }
    }

    // Forms.
    fn field_value(&self, form: &Self::Element, name: &str) -> String;
    fn reset_form(&self, form: &Self::Element);

    // Tree edits.
    fn create_element(&self, tag: &str, class: &str, inner_html: &str) -> Result<Self::Element>;
    fn prepend_to_body(&self, el: &Self::Element) -> Result<()>;
    fn append_to_body(&self, el: &Self::Element) -> Result<()>;
    fn append_style(&self, css: &str) -> Result<()>;
    fn remove(&self, el: &Self::Element);

    // Window.
    fn scroll_y(&self) -> f64;
    /// Smooth-scroll the window to a vertical offset.
    fn scroll_to(&self, top: f64);
    fn navigate(&self, href: &str);
    fn prefers_dark(&self) -> bool;
    fn now_ms(&self) -> f64;
    fn ready_state(&self) -> ReadyState;

    // Scheduling.
    fn listen(&self, target: Target<Self::Element>, event: &'static str, handler: Handler<Self::Element>);
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>);
    fn observe_intersection(
        &self,
        elements: Vec<Self::Element>,
        options: IntersectionOptions,
        handler: IntersectionHandler<Self::Element>,
    ) -> Result<()>;
}
