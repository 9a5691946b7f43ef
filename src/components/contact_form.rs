//! Contact form: validation, `mailto:` hand-off, and the status line.
//!
//! SYSTEM CONTEXT
//! ==============
//! There is no backend. A valid submission navigates to a `mailto:` URI and
//! the page cannot observe whether a mail client opened or a message was
//! sent, so the success message is shown unconditionally after a short delay.

#[cfg(test)]
#[path = "contact_form_test.rs"]
mod contact_form_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::config::{CONFIG_ELEMENT_ID, ContactConfig, PLACEHOLDER_RECIPIENT};
use crate::dom::{Dom, Target};
use crate::error::Result;
use crate::state::form::{FormFields, MessageKind};
use crate::util::mailto::compose_mailto;

pub const CONTACT_FORM_ID: &str = "contact-form";
pub const FORM_MESSAGE_ID: &str = "form-message";
pub const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";

pub const SENDING_LABEL: &str = "Sending...";
pub const HANDOFF_MESSAGE: &str = "Opening your email client to send the message...";

/// Inline status line under the form. Each message hides itself after a delay.
pub struct StatusLine<D: Dom> {
    dom: Rc<D>,
    el: Option<D::Element>,
    hide_after_ms: u32,
    generation: Rc<Cell<u64>>,
}

impl<D: Dom> StatusLine<D> {
    pub fn new(dom: &Rc<D>, hide_after_ms: u32) -> Self {
        Self {
            dom: Rc::clone(dom),
            el: dom.element_by_id(FORM_MESSAGE_ID),
            hide_after_ms,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn show(&self, text: &str, kind: MessageKind) {
        let Some(el) = &self.el else {
            return;
        };
        self.dom.set_text(el, text);
        self.dom.set_class_name(el, &format!("form-message {}", kind.as_class()));
        self.dom.set_style(el, "display", "block");

        // Only the most recent message's timer may hide the line.
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let current = Rc::clone(&self.generation);
        let dom = Rc::clone(&self.dom);
        let el = el.clone();
        self.dom.set_timeout(
            self.hide_after_ms,
            Box::new(move || {
                if current.get() == generation {
                    dom.set_style(&el, "display", "none");
                }
            }),
        );
    }
}

/// Attach the submit handler. Skipped when the page has no contact form.
pub fn init_contact_form<D: Dom>(dom: &Rc<D>, config: &ContactConfig) -> Result<()> {
    let Some(form) = dom.element_by_id(CONTACT_FORM_ID) else {
        log::debug!("contact form: #{CONTACT_FORM_ID} missing, skipped");
        return Ok(());
    };
    if config.uses_placeholder_recipient() {
        log::warn!(
            "contact form: no recipient configured in #{CONFIG_ELEMENT_ID}, messages go to {PLACEHOLDER_RECIPIENT}"
        );
    }
    let status = Rc::new(StatusLine::new(dom, config.message_hide_ms));
    let page = Rc::clone(dom);
    let form_el = form.clone();
    let config = config.clone();
    dom.listen(
        Target::Element(form),
        "submit",
        Box::new(move |ev| {
            ev.prevent_default();
            submit(&page, &form_el, &status, &config);
        }),
    );
    Ok(())
}

fn submit<D: Dom>(dom: &Rc<D>, form: &D::Element, status: &Rc<StatusLine<D>>, config: &ContactConfig) {
    let fields = FormFields::read(|name| dom.field_value(form, name));
    if let Err(err) = fields.validate() {
        status.show(&err.to_string(), MessageKind::Error);
        return;
    }

    let button = dom.query_in(form, SUBMIT_SELECTOR);
    let original_label = button.as_ref().map(|b| dom.text(b));
    if let Some(button) = &button {
        dom.set_text(button, SENDING_LABEL);
        dom.set_disabled(button, true);
    }

    log::info!("handing contact message off to the mail client");
    dom.navigate(&compose_mailto(&config.recipient, &fields));

    let page = Rc::clone(dom);
    let form = form.clone();
    let status = Rc::clone(status);
    dom.set_timeout(
        config.reset_delay_ms,
        Box::new(move || {
            status.show(HANDOFF_MESSAGE, MessageKind::Success);
            page.reset_form(&form);
            if let (Some(button), Some(label)) = (&button, &original_label) {
                page.set_text(button, label);
                page.set_disabled(button, false);
            }
        }),
    );
}
