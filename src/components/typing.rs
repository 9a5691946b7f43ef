//! Hero typing animation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders `AnimatorState` frames into `#typing-text`. One `RepeatingTask`
//! drives the ticks for the life of the page. It is paused on `pagehide` and
//! resumed on `pageshow`, so a page restored from the back/forward cache keeps
//! animating.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

use std::rc::Rc;

use crate::config::TypingConfig;
use crate::dom::{Dom, Target};
use crate::error::Result;
use crate::state::animator::{AnimatorState, RoleList};
use crate::util::task::RepeatingTask;

pub const TYPING_TEXT_ID: &str = "typing-text";

/// Start the animation. Returns `None` when the page has no typing element.
pub fn init_typing<D: Dom>(dom: &Rc<D>, config: &TypingConfig) -> Result<Option<RepeatingTask>> {
    let Some(el) = dom.element_by_id(TYPING_TEXT_ID) else {
        log::debug!("typing: #{TYPING_TEXT_ID} missing, skipped");
        return Ok(None);
    };
    let roles = RoleList::new(config.roles.iter().cloned())?;
    let timing = config.timing();

    let page = Rc::clone(dom);
    let mut state = AnimatorState::default();
    let task = RepeatingTask::start(dom, move || {
        let text = state.tick(&roles, &timing);
        page.set_text(&el, &text);
        state.delay_ms()
    });

    let on_leave = task.clone();
    dom.listen(Target::Window, "pagehide", Box::new(move |_| on_leave.cancel()));
    let on_return = task.clone();
    let page = Rc::clone(dom);
    dom.listen(Target::Window, "pageshow", Box::new(move |_| on_return.resume(&page)));

    log::debug!("typing: cycling {} roles", config.roles.len());
    Ok(Some(task))
}
