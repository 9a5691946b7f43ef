//! Scroll-triggered fade-in reveals.
//!
//! Each matched element gets `fade-in` plus a transition delay staggered by
//! its index within its selector group. The first time it intersects the
//! viewport it gains `visible`, which is never removed.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::rc::Rc;

use crate::config::RevealConfig;
use crate::dom::{Dom, Observation};
use crate::error::Result;

const FADE_IN_CLASS: &str = "fade-in";
const VISIBLE_CLASS: &str = "visible";

/// CSS `transition-delay` for the `index`-th element of a selector group.
pub fn stagger_delay(index: usize, step_ms: u32) -> String {
    format!("{}ms", index as u64 * u64::from(step_ms))
}

/// Tag and observe every element matching the configured selectors.
///
/// Returns the number of elements being watched.
pub fn init_reveal<D: Dom>(dom: &Rc<D>, config: &RevealConfig) -> Result<usize> {
    let mut watched = Vec::new();
    for selector in &config.selectors {
        for (index, el) in dom.query_all(selector).into_iter().enumerate() {
            dom.add_class(&el, FADE_IN_CLASS);
            dom.set_style(&el, "transition-delay", &stagger_delay(index, config.stagger_ms));
            watched.push(el);
        }
    }
    let count = watched.len();
    if count == 0 {
        log::debug!("reveal: no matching elements");
        return Ok(0);
    }

    let page = Rc::clone(dom);
    dom.observe_intersection(
        watched,
        config.intersection(),
        Box::new(move |el, is_intersecting| {
            if is_intersecting {
                page.add_class(el, VISIBLE_CLASS);
            }
            Observation::Keep
        }),
    )?;
    log::debug!("reveal: observing {count} elements");
    Ok(count)
}
