//! Floating scroll-to-top button.

#[cfg(test)]
#[path = "scroll_top_test.rs"]
mod scroll_top_test;

use std::rc::Rc;

use crate::config::ScrollTopConfig;
use crate::dom::{Dom, Target};
use crate::error::Result;

const BUTTON_CLASS: &str = "scroll-to-top";
const VISIBLE_CLASS: &str = "visible";
const BUTTON_ICON: &str = r#"<i class="fas fa-arrow-up"></i>"#;

const STYLES: &str = r"
.scroll-to-top {
    position: fixed;
    bottom: 2rem;
    right: 2rem;
    width: 50px;
    height: 50px;
    background: var(--primary-color);
    color: var(--bg-navy);
    border: none;
    border-radius: 50%;
    cursor: pointer;
    font-size: 1.2rem;
    transition: var(--transition);
    z-index: 1000;
    opacity: 0;
    transform: translateY(20px);
    pointer-events: none;
}

.scroll-to-top.visible {
    opacity: 1;
    transform: translateY(0);
    pointer-events: all;
}

.scroll-to-top:hover {
    background: var(--secondary-color);
    transform: translateY(-3px);
}

@media (max-width: 768px) {
    .scroll-to-top {
        width: 45px;
        height: 45px;
        bottom: 1.5rem;
        right: 1.5rem;
        font-size: 1rem;
    }
}
";

pub fn should_show(scroll_y: f64, show_after: f64) -> bool {
    scroll_y > show_after
}

/// Inject the button and its styles, then track scroll position.
pub fn init_scroll_top<D: Dom>(dom: &Rc<D>, config: &ScrollTopConfig) -> Result<D::Element> {
    dom.append_style(STYLES)?;
    let button = dom.create_element("button", BUTTON_CLASS, BUTTON_ICON)?;
    dom.set_attribute(&button, "aria-label", "Scroll to top");
    dom.append_to_body(&button)?;

    {
        let page = Rc::clone(dom);
        let el = button.clone();
        let show_after = config.show_after;
        dom.listen(
            Target::Window,
            "scroll",
            Box::new(move |_| {
                if should_show(page.scroll_y(), show_after) {
                    page.add_class(&el, VISIBLE_CLASS);
                } else {
                    page.remove_class(&el, VISIBLE_CLASS);
                }
            }),
        );
    }

    let page = Rc::clone(dom);
    dom.listen(Target::Element(button.clone()), "click", Box::new(move |_| page.scroll_to(0.0)));
    Ok(button)
}
