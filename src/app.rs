//! Page boot sequence.
//!
//! SYSTEM CONTEXT
//! ==============
//! Called once from the WASM start hook with a live `WebDom`, and from tests
//! with `FakeDom`. Chrome that does not depend on page content (error logger,
//! banner, loading overlay, color-scheme watcher) starts immediately. Anything
//! that looks up page elements, decorative effects included, waits until the
//! document has been parsed.
//!
//! TRADE-OFFS
//! ==========
//! A component that fails to initialize is logged at `warn` and the rest of
//! the page keeps working.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use crate::components::contact_form::init_contact_form;
use crate::components::effects::{init_effects, watch_color_scheme};
use crate::components::loading_overlay::init_loading_overlay;
use crate::components::navigation::{init_anchor_links, init_mobile_menu, init_navigation};
use crate::components::reveal::init_reveal;
use crate::components::scroll_top::init_scroll_top;
use crate::components::typing::init_typing;
use crate::config::PortfolioConfig;
use crate::dom::{Dom, ReadyState, Target};
use crate::error::Result;
use crate::util::logging::{banner, install_error_logger};

/// Start everything. Content components run now or on `DOMContentLoaded`.
pub fn boot<D: Dom>(dom: &Rc<D>, config: PortfolioConfig) {
    install_error_logger(dom);
    log::info!("{}", banner(&config.banner.owner, &config.banner.lines));

    report("loading overlay", init_loading_overlay(dom, &config.loading));
    watch_color_scheme(dom);

    if dom.ready_state() == ReadyState::Loading {
        let page = Rc::clone(dom);
        let mut pending = Some(config);
        dom.listen(
            Target::Document,
            "DOMContentLoaded",
            Box::new(move |_| {
                if let Some(config) = pending.take() {
                    init_content(&page, &config);
                }
            }),
        );
    } else {
        init_content(dom, &config);
    }
}

fn init_content<D: Dom>(dom: &Rc<D>, config: &PortfolioConfig) {
    report("navigation", init_navigation(dom, &config.navigation));
    report("typing", init_typing(dom, &config.typing));
    report("reveal", init_reveal(dom, &config.reveal));
    report("contact form", init_contact_form(dom, &config.contact));
    report("anchor links", init_anchor_links(dom, &config.navigation));
    report("scroll to top", init_scroll_top(dom, &config.scroll_top));
    report("mobile menu", init_mobile_menu(dom));
    report("effects", init_effects(dom, &config.effects));
    log::info!("portfolio ready");
}

fn report<T>(component: &str, outcome: Result<T>) {
    if let Err(err) = outcome {
        log::warn!("{component} disabled: {err}");
    }
}
