//! Navbar scroll state, active-link highlighting, in-page link scrolling,
//! and the mobile menu.
//!
//! SYSTEM CONTEXT
//! ==============
//! Expects `#navbar` containing `#nav-menu`, `#hamburger` and `.nav-link`
//! anchors whose `href` is `#<section id>`. Each piece is skipped when its
//! elements are absent.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::rc::Rc;

use crate::config::NavConfig;
use crate::dom::{Dom, Target};
use crate::error::Result;
use crate::state::nav::{SectionBounds, active_section, is_scrolled, scroll_target, section_href};

pub const NAVBAR_ID: &str = "navbar";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const HAMBURGER_ID: &str = "hamburger";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

const SCROLLED_CLASS: &str = "scrolled";
const ACTIVE_CLASS: &str = "active";

/// Wire the navbar `scrolled` toggle, active-link tracking, and nav-link clicks.
pub fn init_navigation<D: Dom>(dom: &Rc<D>, config: &NavConfig) -> Result<()> {
    let links = dom.query_all(NAV_LINK_SELECTOR);
    let sections = dom.query_all(SECTION_SELECTOR);
    let menu = MobileMenu::find(&**dom);

    if let Some(navbar) = dom.element_by_id(NAVBAR_ID) {
        let page = Rc::clone(dom);
        let threshold = config.scrolled_threshold;
        dom.listen(
            Target::Window,
            "scroll",
            Box::new(move |_| {
                if is_scrolled(page.scroll_y(), threshold) {
                    page.add_class(&navbar, SCROLLED_CLASS);
                } else {
                    page.remove_class(&navbar, SCROLLED_CLASS);
                }
            }),
        );
    }

    let tracker = Rc::new(ActiveLinkTracker {
        links: links.clone(),
        sections,
        probe_offset: config.active_probe_offset,
    });
    tracker.update(&**dom);
    {
        let page = Rc::clone(dom);
        let tracker = Rc::clone(&tracker);
        dom.listen(Target::Window, "scroll", Box::new(move |_| tracker.update(&*page)));
    }

    for link in &links {
        let page = Rc::clone(dom);
        let link_el = link.clone();
        let menu = menu.clone();
        let header_offset = config.header_offset;
        dom.listen(
            Target::Element(link.clone()),
            "click",
            Box::new(move |ev| {
                ev.prevent_default();
                let Some(section) = page.attribute(&link_el, "href").and_then(|href| page.query(&href)) else {
                    return;
                };
                page.scroll_to(scroll_target(page.offset_top(&section), header_offset));
                if let Some(menu) = &menu {
                    menu.close(&*page);
                }
            }),
        );
    }

    log::debug!("navigation: {} links, {} sections", links.len(), tracker.sections.len());
    Ok(())
}

/// Smooth-scroll every in-page `#...` anchor past the fixed header.
pub fn init_anchor_links<D: Dom>(dom: &Rc<D>, config: &NavConfig) -> Result<()> {
    let anchors = dom.query_all(ANCHOR_SELECTOR);
    for anchor in &anchors {
        let page = Rc::clone(dom);
        let anchor_el = anchor.clone();
        let header_offset = config.header_offset;
        dom.listen(
            Target::Element(anchor.clone()),
            "click",
            Box::new(move |ev| {
                let Some(href) = page.attribute(&anchor_el, "href") else {
                    return;
                };
                if href == "#" {
                    ev.prevent_default();
                    return;
                }
                // Unknown targets keep the browser's default jump.
                if let Some(target) = page.query(&href) {
                    ev.prevent_default();
                    page.scroll_to(scroll_target(page.offset_top(&target), header_offset));
                }
            }),
        );
    }
    log::debug!("anchor scrolling: {} links", anchors.len());
    Ok(())
}

/// Hamburger toggle plus close-on-link and close-on-outside-click.
pub fn init_mobile_menu<D: Dom>(dom: &Rc<D>) -> Result<()> {
    let Some(menu) = MobileMenu::find(&**dom) else {
        log::debug!("mobile menu: #{NAV_MENU_ID} or #{HAMBURGER_ID} missing, skipped");
        return Ok(());
    };

    {
        let page = Rc::clone(dom);
        let menu = menu.clone();
        dom.listen(Target::Element(menu.hamburger.clone()), "click", Box::new(move |_| menu.toggle(&*page)));
    }

    for link in dom.query_all(NAV_LINK_SELECTOR) {
        let page = Rc::clone(dom);
        let menu = menu.clone();
        dom.listen(Target::Element(link), "click", Box::new(move |_| menu.close(&*page)));
    }

    if let Some(navbar) = dom.element_by_id(NAVBAR_ID) {
        let page = Rc::clone(dom);
        dom.listen(
            Target::Document,
            "click",
            Box::new(move |ev| {
                let inside = ev.target.as_ref().is_some_and(|target| page.contains(&navbar, target));
                if !inside {
                    menu.close(&*page);
                }
            }),
        );
    }
    Ok(())
}

struct ActiveLinkTracker<E> {
    links: Vec<E>,
    sections: Vec<E>,
    probe_offset: f64,
}

impl<E> ActiveLinkTracker<E> {
    /// Mark the link for the section under the probe line; clear all others.
    fn update<D: Dom<Element = E>>(&self, dom: &D) {
        let bounds: Vec<SectionBounds> = self
            .sections
            .iter()
            .filter_map(|section| {
                let id = dom.attribute(section, "id")?;
                Some(SectionBounds { id, top: dom.offset_top(section), height: dom.offset_height(section) })
            })
            .collect();
        let active_href = active_section(&bounds, dom.scroll_y(), self.probe_offset).map(section_href);

        for link in &self.links {
            let is_active = active_href.is_some() && dom.attribute(link, "href") == active_href;
            if is_active {
                dom.add_class(link, ACTIVE_CLASS);
            } else {
                dom.remove_class(link, ACTIVE_CLASS);
            }
        }
    }
}

#[derive(Clone)]
struct MobileMenu<E> {
    menu: E,
    hamburger: E,
}

impl<E: Clone> MobileMenu<E> {
    fn find<D: Dom<Element = E>>(dom: &D) -> Option<Self> {
        Some(Self { menu: dom.element_by_id(NAV_MENU_ID)?, hamburger: dom.element_by_id(HAMBURGER_ID)? })
    }

    fn toggle<D: Dom<Element = E>>(&self, dom: &D) {
        dom.toggle_class(&self.menu, ACTIVE_CLASS);
        dom.toggle_class(&self.hamburger, ACTIVE_CLASS);
    }

    fn close<D: Dom<Element = E>>(&self, dom: &D) {
        dom.remove_class(&self.menu, ACTIVE_CLASS);
        dom.remove_class(&self.hamburger, ACTIVE_CLASS);
    }
}
