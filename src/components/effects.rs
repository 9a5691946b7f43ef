//! Decorative page effects: hero parallax, floating profile photo, lazy
//! images, and the color-scheme watcher.
//!
//! Each effect is independent and silently skipped when its elements are not
//! on the page.

#[cfg(test)]
#[path = "effects_test.rs"]
mod effects_test;

use std::rc::Rc;

use crate::config::EffectsConfig;
use crate::dom::{Dom, IntersectionOptions, Observation, Target};
use crate::error::Result;

pub const HERO_SELECTOR: &str = ".hero";
pub const HERO_BACKGROUND_SELECTOR: &str = ".hero-background";
pub const PROFILE_PHOTO_SELECTOR: &str = ".profile-photo";
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";

const LAZY_CLASS: &str = "lazy";

pub fn parallax_offset(scroll_y: f64, factor: f64) -> f64 {
    scroll_y * factor
}

/// Vertical float offset at `now_ms`, one full cycle every 2π seconds.
pub fn float_offset(now_ms: f64, amplitude: f64) -> f64 {
    (now_ms * 0.001).sin() * amplitude
}

fn translate_y(px: f64) -> String {
    format!("translateY({px}px)")
}

/// Start every element-bound effect whose elements exist. Call once the
/// document has been parsed.
pub fn init_effects<D: Dom>(dom: &Rc<D>, config: &EffectsConfig) -> Result<()> {
    init_parallax(dom, config);
    init_profile_float(dom, config);
    init_lazy_images(dom)?;
    Ok(())
}

pub fn init_parallax<D: Dom>(dom: &Rc<D>, config: &EffectsConfig) {
    if dom.query(HERO_SELECTOR).is_none() {
        return;
    }
    let Some(background) = dom.query(HERO_BACKGROUND_SELECTOR) else {
        return;
    };
    let page = Rc::clone(dom);
    let factor = config.parallax_factor;
    dom.listen(
        Target::Window,
        "scroll",
        Box::new(move |_| {
            let offset = parallax_offset(page.scroll_y(), factor);
            page.set_style(&background, "transform", &translate_y(offset));
        }),
    );
}

/// Bob the profile photo on a fixed interval. Returns whether it was found.
pub fn init_profile_float<D: Dom>(dom: &Rc<D>, config: &EffectsConfig) -> bool {
    let Some(photo) = dom.query(PROFILE_PHOTO_SELECTOR) else {
        return false;
    };
    let page = Rc::clone(dom);
    let amplitude = config.float_amplitude;
    dom.set_interval(
        config.float_period_ms,
        Box::new(move || {
            let offset = float_offset(page.now_ms(), amplitude);
            page.set_style(&photo, "transform", &translate_y(offset));
        }),
    );
    true
}

/// Swap `data-src` into `src` the first time each image nears the viewport.
pub fn init_lazy_images<D: Dom>(dom: &Rc<D>) -> Result<usize> {
    let images = dom.query_all(LAZY_IMAGE_SELECTOR);
    let count = images.len();
    if count == 0 {
        return Ok(0);
    }
    let page = Rc::clone(dom);
    dom.observe_intersection(
        images,
        IntersectionOptions { threshold: 0.0, root_margin: "0px".to_owned() },
        Box::new(move |img, is_intersecting| {
            if !is_intersecting {
                return Observation::Keep;
            }
            if let Some(src) = page.attribute(img, "data-src") {
                page.set_attribute(img, "src", &src);
            }
            page.remove_class(img, LAZY_CLASS);
            Observation::Stop
        }),
    )?;
    log::debug!("lazy images: observing {count}");
    Ok(count)
}

pub fn watch_color_scheme<D: Dom>(dom: &Rc<D>) {
    let page = Rc::clone(dom);
    dom.listen(
        Target::ColorScheme,
        "change",
        Box::new(move |_| {
            let scheme = if page.prefers_dark() { "dark" } else { "light" };
            log::debug!("color scheme changed: {scheme}");
        }),
    );
}
