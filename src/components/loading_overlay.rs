//! Startup loading overlay.
//!
//! Prepended to `<body>` at boot. Once the window `load` event fires (or
//! immediately, when the document is already complete) it fades out after
//! `fade_delay_ms` and is removed `remove_delay_ms` later.

#[cfg(test)]
#[path = "loading_overlay_test.rs"]
mod loading_overlay_test;

use std::rc::Rc;

use crate::config::LoadingConfig;
use crate::dom::{Dom, ReadyState, Target};
use crate::error::Result;

const OVERLAY_CLASS: &str = "loading-overlay";
const FADE_OUT_CLASS: &str = "fade-out";

const STYLES: &str = r"
.loading-overlay {
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 100%;
    background: linear-gradient(135deg, var(--bg-navy) 0%, #0d1929 50%, #112240 100%);
    display: flex;
    align-items: center;
    justify-content: center;
    z-index: 9999;
    transition: opacity 0.5s ease-out;
}

.loading-spinner {
    text-align: center;
    color: var(--primary-color);
}

.neural-loader {
    width: 80px;
    height: 80px;
    position: relative;
    margin: 0 auto 2rem;
}

.neural-loader::before,
.neural-loader::after {
    content: '';
    position: absolute;
    border-radius: 50%;
    animation: neuralSpin 2s linear infinite;
}

.neural-loader::before {
    width: 80px;
    height: 80px;
    border: 4px solid rgba(100, 255, 218, 0.2);
    border-top: 4px solid var(--primary-color);
}

.neural-loader::after {
    width: 60px;
    height: 60px;
    top: 10px;
    left: 10px;
    border: 3px solid rgba(0, 212, 255, 0.2);
    border-top: 3px solid var(--secondary-color);
    animation-direction: reverse;
    animation-duration: 1.5s;
}

@keyframes neuralSpin {
    0% { transform: rotate(0deg); }
    100% { transform: rotate(360deg); }
}

.loading-progress {
    width: 200px;
    height: 3px;
    background: rgba(100, 255, 218, 0.2);
    border-radius: 2px;
    margin: 1rem auto 0;
    overflow: hidden;
    position: relative;
}

.loading-progress::after {
    content: '';
    position: absolute;
    left: -100%;
    width: 100%;
    height: 100%;
    background: linear-gradient(90deg, var(--primary-color), var(--secondary-color));
    animation: progressSlide 2s ease-in-out infinite;
}

@keyframes progressSlide {
    0% { left: -100%; }
    100% { left: 100%; }
}

.loading-overlay.fade-out {
    opacity: 0;
    pointer-events: none;
}

.loading-spinner p {
    font-size: 1.1rem;
    margin-bottom: 1rem;
    color: var(--text-lighter);
}
";

fn overlay_markup(caption: &str) -> String {
    format!(
        r#"<div class="loading-spinner"><div class="neural-loader"></div><p>{}</p><div class="loading-progress"></div></div>"#,
        escape_html(caption)
    )
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Show the overlay and arrange its removal after page load.
pub fn init_loading_overlay<D: Dom>(dom: &Rc<D>, config: &LoadingConfig) -> Result<D::Element> {
    dom.append_style(STYLES)?;
    let overlay = dom.create_element("div", OVERLAY_CLASS, &overlay_markup(&config.caption))?;
    dom.prepend_to_body(&overlay)?;

    let dismiss = {
        let page = Rc::clone(dom);
        let overlay = overlay.clone();
        let fade_delay_ms = config.fade_delay_ms;
        let remove_delay_ms = config.remove_delay_ms;
        move || {
            let scheduler = Rc::clone(&page);
            scheduler.set_timeout(
                fade_delay_ms,
                Box::new(move || {
                    page.add_class(&overlay, FADE_OUT_CLASS);
                    let remover = Rc::clone(&page);
                    page.set_timeout(remove_delay_ms, Box::new(move || remover.remove(&overlay)));
                }),
            );
        }
    };

    if dom.ready_state() == ReadyState::Complete {
        dismiss();
    } else {
        let mut dismiss = Some(dismiss);
        dom.listen(
            Target::Window,
            "load",
            Box::new(move |_| {
                if let Some(dismiss) = dismiss.take() {
                    dismiss();
                }
            }),
        );
    }
    Ok(overlay)
}
