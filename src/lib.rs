//! Interactive behavior for a single-page personal portfolio.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled to WASM and loaded by the static portfolio page. On start it reads
//! optional JSON config from the page, installs console logging, and boots the
//! page components: navbar state, typing animation, scroll reveals, the
//! contact form mail hand-off, scroll-to-top, the loading overlay, and
//! decorative effects.
//!
//! DESIGN
//! ======
//! All document access goes through the `dom::Dom` trait so every component
//! runs natively under `cargo test` against an in-memory document.

pub mod app;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod state;
pub mod util;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use std::rc::Rc;

    let dom = match dom::web::WebDom::new() {
        Ok(dom) => Rc::new(dom),
        Err(err) => {
            util::logging::init(log::Level::Warn);
            log::error!("portfolio not started: {err}");
            return;
        }
    };
    let config = config::PortfolioConfig::load(&*dom);
    util::logging::init(config.log_level());
    app::boot(&dom, config);
}
