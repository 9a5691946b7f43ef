//! Console logging setup, startup banner, and the page-wide error logger.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything logs through the `log` facade. In the browser build
//! `console_log` is the backend and `console_error_panic_hook` reports panics;
//! native tests run with no backend installed.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

use std::rc::Rc;

use crate::dom::{Dom, Target};

const BANNER_INNER_WIDTH: usize = 38;

/// Install the console backend and panic hook. Safe to call more than once.
#[cfg(feature = "csr")]
pub fn init(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}

/// Boxed, centered signature printed once at startup.
pub fn banner(owner: &str, lines: &[String]) -> String {
    let horizontal = "═".repeat(BANNER_INNER_WIDTH);
    let mut out = format!("\n    ╔{horizontal}╗\n");
    let blank = " ".repeat(BANNER_INNER_WIDTH);
    out.push_str(&format!("    ║{blank}║\n"));
    for line in std::iter::once(owner).chain(lines.iter().map(String::as_str)) {
        out.push_str(&format!("    ║{}║\n", center(line, BANNER_INNER_WIDTH)));
    }
    out.push_str(&format!("    ║{blank}║\n"));
    out.push_str(&format!("    ╚{horizontal}╝\n"));
    out
}

fn center(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if len >= width {
        return line.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{line}{}", " ".repeat(left), " ".repeat(right))
}

/// Log uncaught page errors and let the page carry on.
pub fn install_error_logger<D: Dom>(dom: &Rc<D>) {
    dom.listen(
        Target::Window,
        "error",
        Box::new(|ev| {
            let message = ev.message.as_deref().unwrap_or("unknown error");
            log::error!("Portfolio Error: {message}");
        }),
    );
}
