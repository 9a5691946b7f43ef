//! Scroll-derived navigation state.
//!
//! Nothing here is stored: the scrolled flag and the active section are
//! recomputed from the current offsets on every scroll event.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

/// Position of one `section[id]` in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Whether the navbar should carry its `scrolled` style.
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Section whose `[top, top + height)` contains `scroll_y + probe_offset`.
///
/// When sections overlap the last one in document order wins.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, probe_offset: f64) -> Option<&str> {
    let position = scroll_y + probe_offset;
    sections
        .iter()
        .rev()
        .find(|section| section.contains(position))
        .map(|section| section.id.as_str())
}

/// `href` value a nav link needs to point at `section_id`.
pub fn section_href(section_id: &str) -> String {
    format!("#{section_id}")
}

/// Vertical offset to scroll to so a section clears the fixed header.
pub fn scroll_target(section_top: f64, header_offset: f64) -> f64 {
    section_top - header_offset
}
