//! Page configuration with built-in defaults.
//!
//! SYSTEM CONTEXT
//! ==============
//! A page may embed overrides as JSON in
//! `<script type="application/json" id="portfolio-config">`. Every key is
//! optional; missing keys keep their defaults.
//!
//! TRADE-OFFS
//! ==========
//! A malformed config block is logged and ignored rather than disabling the
//! page, matching how a missing element only disables its own component.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::Deserialize;

use crate::dom::{Dom, IntersectionOptions};
use crate::error::Result;
use crate::state::animator::TypingTiming;

pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

/// Recipient used when the page does not configure one. Mail sent here is lost.
pub const PLACEHOLDER_RECIPIENT: &str = "hello@example.com";

pub const DEFAULT_ROLES: [&str; 6] = [
    "Aspiring Data Scientist",
    "Machine Learning Enthusiast",
    "AI/ML Student",
    "Problem Solver",
    "Research Enthusiast",
    "Innovation Seeker",
];

pub const DEFAULT_REVEAL_SELECTORS: [&str; 14] = [
    ".section-header",
    ".about-text",
    ".stats-grid",
    ".education-item",
    ".skill-category",
    ".project-card",
    ".publication-card",
    ".timeline-item",
    ".achievement-card",
    ".cert-card",
    ".connect-card",
    ".contact-info",
    ".contact-form",
    ".follow-item",
];

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioConfig {
    pub log_level: String,
    pub banner: BannerConfig,
    pub navigation: NavConfig,
    pub typing: TypingConfig,
    pub reveal: RevealConfig,
    pub contact: ContactConfig,
    pub scroll_top: ScrollTopConfig,
    pub loading: LoadingConfig,
    pub effects: EffectsConfig,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            banner: BannerConfig::default(),
            navigation: NavConfig::default(),
            typing: TypingConfig::default(),
            reveal: RevealConfig::default(),
            contact: ContactConfig::default(),
            scroll_top: ScrollTopConfig::default(),
            loading: LoadingConfig::default(),
            effects: EffectsConfig::default(),
        }
    }
}

impl PortfolioConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read the embedded config block, falling back to defaults.
    pub fn load<D: Dom>(dom: &D) -> Self {
        let Some(el) = dom.element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        match Self::from_json(&dom.text(&el)) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
                Self::default()
            }
        }
    }

    /// Configured level, `Info` when unrecognized.
    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(self.log_level.trim()).unwrap_or(log::Level::Info)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct BannerConfig {
    pub owner: String,
    pub lines: Vec<String>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            owner: "Portfolio".to_owned(),
            lines: vec![
                "Data Science & AI/ML Portfolio".to_owned(),
                String::new(),
                "Powered by passion for".to_owned(),
                "data & AI innovation".to_owned(),
            ],
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NavConfig {
    pub scrolled_threshold: f64,
    pub active_probe_offset: f64,
    pub header_offset: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self { scrolled_threshold: 100.0, active_probe_offset: 100.0, header_offset: 80.0 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingConfig {
    pub roles: Vec<String>,
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_full_ms: u32,
    pub pause_next_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        let timing = TypingTiming::default();
        Self {
            roles: DEFAULT_ROLES.iter().map(|r| (*r).to_owned()).collect(),
            type_ms: timing.type_ms,
            delete_ms: timing.delete_ms,
            pause_full_ms: timing.pause_full_ms,
            pause_next_ms: timing.pause_next_ms,
        }
    }
}

impl TypingConfig {
    pub fn timing(&self) -> TypingTiming {
        TypingTiming {
            type_ms: self.type_ms,
            delete_ms: self.delete_ms,
            pause_full_ms: self.pause_full_ms,
            pause_next_ms: self.pause_next_ms,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub selectors: Vec<String>,
    pub stagger_ms: u32,
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_REVEAL_SELECTORS.iter().map(|s| (*s).to_owned()).collect(),
            stagger_ms: 100,
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_owned(),
        }
    }
}

impl RevealConfig {
    pub fn intersection(&self) -> IntersectionOptions {
        IntersectionOptions { threshold: self.threshold, root_margin: self.root_margin.clone() }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactConfig {
    pub recipient: String,
    pub reset_delay_ms: u32,
    pub message_hide_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self { recipient: PLACEHOLDER_RECIPIENT.to_owned(), reset_delay_ms: 500, message_hide_ms: 5000 }
    }
}

impl ContactConfig {
    pub fn uses_placeholder_recipient(&self) -> bool {
        let recipient = self.recipient.trim();
        recipient.is_empty() || recipient.eq_ignore_ascii_case(PLACEHOLDER_RECIPIENT)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollTopConfig {
    pub show_after: f64,
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self { show_after: 500.0 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadingConfig {
    pub caption: String,
    pub fade_delay_ms: u32,
    pub remove_delay_ms: u32,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            caption: "Initializing Data Science Portfolio...".to_owned(),
            fade_delay_ms: 1000,
            remove_delay_ms: 500,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectsConfig {
    pub parallax_factor: f64,
    pub float_amplitude: f64,
    pub float_period_ms: u32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self { parallax_factor: 0.5, float_amplitude: 10.0, float_period_ms: 16 }
    }
}
