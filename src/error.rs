//! Error types shared by the page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Component initializers return `PortfolioError` so the boot sequence can log
//! a broken component and keep starting the others.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("missing required element `{0}`")]
    MissingElement(String),

    #[error("role list must contain at least one non-empty role")]
    EmptyRoleList,

    #[error("invalid page configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("browser call failed: {0}")]
    Browser(String),
}

#[cfg(feature = "csr")]
impl From<wasm_bindgen::JsValue> for PortfolioError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Browser(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
