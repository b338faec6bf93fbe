//! Options controlling a single template render.
//!
//! # Example
//!
//! ```rust
//! use envtpl::RenderOptions;
//!
//! let options = RenderOptions {
//!     strict_mode: true,
//!     ..Default::default()
//! };
//! assert_eq!(options.template_name, "template");
//! ```

/// Name used in diagnostics when the caller does not provide one.
pub const DEFAULT_TEMPLATE_NAME: &str = "template";

/// Configuration for parsing and executing one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Name the template is registered under; shows up in error messages
    pub template_name: String,

    /// Fail on references to variables absent from the data context
    /// instead of rendering them as empty text
    pub strict_mode: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            strict_mode: false,
        }
    }
}

impl RenderOptions {
    pub fn named(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            ..Default::default()
        }
    }
}
