//! Core library: environment snapshot, template functions, and rendering.

pub mod environment;
pub mod error;
pub mod templates;
pub mod utils;

pub use environment::Environment;
pub use error::{Error, Result};
