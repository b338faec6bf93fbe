//! Template system.
//!
//! Templates use Handlebars syntax. Every environment accessor and string
//! utility is available as a helper taking positional arguments, and the
//! environment itself is the data context.

pub mod options;
pub mod registry;
pub mod renderer;

pub use options::*;
pub use registry::{Accessor, Namespace, Utility};
pub use renderer::{BoundTemplate, ParsedTemplate, render};
