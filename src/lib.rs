//! envtpl renders text templates whose values come from environment
//! variables, typically to produce configuration files at container start.
//!
//! ```
//! use envtpl::{Environment, RenderOptions, render};
//!
//! let env: Environment = [("NAME", "World")].into_iter().collect();
//! let output = render(r#"Hello {{asStringOr "NAME" "default"}}"#, &env, &RenderOptions::default())?;
//! assert_eq!(output, "Hello World");
//! # Ok::<(), envtpl::Error>(())
//! ```
#![deny(unsafe_code)]

pub mod application;
pub mod core;

pub use application::{Cli, render_file, run};
pub use crate::core::environment::Environment;
pub use crate::core::error::{Error, Result};
pub use crate::core::templates::{BoundTemplate, Namespace, ParsedTemplate, RenderOptions, render};
