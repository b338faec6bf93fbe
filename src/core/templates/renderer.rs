//! Handlebars-based template pipeline
//!
//! A template moves through three stages, each its own type:
//!
//! 1. [`ParsedTemplate::parse`] compiles the body. Syntax errors surface here,
//!    before any environment lookup happens.
//! 2. [`ParsedTemplate::bind`] builds a registry holding the function
//!    namespace bound to one [`Environment`].
//! 3. [`BoundTemplate::execute`] renders with the environment as the data
//!    context, so `{{NAME}}` reads a variable directly.

use handlebars::{Handlebars, Template};

use crate::core::environment::Environment;
use crate::core::error::Result;
use crate::core::templates::options::RenderOptions;
use crate::core::templates::registry::Namespace;

/// A syntactically valid template not yet attached to an environment
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    name: String,
    template: Template,
}

impl ParsedTemplate {
    pub fn parse(name: impl Into<String>, body: &str) -> Result<Self> {
        let name = name.into();
        let template = Template::compile_with_name(body, name.clone())?;
        tracing::debug!("Parsed template '{}'", name);
        Ok(Self { name, template })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attaches the function namespace for `env` and the rendering mode.
    pub fn bind<'env>(self, env: &'env Environment, options: &RenderOptions) -> BoundTemplate<'env> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(options.strict_mode);

        let namespace = Namespace::bind(env);
        tracing::debug!(
            "Bound {} template functions to {} environment variables",
            namespace.len(),
            env.len()
        );
        namespace.install(&mut registry);
        registry.register_template(&self.name, self.template);

        BoundTemplate {
            name: self.name,
            env,
            registry,
        }
    }
}

/// A template ready to execute against its environment
pub struct BoundTemplate<'env> {
    name: String,
    env: &'env Environment,
    registry: Handlebars<'env>,
}

impl BoundTemplate<'_> {
    /// Renders the template. The first failing function aborts the render
    /// and no partial output is returned.
    pub fn execute(&self) -> Result<String> {
        let output = self.registry.render(&self.name, self.env)?;
        tracing::debug!("Rendered template '{}' ({} bytes)", self.name, output.len());
        Ok(output)
    }
}

/// Parses, binds, and executes `body` in one call.
pub fn render(body: &str, env: &Environment, options: &RenderOptions) -> Result<String> {
    ParsedTemplate::parse(options.template_name.clone(), body)?
        .bind(env, options)
        .execute()
}
