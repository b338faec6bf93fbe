//! Application layer - turns a command line and an environment into output

// Internal imports (std, crate)
use crate::core::environment::Environment;
use crate::core::error::{Error, Result};
use crate::core::templates::{RenderOptions, render};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use clap::Parser;

/// Render a template file using values from the process environment
#[derive(Parser, Debug)]
#[command(name = "envtpl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the template file
    pub template: PathBuf,

    /// Fail when the template references a variable that is not set
    #[arg(long, env = "ENVTPL_STRICT")]
    pub strict: bool,
}

impl Cli {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            strict_mode: self.strict,
            ..RenderOptions::named(self.template.display().to_string())
        }
    }
}

/// Parses `args` (program name first) and renders the named template
/// against `env`.
pub fn run<I, T>(args: I, env: Environment) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(Error::Usage)?;
    render_file(&cli.template, &env, &cli.render_options())
}

/// Reads the template at `path` and renders it.
pub fn render_file(path: &Path, env: &Environment, options: &RenderOptions) -> Result<String> {
    tracing::info!(template = %path.display(), "Rendering template");
    let body = fs::read_to_string(path).map_err(|source| Error::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    render(&body, env, options)
}
