//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `wirekit check` | Bootstrap the container and report module states |
//! | `wirekit parameters` | Print every declared parameter as JSON |
//! | `wirekit services` | List bindings with their implementation and tags |
//! | `wirekit registry` | List linked implementations and external modules |

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;
use wirekit_domain::error::Result;
use wirekit_infrastructure::Kernel;
use wirekit_infrastructure::config::{KernelSettings, SettingsLoader};

/// Command line interface for wirekit
#[derive(Parser, Debug)]
#[command(name = "wirekit")]
#[command(about = "Declarative dependency-injection wiring from JSON configuration")]
#[command(version)]
pub struct Cli {
    /// Project directory holding `wirekit.toml` and the configuration directory
    #[arg(short, long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Environment selecting `*_{env}.json` overlays
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Kernel settings file, instead of `<project-dir>/wirekit.toml`
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Bootstrap the container and report module states
    Check,
    /// Print every declared parameter as JSON
    Parameters,
    /// List bindings with their implementation and tags
    Services,
    /// List linked implementations and external modules
    Registry,
}

impl Cli {
    /// Resolve kernel settings from the settings file, environment and flags
    pub fn settings(&self) -> Result<KernelSettings> {
        let mut loader = SettingsLoader::new();
        if let Some(project_dir) = &self.project_dir {
            loader = loader.with_project_dir(project_dir);
        }
        if let Some(path) = &self.settings {
            loader = loader.with_settings_path(path);
        }
        let mut settings = loader.load()?;
        if let Some(env) = &self.env {
            settings.environment.clone_from(env);
        }
        Ok(settings)
    }
}

/// Run a subcommand and return its output
pub fn execute(command: Command, settings: KernelSettings) -> Result<String> {
    let kernel = Kernel::new(settings);
    match command {
        Command::Check => check(&kernel),
        Command::Parameters => {
            let parameters = kernel.parameters()?;
            Ok(serde_json::to_string_pretty(&Value::Object(parameters))?)
        }
        Command::Services => services(&kernel),
        Command::Registry => Ok(registry(&kernel)),
    }
}

fn check(kernel: &Kernel) -> Result<String> {
    let container = kernel.initialize()?;
    let mut out = String::new();
    for (name, state) in kernel.module_states().unwrap_or_default() {
        out.push_str(&format!("module {name}: {state}\n"));
    }
    out.push_str(&format!(
        "OK: {} bindings in environment \"{}\"\n",
        container.bindings().len(),
        kernel.settings().environment
    ));
    Ok(out)
}

fn services(kernel: &Kernel) -> Result<String> {
    let container = kernel.initialize()?;
    let mut out = String::new();
    for binding in container.bindings() {
        let Some(implementation) = binding.implementation else {
            continue;
        };
        if binding.tags.is_empty() {
            out.push_str(&format!("{} -> {implementation}\n", binding.id));
        } else {
            out.push_str(&format!(
                "{} -> {implementation} [{}]\n",
                binding.id,
                binding.tags.join(", ")
            ));
        }
    }
    Ok(out)
}

fn registry(kernel: &Kernel) -> String {
    let mut out = String::from("implementations:\n");
    for (path, description) in kernel.implementations().list() {
        out.push_str(&format!("  {path}  {description}\n"));
    }
    out.push_str("external modules:\n");
    for (name, description) in kernel.external_modules().list() {
        out.push_str(&format!("  {name}  {description}\n"));
    }
    out
}
