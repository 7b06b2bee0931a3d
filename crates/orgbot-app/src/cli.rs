//! CLI argument definitions for the orgbot console.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Args, Parser, Subcommand, ValueEnum};
use orgbot_knowledge::IngestionMode;
use std::path::PathBuf;

/// orgbot: create organization assistants and chat with them.
#[derive(Parser, Debug)]
#[command(name = "orgbot", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the assistant service.
    #[arg(short = 'u', long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the organizations known to the service.
    Orgs,
    /// Chat with an organization's assistant.
    Chat {
        /// Identifier of the organization, as shown by `orgbot orgs`.
        organization_id: String,
    },
    /// Create a new organization assistant.
    Create(CreateArgs),
    /// Write the effective configuration to the config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Draft fields for `orgbot create`.
///
/// Required-ness is checked by the draft itself, so missing values produce
/// the same messages as an interactive form would.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Chatbot name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// What the chatbot will do.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Ingestion mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Automatic)]
    pub mode: ModeArg,

    /// PDF describing the organization (automatic mode).
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Organization name (manual mode).
    #[arg(long = "org-name", default_value = "")]
    pub org_name: String,

    #[arg(long, default_value = "")]
    pub website: String,

    #[arg(long, default_value = "")]
    pub industry: String,

    /// Short description of the organization.
    #[arg(long, default_value = "")]
    pub about: String,

    /// Employee entry, repeatable.
    #[arg(long = "employee", value_name = "NAME=ROLE")]
    pub employees: Vec<String>,

    /// Product entry, repeatable.
    #[arg(long = "product", value_name = "NAME=DETAILS")]
    pub products: Vec<String>,

    /// Service entry, repeatable.
    #[arg(long = "service", value_name = "NAME=DETAILS")]
    pub services: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Automatic,
    Manual,
}

impl From<ModeArg> for IngestionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Automatic => IngestionMode::Automatic,
            ModeArg::Manual => IngestionMode::Manual,
        }
    }
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > ORGBOT_CONFIG env var > ~/.orgbot/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("ORGBOT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the service base URL.
    ///
    /// Priority: --base-url flag > ORGBOT_BASE_URL env var > config file value.
    pub fn resolve_base_url(&self, config_base_url: &str) -> String {
        if let Some(ref url) = self.base_url {
            return url.clone();
        }
        if let Ok(url) = std::env::var("ORGBOT_BASE_URL") {
            if !url.trim().is_empty() {
                return url;
            }
        }
        config_base_url.to_string()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Split a `NAME=DETAILS` entry. A missing `=` leaves the details empty.
pub fn parse_pair(raw: &str) -> (&str, &str) {
    raw.split_once('=').unwrap_or((raw, ""))
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".orgbot").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".orgbot").join("config.toml");
    }
    PathBuf::from("config.toml")
}
