//! CLI argument definitions for the Potato server.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use potato_core::config::PotatoConfig;

/// Potatolete IA - a search-augmented chat assistant backend.
#[derive(Parser, Debug)]
#[command(name = "potato", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP server to.
    #[arg(long = "host")]
    pub host: Option<String>,

    /// HTTP server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Generation model id.
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > POTATO_CONFIG env var > ~/.potato/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("POTATO_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the HTTP port.
    ///
    /// Priority: --port flag > POTATO_PORT env var > config file value.
    /// An unparseable POTATO_PORT is skipped and handed back so the caller
    /// can report it.
    pub fn resolve_port(&self, env_port: Option<&str>, config_port: u16) -> PortResolution {
        if let Some(port) = self.port {
            return PortResolution { port, rejected_env: None };
        }
        match env_port.map(|v| (v, v.parse::<u16>())) {
            Some((_, Ok(port))) => PortResolution { port, rejected_env: None },
            Some((value, Err(_))) => PortResolution {
                port: config_port,
                rejected_env: Some(value.to_string()),
            },
            None => PortResolution { port: config_port, rejected_env: None },
        }
    }

    /// Fold command-line and environment overrides into a loaded
    /// configuration. Returns the rejected POTATO_PORT value, if any.
    pub fn apply_overrides(&self, config: &mut PotatoConfig) -> Option<String> {
        if let Some(ref host) = self.host {
            config.general.host = host.clone();
        }
        let env_port = std::env::var("POTATO_PORT").ok();
        let resolved = self.resolve_port(env_port.as_deref(), config.general.port);
        config.general.port = resolved.port;
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
        if let Some(ref model) = self.model {
            config.llm.model = model.clone();
        }
        resolved.rejected_env
    }
}

/// Outcome of port resolution.
#[derive(Debug, PartialEq, Eq)]
pub struct PortResolution {
    pub port: u16,
    /// POTATO_PORT value that was set but could not be parsed.
    pub rejected_env: Option<String>,
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".potato").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".potato").join("config.toml");
    }
    PathBuf::from("config.toml")
}
