//! Command-line interface parsing for Crabby
//!
//! Handles the optional starting location and the log file override.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::logging::default_log_path;

/// Location searched on startup when none is given
pub const DEFAULT_LOCATION: &str = "Malmö";

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// The location argument was empty or only whitespace
    #[error("Location must not be empty")]
    EmptyLocation,
}

/// Crabby - terminal weather forecast
#[derive(Parser, Debug)]
#[command(name = "crabby")]
#[command(about = "Five-day weather forecast in the terminal")]
#[command(version)]
pub struct Cli {
    /// Place to show the forecast for
    ///
    /// Examples:
    ///   crabby              # Forecast for Malmö
    ///   crabby Lund         # Forecast for Lund
    ///   crabby "New York"   # Names with spaces need quotes
    #[arg(value_name = "LOCATION")]
    pub location: Option<String>,

    /// Write logs to this file instead of the cache directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Location searched first
    pub location: String,
    /// Log file destination
    pub log_file: PathBuf,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            log_file: default_log_path(),
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the trimmed location and resolved log path
    /// * `Err(CliError::EmptyLocation)` if a blank location was given
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let location = match cli.location.as_deref() {
            None => DEFAULT_LOCATION.to_string(),
            Some(raw) if raw.trim().is_empty() => return Err(CliError::EmptyLocation),
            Some(raw) => raw.trim().to_string(),
        };

        Ok(StartupConfig {
            location,
            log_file: cli.log_file.clone().unwrap_or_else(default_log_path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["crabby"]);
        assert!(cli.location.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_cli_parse_location() {
        let cli = Cli::parse_from(["crabby", "Lund"]);
        assert_eq!(cli.location.as_deref(), Some("Lund"));
    }

    #[test]
    fn test_cli_parse_log_file() {
        let cli = Cli::parse_from(["crabby", "--log-file", "/tmp/crabby-test.log"]);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/crabby-test.log")));
    }

    #[test]
    fn test_startup_config_default_location() {
        let cli = Cli::parse_from(["crabby"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.location, "Malmö");
        assert_eq!(config.log_file, default_log_path());
    }

    #[test]
    fn test_startup_config_trims_location() {
        let cli = Cli::parse_from(["crabby", "  Lund  "]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.location, "Lund");
    }

    #[test]
    fn test_startup_config_keeps_log_override() {
        let cli = Cli::parse_from(["crabby", "--log-file", "out.log"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.log_file, PathBuf::from("out.log"));
    }

    #[test]
    fn test_startup_config_rejects_blank_location() {
        let cli = Cli::parse_from(["crabby", "   "]);
        let result = StartupConfig::from_cli(&cli);
        assert_eq!(result, Err(CliError::EmptyLocation));
    }

    #[test]
    fn test_startup_config_default_matches_no_args() {
        let cli = Cli::parse_from(["crabby"]);
        assert_eq!(StartupConfig::from_cli(&cli).unwrap(), StartupConfig::default());
    }
}
