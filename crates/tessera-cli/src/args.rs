//! Command-line argument definitions for the Tessera CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, validation-only mode, and logging verbosity.

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Command-line arguments for the Tessera layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input template layout file (JSON instance array)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the normalized output file
    #[arg(short, long, default_value = "normalized.json")]
    pub output: String,

    /// Validate only; do not write the normalized output
    #[arg(long)]
    pub check: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Logging verbosity
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Logging verbosity accepted on the command line.
///
/// Parsed by clap itself, so an unknown level is a usage error rather
/// than something to fall back from at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_maps_onto_level_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }

    #[test]
    fn test_unknown_log_level_is_a_usage_error() {
        let result = Args::try_parse_from(["tessera", "layout.json", "--log-level", "loud"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tessera", "layout.json"]).unwrap();
        assert_eq!(args.output, "normalized.json");
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(!args.check);
    }
}
