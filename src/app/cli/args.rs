//! Command-line arguments for the proqueue demo binary

use crate::queue::FailurePolicy;
use clap::Parser;
use std::path::PathBuf;

/// Push a range of values through a processing queue and print each one
#[derive(Parser, Debug, Clone)]
#[command(name = "proqueue")]
#[command(about = "Push values through an asynchronous processing queue")]
#[command(version)]
pub struct Args {
    /// Number of values to push (0..COUNT)
    #[arg(short = 'n', long = "count", value_name = "COUNT", default_value_t = 5)]
    pub count: u64,

    /// Producer threads sharing the pushes
    #[arg(
        short = 'p',
        long = "producers",
        value_name = "THREADS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub producers: u16,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Queue name (overrides config file)
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Behaviour when a callback panics (overrides config file)
    #[arg(long = "failure-policy", value_name = "POLICY", value_parser = ["halt", "continue"])]
    pub failure_policy: Option<String>,

    /// Force colored log output
    #[arg(short = 'g', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,
}

impl Args {
    /// Failure policy given on the command line, if any
    pub fn failure_policy(&self) -> Option<FailurePolicy> {
        match self.failure_policy.as_deref() {
            Some("continue") => Some(FailurePolicy::Continue),
            Some("halt") => Some(FailurePolicy::Halt),
            _ => None,
        }
    }

    /// Color choice: explicit flags win, otherwise the config value
    pub fn use_color(&self, configured: Option<bool>) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            configured.unwrap_or(false)
        }
    }
}
