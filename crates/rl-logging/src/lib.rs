// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized logging utilities for the replay launcher
//!
//! Every binary in the workspace initializes `tracing` through this crate so
//! that console output, file output and the `--log-*` flags behave the same
//! way everywhere.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Re-export clap for convenience when using CliLoggingArgs
pub use clap;

// Re-export Level for convenience
pub use tracing::Level;

/// Name of the directory (and default file stem) used for log files
const LOG_DIR_NAME: &str = "replay-launcher";

/// Workspace crates whose events follow the requested level
const WORKSPACE_TARGETS: &[&str] = &["rl_cli", "rl_replay", "rl_lcu_client", "rl_client_launcher"];

/// Output format for log messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable plaintext format
    #[default]
    Plaintext,
    /// Structured JSON format
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Plaintext => write!(f, "plaintext"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plaintext" => Ok(LogFormat::Plaintext),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "Invalid log format: {}. Use 'plaintext' or 'json'",
                s
            )),
        }
    }
}

/// CLI log level enum for clap integration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliLogLevel {
    /// Only error conditions
    Error,
    /// Errors and warnings
    Warn,
    /// Errors, warnings, and informational messages
    #[default]
    Info,
    /// All above plus debug information
    Debug,
    /// All above plus detailed tracing
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliLogLevel::Error => write!(f, "error"),
            CliLogLevel::Warn => write!(f, "warn"),
            CliLogLevel::Info => write!(f, "info"),
            CliLogLevel::Debug => write!(f, "debug"),
            CliLogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Standardized CLI logging arguments for clap integration
///
/// Use with `#[command(flatten)]`. Output goes to the console unless
/// `--log-file` or `--log-dir` is given, in which case it goes to a file.
#[derive(Clone, Debug, Default, clap::Args, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliLoggingArgs {
    /// Log verbosity level
    #[arg(long, value_enum, help = "Log verbosity level (default: info)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<CliLogLevel>,

    /// Log output format
    #[arg(long, value_enum, help = "Log output format (default: plaintext)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,

    /// Directory for log files
    #[arg(long, help = "Directory for log files (default: platform specific)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Log filename
    #[arg(long, help = "Log filename")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl CliLoggingArgs {
    /// Initialize logging based on the parsed CLI arguments
    pub fn init(self, component: &str) -> anyhow::Result<()> {
        self.init_with_default_level(component, CliLogLevel::Info)
    }

    pub fn init_with_default_level(
        self,
        component: &str,
        default_level: CliLogLevel,
    ) -> anyhow::Result<()> {
        let level = self.log_level.unwrap_or(default_level).into();
        let format = self.log_format.unwrap_or_default();

        if self.logs_to_file() {
            let log_path = self.resolve_log_path(component);
            init_to_file(component, level, format, &log_path)
        } else {
            init(component, level, format)
        }
    }

    /// Whether the arguments select file output over the console
    pub fn logs_to_file(&self) -> bool {
        self.log_file.is_some() || self.log_dir.is_some()
    }

    /// Resolve the complete log file path based on CLI arguments
    ///
    /// 1. An absolute `log_file` is used as-is
    /// 2. A relative `log_file` is placed under `log_dir` when one is given
    /// 3. Without `log_file`, `<log_dir>/<component>.log` is used
    /// 4. Without either, the platform standard location is used
    pub fn resolve_log_path(&self, component: &str) -> PathBuf {
        match (&self.log_file, &self.log_dir) {
            (Some(file), _) if Path::new(file).is_absolute() => PathBuf::from(file),
            (Some(file), Some(dir)) => Path::new(dir).join(file),
            (Some(file), None) => {
                let file_path = Path::new(file);
                if file_path.parent().is_some_and(|p| !p.as_os_str().is_empty()) {
                    file_path.to_path_buf()
                } else {
                    get_standard_log_dir().join(file)
                }
            }
            (None, Some(dir)) => Path::new(dir).join(format!("{}.log", component)),
            (None, None) => get_standard_log_path_for_component(component),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.log_level.is_none()
            && self.log_format.is_none()
            && self.log_dir.is_none()
            && self.log_file.is_none()
    }
}

/// Get the standard log file path for a specific component
pub fn get_standard_log_path_for_component(component: &str) -> PathBuf {
    get_standard_log_dir().join(format!("{}.log", component))
}

/// Get the standard log directory for the current OS
///
/// - Windows: `%APPDATA%\replay-launcher`
/// - macOS: `~/Library/Logs/replay-launcher`
/// - Linux: `~/.local/share/replay-launcher`
/// - Other: `~/replay-launcher`
pub fn get_standard_log_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let mut path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("C:\\Users\\Default\\AppData\\Roaming"));
        path.push(LOG_DIR_NAME);
        path
    }

    #[cfg(target_os = "macos")]
    {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        path.push("Library");
        path.push("Logs");
        path.push(LOG_DIR_NAME);
        path
    }

    #[cfg(target_os = "linux")]
    {
        let mut path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp")));
        path.push(LOG_DIR_NAME);
        path
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        path.push(LOG_DIR_NAME);
        path
    }
}

/// Initialize console logging with the specified component name, default level, and format
///
/// `RUST_LOG` takes precedence over `default_level` when set.
pub fn init(component: &str, default_level: Level, format: LogFormat) -> anyhow::Result<()> {
    init_with_writer(component, default_level, format, io::stdout)
}

/// Initialize logging to a file, creating its parent directory when needed
pub fn init_to_file(
    component: &str,
    default_level: Level,
    format: LogFormat,
    log_path: &Path,
) -> anyhow::Result<()> {
    use std::fs;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let log_file = fs::OpenOptions::new().create(true).append(true).open(log_path)?;

    init_with_writer(component, default_level, format, log_file)
}

/// Initialize logging with a custom writer
pub fn init_with_writer<W>(
    component: &str,
    default_level: Level,
    format: LogFormat,
    writer: W,
) -> anyhow::Result<()>
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(component, default_level)));

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).json();
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Plaintext => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).with_target(false);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }

    Ok(())
}

/// Filter directive used when `RUST_LOG` is unset
///
/// Third-party crates (reqwest, hyper, rustls) stay at `warn` so request
/// plumbing does not drown out the replay progress lines.
fn default_filter(component: &str, default_level: Level) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.push(format!("{}={}", component.replace('-', "_"), default_level));
    for target in WORKSPACE_TARGETS {
        directives.push(format!("{}={}", target, default_level));
    }
    directives.join(",")
}

/// Redact sensitive information from log output
///
/// Used for the control API password before it reaches any log line.
pub fn redact(_value: impl std::fmt::Display) -> &'static str {
    "[REDACTED]"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let redacted = redact("sensitive-data");
        assert_eq!(format!("{}", redacted), "[REDACTED]");
        assert_eq!(format!("{:?}", redacted), "\"[REDACTED]\"");
    }

    #[test]
    fn test_cli_log_level_conversion() {
        assert_eq!(Level::from(CliLogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(CliLogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(CliLogLevel::Info), Level::INFO);
        assert_eq!(Level::from(CliLogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_cli_log_level_display_and_default() {
        assert_eq!(format!("{}", CliLogLevel::Warn), "warn");
        assert_eq!(format!("{}", CliLogLevel::Trace), "trace");
        assert_eq!(CliLogLevel::default(), CliLogLevel::Info);
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("plaintext".parse::<LogFormat>().unwrap(), LogFormat::Plaintext);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_console_is_default_destination() {
        let args = CliLoggingArgs::default();
        assert!(!args.logs_to_file());
        assert!(args.is_empty());

        let args = CliLoggingArgs {
            log_dir: Some("/var/log".to_string()),
            ..Default::default()
        };
        assert!(args.logs_to_file());
    }

    #[test]
    fn test_resolve_log_path() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();

        let args = CliLoggingArgs {
            log_dir: Some(dir_str.clone()),
            ..Default::default()
        };
        assert_eq!(
            args.resolve_log_path("launch-replay"),
            dir.path().join("launch-replay.log")
        );

        let args = CliLoggingArgs {
            log_dir: Some(dir_str),
            log_file: Some("custom.log".to_string()),
            ..Default::default()
        };
        assert_eq!(args.resolve_log_path("launch-replay"), dir.path().join("custom.log"));

        let absolute = dir.path().join("abs.log");
        let args = CliLoggingArgs {
            log_file: Some(absolute.to_string_lossy().to_string()),
            ..Default::default()
        };
        assert_eq!(args.resolve_log_path("launch-replay"), absolute);
    }

    #[test]
    fn test_standard_log_path_for_component() {
        let path = get_standard_log_path_for_component("launch-replay");
        let path_str = path.to_string_lossy();

        assert!(path_str.ends_with("launch-replay.log"));
        assert!(path_str.contains(LOG_DIR_NAME));
    }

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        let filter = default_filter("launch-replay", Level::DEBUG);
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("launch_replay=DEBUG"));
        assert!(filter.contains("rl_replay=DEBUG"));
    }
}
