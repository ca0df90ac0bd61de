//! Process-wide logging via log4rs. Library code only uses the `log` facade.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

use crate::errors::FilterError;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

/// Initializes logging from a log4rs YAML file.
///
/// # Errors
/// Returns an error if the file cannot be read or a logger is already installed.
pub fn init_path(path: &Path) -> Result<(), FilterError> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())
        .map_err(|e| FilterError::Config(format!("log config {}: {e}", path.display())))
}

/// error|warn|info|debug|trace|off; anything else is `Info`.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn build_config(
    dir: Option<&Path>,
    level: LevelFilter,
    retention: u32,
) -> Result<Config, FilterError> {
    let appender: Box<dyn log4rs::append::Append> = match dir {
        Some(base) => {
            std::fs::create_dir_all(base).map_err(|e| FilterError::Io(e.to_string()))?;
            let roller = FixedWindowRoller::builder()
                .build(&format!("{}", base.join("aqlfilter.{}.log").display()), retention)
                .map_err(|e| FilterError::Config(e.to_string()))?;
            let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
            Box::new(
                RollingFileAppender::builder()
                    .encoder(Box::new(PatternEncoder::new(PATTERN)))
                    .build(base.join("aqlfilter.log"), Box::new(policy))
                    .map_err(|e| FilterError::Io(e.to_string()))?,
            )
        }
        None => Box::new(
            ConsoleAppender::builder()
                .target(Target::Stderr)
                .encoder(Box::new(PatternEncoder::new(PATTERN)))
                .build(),
        ),
    };
    Config::builder()
        .appender(Appender::builder().build("main", appender))
        .build(Root::builder().appender("main").build(level))
        .map_err(|e| FilterError::Config(e.to_string()))
}

/// Configure logging for the process.
/// - dir: rolling `aqlfilter.log` in this directory; stderr when `None`
/// - level: see [`parse_level`], default info
/// - retention: rolled files to keep (default 7)
///
/// A second call after a logger is installed is a no-op.
///
/// # Errors
/// Returns an error if the log directory or appender cannot be created.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<u32>,
) -> Result<(), FilterError> {
    let config = build_config(dir, parse_level(level.unwrap_or("info")), retention.unwrap_or(7))?;
    let _ = log4rs::init_config(config);
    Ok(())
}

/// Configure logging from environment variables if present:
/// - AQLFILTER_LOG_DIR
/// - AQLFILTER_LOG_LEVEL
/// - AQLFILTER_LOG_RETENTION
///
/// # Errors
/// See [`configure_logging`].
pub fn configure_from_env() -> Result<(), FilterError> {
    let dir = std::env::var("AQLFILTER_LOG_DIR").ok().map(std::path::PathBuf::from);
    let level = std::env::var("AQLFILTER_LOG_LEVEL").ok();
    let retention =
        std::env::var("AQLFILTER_LOG_RETENTION").ok().and_then(|s| s.parse::<u32>().ok());
    configure_logging(dir.as_deref(), level.as_deref(), retention)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("trace"), LevelFilter::Trace);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn file_config_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        assert!(build_config(Some(&logs), LevelFilter::Debug, 3).is_ok());
        assert!(logs.is_dir());
    }
}
