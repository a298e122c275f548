//! Structured logging for the CLI, built on `tracing-subscriber`.
//!
//! Priority order for the filter (highest to lowest):
//! 1. `--log-level`
//! 2. the `ANDOR_LOG` environment variable
//! 3. `[logging] level` in `andor.toml`
//! 4. `warn`
//!
//! Output always goes to stderr so stdout stays clean for command results.

use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::manifest::LoggingConfig;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV: &str = "ANDOR_LOG";

/// Install the global subscriber.
pub fn init_logging(cli_level: Option<&str>, config: Option<&LoggingConfig>) -> Result<()> {
    let filter = build_env_filter(cli_level, config)?;
    let format = determine_format(config)?;
    let base = Registry::default().with(filter);

    // A subscriber may already be installed (tests); that is not an error.
    let _ = if format == LogFormat::Json {
        base.with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
    } else {
        base.with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
    };

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn build_env_filter(cli_level: Option<&str>, config: Option<&LoggingConfig>) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"));
    }

    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("warn");
    EnvFilter::try_new(level).with_context(|| format!("invalid [logging] level '{level}'"))
}

fn determine_format(config: Option<&LoggingConfig>) -> Result<LogFormat> {
    match config.map(|c| c.format.as_str()).unwrap_or("text") {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => bail!("invalid log format '{other}' (must be 'json' or 'text')"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_text() {
        assert_eq!(determine_format(None).unwrap(), LogFormat::Text);
        let config = LoggingConfig {
            level: "info".into(),
            format: "json".into(),
        };
        assert_eq!(determine_format(Some(&config)).unwrap(), LogFormat::Json);
    }

    #[test]
    fn unknown_format_rejected() {
        let config = LoggingConfig {
            level: "info".into(),
            format: "xml".into(),
        };
        let err = determine_format(Some(&config)).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn cli_level_wins() {
        let config = LoggingConfig {
            level: "not a level ===".into(),
            format: "text".into(),
        };
        // The bad manifest level is never consulted.
        assert!(build_env_filter(Some("debug"), Some(&config)).is_ok());
    }

    #[test]
    fn invalid_cli_level_is_an_error() {
        assert!(build_env_filter(Some("andor=loud"), None).is_err());
    }
}
