//! Tracing setup.
//!
//! The subscriber is only installed when `BAUPLAN_LOG` or `RUST_LOG` is set.
//! `BAUPLAN_LOG` takes precedence and uses the same filter syntax
//! (`debug`, `bauplan_model=trace`). `BAUPLAN_LOG_FORMAT=json` switches to
//! one JSON object per event. Output always goes to stderr so it never mixes
//! with a `--dry-run` model on stdout.

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

const LOG_VAR: &str = "BAUPLAN_LOG";
const FORMAT_VAR: &str = "BAUPLAN_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

pub fn init_tracing() {
    let filter = match std::env::var(LOG_VAR) {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };
    let format = LogFormat::parse(&std::env::var(FORMAT_VAR).unwrap_or_default());

    match format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }
}
