//! Process configuration, read once from the environment at startup

use std::env;
use std::path::PathBuf;

use crate::domain::schedule::BroadcastWindows;
use crate::shared::errors::ConfigError;

/// Everything the monitor needs for one run.
///
/// Built once in `main` and passed by reference; nothing reads the
/// environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub cmc_api_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,

    /// Relative-change threshold for a variation alert (0.05 = 5%)
    pub alert_threshold: f64,
    pub windows: BroadcastWindows,

    /// Also quote BRL alongside USD
    pub quote_brl: bool,

    pub history_file: PathBuf,
    pub chart_file: PathBuf,

    /// Log what would be sent instead of calling Telegram
    pub dry_run: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let hours = parse_hours(&optional("NOTIFY_HOURS").unwrap_or_else(|| "12,16,20".to_string()))?;

        Ok(Self {
            cmc_api_key: required("CMC_API_KEY")?,
            telegram_bot_token: required("TELEGRAM_BOT_TOKEN")?,
            telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
            alert_threshold: parse_or("ALERT_THRESHOLD", 0.05)?,
            windows: BroadcastWindows {
                hours,
                tolerance_minutes: parse_or("NOTIFY_WINDOW_MINUTES", 15)?,
                utc_offset_hours: parse_or("NOTIFY_UTC_OFFSET_HOURS", 0)?,
            },
            quote_brl: flag("QUOTE_BRL", true),
            history_file: optional("HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("btc_history.csv")),
            chart_file: optional("CHART_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("btc_chart.png")),
            dry_run: flag("DRY_RUN", false),
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(var))
}

fn optional(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn flag(var: &str, default: bool) -> bool {
    match env::var(var) {
        Ok(v) => matches!(v.trim(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value: raw }),
        None => Ok(default),
    }
}

/// Parse a comma-separated hour list like "12,16,20" into 0-23 values.
pub fn parse_hours(raw: &str) -> Result<Vec<u32>, ConfigError> {
    let mut hours = Vec::new();
    for part in raw.split(',') {
        let hour: u32 = part.trim().parse().map_err(|_| ConfigError::InvalidVar {
            var: "NOTIFY_HOURS",
            value: raw.to_string(),
        })?;
        if hour > 23 {
            return Err(ConfigError::InvalidVar {
                var: "NOTIFY_HOURS",
                value: raw.to_string(),
            });
        }
        hours.push(hour);
    }
    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("12,16,20").unwrap(), vec![12, 16, 20]);
        assert_eq!(parse_hours("0").unwrap(), vec![0]);
        assert_eq!(parse_hours(" 9, 16 ,23").unwrap(), vec![9, 16, 23]);
    }

    #[test]
    fn test_parse_hours_rejects_bad_input() {
        assert!(parse_hours("25").is_err());
        assert!(parse_hours("noon").is_err());
        assert!(parse_hours("12;16").is_err());
    }
}
