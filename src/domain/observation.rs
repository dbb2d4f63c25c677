//! A single timestamped price reading

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::errors::HistoryError;

/// Header of the history CSV. The BRL column may be empty on rows written
/// while BRL quoting was disabled.
pub const CSV_HEADER: &str = "datetime_utc,price_usd,price_brl";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One price reading; append-only once stored, never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub price_usd: f64,
    pub price_brl: Option<f64>,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, price_usd: f64, price_brl: Option<f64>) -> Self {
        Self {
            timestamp,
            price_usd,
            price_brl,
        }
    }

    pub fn now(price_usd: f64, price_brl: Option<f64>) -> Self {
        Self::new(Utc::now(), price_usd, price_brl)
    }

    /// Encode as one CSV data row (no trailing newline)
    pub fn to_csv_row(&self) -> String {
        match self.price_brl {
            Some(brl) => format!(
                "{},{},{}",
                self.timestamp.format(TIMESTAMP_FORMAT),
                self.price_usd,
                brl
            ),
            None => format!("{},{},", self.timestamp.format(TIMESTAMP_FORMAT), self.price_usd),
        }
    }

    /// Parse one CSV data row. `line` is the 1-based file line for error reporting.
    pub fn from_csv_row(row: &str, line: usize) -> Result<Self, HistoryError> {
        let mut fields = row.split(',');

        let raw_ts = fields.next().unwrap_or("").trim();
        let timestamp = DateTime::parse_from_rfc3339(raw_ts)
            .map_err(|e| HistoryError::Malformed {
                line,
                reason: format!("bad timestamp '{}': {}", raw_ts, e),
            })?
            .with_timezone(&Utc);

        let raw_usd = fields.next().unwrap_or("").trim();
        let price_usd: f64 = raw_usd.parse().map_err(|_| HistoryError::Malformed {
            line,
            reason: format!("bad USD price '{}'", raw_usd),
        })?;

        let price_brl = match fields.next().map(str::trim) {
            None | Some("") => None,
            Some(raw_brl) => Some(raw_brl.parse().map_err(|_| HistoryError::Malformed {
                line,
                reason: format!("bad BRL price '{}'", raw_brl),
            })?),
        };

        Ok(Self {
            timestamp,
            price_usd,
            price_brl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Observation {
        Observation::new(
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
            65432.1,
            Some(330123.45),
        )
    }

    #[test]
    fn test_csv_row_round_trip() {
        let obs = sample();
        let row = obs.to_csv_row();
        let parsed = Observation::from_csv_row(&row, 2).unwrap();
        assert_eq!(parsed, obs);
    }

    #[test]
    fn test_csv_row_without_brl() {
        let obs = Observation::new(sample().timestamp, 65432.1, None);
        let row = obs.to_csv_row();
        assert_eq!(row, "2024-03-15T12:00:00Z,65432.1,");
        let parsed = Observation::from_csv_row(&row, 2).unwrap();
        assert_eq!(parsed.price_brl, None);
    }

    #[test]
    fn test_two_column_row_still_parses() {
        // Rows written before the BRL column existed
        let parsed = Observation::from_csv_row("2024-03-15T12:00:00Z,65432.1", 2).unwrap();
        assert_eq!(parsed.price_usd, 65432.1);
        assert_eq!(parsed.price_brl, None);
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let err = Observation::from_csv_row("not-a-date,65432.1,", 7).unwrap_err();
        match err {
            HistoryError::Malformed { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected error: {}", other),
        }
    }
}
