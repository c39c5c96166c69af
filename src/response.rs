//! Response shapes for the two endpoints, and their text rendering.

use std::collections::BTreeMap;
use std::fmt;

use jiff::civil::Date;
use serde::Deserialize;

use crate::{Command, Error};

/// The `latest` endpoint's snapshot: one set of rates for a single date.
#[derive(Debug, Deserialize)]
pub struct LatestRates {
    pub base: String,
    pub date: Date,
    pub rates: BTreeMap<String, f64>,
}

/// The `history` endpoint's time series: a set of rates per date.
///
/// The per-date rate set is an open mapping, so only the currencies actually
/// present in the payload are kept. The set the API returns varies by date.
#[derive(Debug, Deserialize)]
pub struct HistoricalRates {
    pub base: String,
    pub rates: BTreeMap<Date, BTreeMap<String, f64>>,
}

/// A decoded API response. Exactly one variant is produced per invocation,
/// selected by the command that built the request.
#[derive(Debug)]
pub enum RateResponse {
    Latest(LatestRates),
    History(HistoricalRates),
}

impl RateResponse {
    /// Decode the raw response body into the shape `command` expects.
    ///
    /// Unknown JSON fields are ignored; a structurally invalid payload fails
    /// with [`Error::Deserialization`].
    pub fn parse(command: Command, raw: &[u8]) -> Result<Self, Error> {
        Ok(match command {
            Command::Latest => RateResponse::Latest(serde_json::from_slice(raw)?),
            Command::History => RateResponse::History(serde_json::from_slice(raw)?),
        })
    }
}

impl fmt::Display for RateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateResponse::Latest(latest) => latest.fmt(f),
            RateResponse::History(history) => history.fmt(f),
        }
    }
}

impl fmt::Display for LatestRates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Base currency: {}", self.base)?;
        writeln!(f, "Date: {}", self.date)?;
        writeln!(f)?;
        for (code, rate) in &self.rates {
            writeln!(f, "{code} = {rate}")?;
        }
        Ok(())
    }
}

impl fmt::Display for HistoricalRates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Base currency: {}", self.base)?;
        for (date, rates) in &self.rates {
            writeln!(f)?;
            writeln!(f, "Date: {date}")?;
            for (code, rate) in rates {
                writeln!(f, "{code} = {rate}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    const LATEST_BODY: &str = r#"{
        "rates": {"GBP": 0.9049, "USD": 1.0982, "JPY": 116.23},
        "base": "EUR",
        "date": "2019-08-30"
    }"#;

    const HISTORY_BODY: &str = r#"{
        "rates": {
            "2019-01-02": {"GBP": 0.8987, "USD": 1.1321},
            "2019-01-03": {"GBP": 0.9012}
        },
        "start_at": "2019-01-01",
        "base": "EUR",
        "end_at": "2019-01-04"
    }"#;

    #[test]
    fn parses_latest_snapshot() {
        let RateResponse::Latest(latest) =
            RateResponse::parse(Command::Latest, LATEST_BODY.as_bytes()).unwrap()
        else {
            panic!("expected a latest snapshot")
        };
        assert_eq!(latest.base, "EUR");
        assert_eq!(latest.date, date(2019, 8, 30));
        assert_eq!(latest.rates.len(), 3);
        assert_eq!(latest.rates["GBP"], 0.9049);
    }

    /// Every rate in the payload must surface exactly once in the rendering,
    /// unchanged apart from numeric formatting.
    #[test]
    fn latest_rendering_surfaces_every_rate_once() {
        let response = RateResponse::parse(Command::Latest, LATEST_BODY.as_bytes()).unwrap();
        let text = response.to_string();

        assert!(text.contains("Base currency: EUR"));
        assert!(text.contains("Date: 2019-08-30"));
        for line in ["GBP = 0.9049", "USD = 1.0982", "JPY = 116.23"] {
            assert_eq!(text.matches(line).count(), 1, "missing or repeated: {line}");
        }
    }

    #[test]
    fn parses_history_series() {
        let RateResponse::History(history) =
            RateResponse::parse(Command::History, HISTORY_BODY.as_bytes()).unwrap()
        else {
            panic!("expected a historical series")
        };
        assert_eq!(history.base, "EUR");
        assert_eq!(history.rates.len(), 2);
        assert_eq!(history.rates[&date(2019, 1, 2)]["USD"], 1.1321);
        // Currencies absent on a date are simply not present.
        assert!(!history.rates[&date(2019, 1, 3)].contains_key("USD"));
    }

    #[test]
    fn history_rendering_groups_rates_by_date() {
        let response = RateResponse::parse(Command::History, HISTORY_BODY.as_bytes()).unwrap();
        let text = response.to_string();

        assert!(text.starts_with("Base currency: EUR\n"));
        let jan_2 = text.find("Date: 2019-01-02").unwrap();
        let jan_3 = text.find("Date: 2019-01-03").unwrap();
        assert!(jan_2 < jan_3);
        assert!(text[jan_2..jan_3].contains("USD = 1.1321"));
        assert!(text[jan_3..].contains("GBP = 0.9012"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        // `start_at`/`end_at` in HISTORY_BODY are not modeled; also check an
        // unexpected field on the latest shape.
        let body = r#"{"base": "EUR", "date": "2019-08-30", "rates": {}, "success": true}"#;
        assert!(RateResponse::parse(Command::Latest, body.as_bytes()).is_ok());
        assert!(RateResponse::parse(Command::History, HISTORY_BODY.as_bytes()).is_ok());
    }

    #[test]
    fn malformed_payload_is_a_deserialization_error() {
        let truncated = &LATEST_BODY.as_bytes()[..40];
        assert!(matches!(
            RateResponse::parse(Command::Latest, truncated),
            Err(Error::Deserialization(_))
        ));
        assert!(matches!(
            RateResponse::parse(Command::History, b"[1, 2, 3]"),
            Err(Error::Deserialization(_))
        ));
    }
}
