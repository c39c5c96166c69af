//! Command-line client for the [exchangeratesapi.io] currency rate API.
//!
//! One invocation maps to one HTTP GET: the positional command selects the
//! `latest` or `history` endpoint, the optional flags become query
//! parameters, and the JSON body is printed as human-readable text.
//!
//! [exchangeratesapi.io]: https://api.exchangeratesapi.io/

use clap::Parser;
use jiff::civil::Date;
use log::debug;
use thiserror::Error;

pub mod request;
pub mod response;

pub use request::{Command, Request, build};
pub use response::{HistoricalRates, LatestRates, RateResponse};

/// Query latest or historical currency exchange rates from exchangeratesapi.io.
///
/// `latest` returns the current snapshot of rates against the base currency.
/// `history` returns a series of daily rates and requires both --start and
/// --end. Note that `latest` ignores date flags rather than rejecting them.
#[derive(Parser)]
pub struct Cli {
    /// The endpoint to query: "latest" or "history"
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Base currency for the returned rates (3-letter code, default EUR)
    #[clap(short, long, value_name = "CODE")]
    pub base: Option<String>,
    /// Start date of a time series (format: YYYY-MM-DD)
    #[clap(short, long, value_name = "DATE")]
    pub start: Option<Date>,
    /// End date of a time series (format: YYYY-MM-DD)
    #[clap(short, long, value_name = "DATE")]
    pub end: Option<Date>,
    /// Comma-separated list of currencies to restrict the response to
    #[clap(short, long, value_name = "CODES")]
    pub currency: Option<String>,
}

/// Any failure a single invocation can end with. All of them are fatal: the
/// binary reports the error and exits non-zero.
#[derive(Debug, Error)]
pub enum Error {
    /// The positional command was neither `latest` nor `history`.
    #[error("invalid command {0:?}, expected \"latest\" or \"history\"")]
    InvalidCommand(String),

    /// Only one side of a date range was supplied.
    #[error("please provide the --{missing} flag when requesting a time series")]
    IncompleteDateRange {
        /// Name of the absent flag, for the user message.
        missing: &'static str,
    },

    /// A flag combination no endpoint accepts, such as `history` without a
    /// date range.
    #[error("unsupported request, please try again")]
    UnsupportedRequestShape,

    /// The HTTP exchange failed, including non-success status codes.
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Perform the single blocking GET and return the raw response body.
///
/// The body is read to completion before returning, so the connection is
/// always released whether or not decoding later succeeds.
pub fn fetch(url: &str) -> Result<Vec<u8>, Error> {
    debug!("GET {url}");
    let mut resp = ureq::get(url).call()?;
    Ok(resp.body_mut().read_to_vec()?)
}
