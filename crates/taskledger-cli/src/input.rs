//! Console input handling: errors, sanitizing and date parsing.

use std::io;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use taskledger_core::domain::TaskError;
use thiserror::Error;

/// Anything that can go wrong while handling one console line.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0:?} is not a valid task id")]
    InvalidId(String),

    #[error("unable to parse date {0:?}")]
    Date(String),

    #[error("{0:?} is not a yes/no value")]
    Flag(String),

    #[error("unknown option {0:?}")]
    UnknownFlag(String),

    #[error("unknown command {0:?} (type 'help' for a list)")]
    UnknownCommand(String),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("failed to encode tasks: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Trim and collapse runs of whitespace into single spaces.
pub fn sanitize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%B %d, %Y", "%b %d, %Y"];

static EMBEDDED_ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").expect("static pattern"));

/// Turn a human-written date into a due timestamp.
///
/// Month/day/year is tried before day/month/year, so `03/04/2024` is
/// March 4th while `25/12/2023` still parses. Date-only inputs are due at
/// midnight. As a last resort the first `YYYY-M-D` found anywhere in the
/// input is used.
pub fn parse_due_date(raw: &str) -> Result<NaiveDateTime, InputError> {
    let text = raw.trim();

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }

    EMBEDDED_ISO_DATE
        .captures(text)
        .and_then(|caps| {
            let year = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            let day = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .ok_or_else(|| InputError::Date(raw.to_string()))
}

/// `true`/`1`/`yes`/`y` and `false`/`0`/`no`/`n`, in any case.
pub fn parse_flag_value(raw: &str) -> Result<bool, InputError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(InputError::Flag(raw.to_string())),
    }
}
