use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of leading forecast entries searched for today's extremes.
/// Providers start the list either at today or at yesterday.
pub const FORECAST_SCAN_DEPTH: usize = 3;

/// One day of a weather forecast, as published by the weather entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Plain date (`2024-05-01`) or date-time (`2024-05-01T00:00:00Z`)
    #[serde(default)]
    pub datetime: Option<String>,
    /// Forecast low (°C)
    #[serde(default)]
    pub templow: Option<f64>,
    /// Forecast high (°C)
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl ForecastEntry {
    pub fn new(datetime: impl Into<String>, low: f64, high: f64) -> Self {
        Self {
            datetime: Some(datetime.into()),
            templow: Some(low),
            temperature: Some(high),
        }
    }

    /// Calendar date of this entry, or `None` if the date string is missing or malformed.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_forecast_date(self.datetime.as_deref()?)
    }
}

/// Parse a forecast date from either a plain date or a combined date-time.
///
/// Date-times keep the calendar date of their own offset.
pub fn parse_forecast_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.contains('T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }
        return s
            .parse::<NaiveDateTime>()
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
            .map(|dt| dt.date())
            .ok();
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Find today's (low, high) in a forecast list.
///
/// Only the first [`FORECAST_SCAN_DEPTH`] entries are inspected. Entries with
/// malformed dates are skipped. The first entry dated today ends the search,
/// so a today-entry missing either temperature yields `None`.
pub fn todays_extremes(entries: &[ForecastEntry], today: NaiveDate) -> Option<(f64, f64)> {
    for entry in entries.iter().take(FORECAST_SCAN_DEPTH) {
        let Some(date) = entry.date() else {
            tracing::debug!(datetime = ?entry.datetime, "Skipping forecast entry without a usable date");
            continue;
        };

        if date == today {
            return match (entry.templow, entry.temperature) {
                (Some(low), Some(high)) => {
                    tracing::debug!(low, high, "Found forecast temps for today");
                    Some((low, high))
                }
                _ => None,
            };
        }
    }

    None
}
