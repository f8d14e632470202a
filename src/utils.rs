use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distr::Alphanumeric};

use crate::types::TrackArtist;

/// Time window the top-item rankings are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    ShortTerm,
    #[default]
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [
        TimeRange::ShortTerm,
        TimeRange::MediumTerm,
        TimeRange::LongTerm,
    ];

    /// Human-readable window description for table headings.
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "last 4 weeks",
            TimeRange::MediumTerm => "last 6 months",
            TimeRange::LongTerm => "all time",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        };
        write!(f, "{}", s)
    }
}

/// Parses a time range argument. Accepts the wire values as well as the
/// shorthand `short`/`medium`/`long`, case-insensitive, with `-` or `_`.
pub fn parse_time_range(s: &str) -> Result<TimeRange, String> {
    let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
    match normalized.as_str() {
        "" => Err("time range cannot be empty".to_string()),
        "short_term" | "short" => Ok(TimeRange::ShortTerm),
        "medium_term" | "medium" => Ok(TimeRange::MediumTerm),
        "long_term" | "long" => Ok(TimeRange::LongTerm),
        other => Err(format!(
            "invalid value '{}' (expected short_term, medium_term or long_term)",
            other
        )),
    }
}

/// Random nonce for the OAuth `state` parameter, echoed back by the
/// identity provider and verified by the callback handler.
pub fn generate_state_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Absolute expiry time for a grant valid for `expires_in` seconds from now.
/// No clock-skew adjustment is applied.
pub fn compute_expiry(expires_in: i64) -> DateTime<Utc> {
    Utc::now() + Duration::seconds(expires_in)
}

/// Formats a track duration as minutes and seconds, e.g. `3:45`.
pub fn format_track_length(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn join_artist_names(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.clone())
        .collect::<Vec<_>>()
        .join(", ")
}
