use chrono::{Duration, Utc};
use toptify::types::TrackArtist;
use toptify::utils::*;

fn artist(name: &str) -> TrackArtist {
    TrackArtist {
        id: format!("{}_id", name),
        name: name.to_string(),
    }
}

#[test]
fn test_generate_state_nonce() {
    let nonce = generate_state_nonce();

    // Should be exactly 32 characters
    assert_eq!(nonce.len(), 32);

    // Should contain only alphanumeric characters
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated nonces should be different
    let nonce2 = generate_state_nonce();
    assert_ne!(nonce, nonce2);
}

#[test]
fn test_compute_expiry() {
    let before = Utc::now();
    let expiry = compute_expiry(3600);

    // Should land exactly one hour ahead, within the test's own runtime
    assert!(expiry >= before + Duration::seconds(3600));
    assert!(expiry <= Utc::now() + Duration::seconds(3600));

    // A zero lifetime expires immediately
    assert!(compute_expiry(0) <= Utc::now());
}

#[test]
fn test_time_range_display() {
    assert_eq!(TimeRange::ShortTerm.to_string(), "short_term");
    assert_eq!(TimeRange::MediumTerm.to_string(), "medium_term");
    assert_eq!(TimeRange::LongTerm.to_string(), "long_term");
}

#[test]
fn test_time_range_label() {
    assert_eq!(TimeRange::ShortTerm.label(), "last 4 weeks");
    assert_eq!(TimeRange::MediumTerm.label(), "last 6 months");
    assert_eq!(TimeRange::LongTerm.label(), "all time");
}

#[test]
fn test_time_range_default() {
    assert_eq!(TimeRange::default(), TimeRange::MediumTerm);
}

#[test]
fn test_time_range_all_constant() {
    assert_eq!(TimeRange::ALL.len(), 3);
    assert!(TimeRange::ALL.contains(&TimeRange::ShortTerm));
    assert!(TimeRange::ALL.contains(&TimeRange::MediumTerm));
    assert!(TimeRange::ALL.contains(&TimeRange::LongTerm));
}

#[test]
fn test_parse_time_range_valid_inputs() {
    // Wire values
    assert_eq!(parse_time_range("short_term").unwrap(), TimeRange::ShortTerm);
    assert_eq!(
        parse_time_range("medium_term").unwrap(),
        TimeRange::MediumTerm
    );
    assert_eq!(parse_time_range("long_term").unwrap(), TimeRange::LongTerm);

    // Shorthand
    assert_eq!(parse_time_range("short").unwrap(), TimeRange::ShortTerm);
    assert_eq!(parse_time_range("long").unwrap(), TimeRange::LongTerm);

    // Case insensitivity and hyphens
    assert_eq!(parse_time_range("Short-Term").unwrap(), TimeRange::ShortTerm);
    assert_eq!(parse_time_range("MEDIUM").unwrap(), TimeRange::MediumTerm);

    // Surrounding whitespace
    assert_eq!(
        parse_time_range("  long_term  ").unwrap(),
        TimeRange::LongTerm
    );
}

#[test]
fn test_parse_time_range_invalid_inputs() {
    // Empty and whitespace-only input
    let result = parse_time_range("");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    let result = parse_time_range("   ");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    // Unknown value
    let result = parse_time_range("yearly");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("invalid value 'yearly'"));
}

#[test]
fn test_format_track_length() {
    assert_eq!(format_track_length(0), "0:00");
    assert_eq!(format_track_length(999), "0:00");
    assert_eq!(format_track_length(61_000), "1:01");
    assert_eq!(format_track_length(225_400), "3:45");

    // Durations past an hour stay in minutes
    assert_eq!(format_track_length(3_600_000), "60:00");
}

#[test]
fn test_join_artist_names() {
    assert_eq!(join_artist_names(&[]), "");
    assert_eq!(join_artist_names(&[artist("Solo")]), "Solo");
    assert_eq!(
        join_artist_names(&[artist("First"), artist("Second")]),
        "First, Second"
    );
}
