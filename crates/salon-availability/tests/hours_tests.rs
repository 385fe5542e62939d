//! Tests for business configuration and operating-hours resolution.

use chrono::{NaiveDate, Weekday};
use chrono_tz::Tz;
use salon_availability::hours::{DayHours, OperatingHours, WeeklyHours, DEFAULT_BUFFER_MINUTES};
use salon_availability::ports::BusinessHoursProvider;
use salon_availability::{AvailabilityError, BusinessConfig, InMemoryStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn default_week_matches_standard_salon_hours() {
    let week = WeeklyHours::default();

    // 2026-03-16 is a Monday.
    assert_eq!(
        week.resolve(date(2026, 3, 16)),
        Some(DayHours {
            opens: 540,
            closes: 1080
        })
    );
    // Saturday closes early.
    assert_eq!(
        week.resolve(date(2026, 3, 21)),
        Some(DayHours {
            opens: 540,
            closes: 840
        })
    );
    // Sunday is closed.
    assert_eq!(week.resolve(date(2026, 3, 22)), None);
}

#[test]
fn closed_flag_wins_over_times() {
    let mut week = WeeklyHours::default();
    *week.for_weekday_mut(Weekday::Wed) = OperatingHours {
        opens: "10:00".parse().unwrap(),
        closes: "16:00".parse().unwrap(),
        closed: true,
    };

    assert_eq!(week.resolve(date(2026, 3, 18)), None);
    assert!(week.resolve(date(2026, 3, 19)).is_some());
}

#[test]
fn config_defaults_when_fields_omitted() {
    let config: BusinessConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.buffer_minutes(), DEFAULT_BUFFER_MINUTES);
    assert_eq!(config.timezone(), Tz::UTC);
    assert_eq!(config.hours(), &WeeklyHours::default());
}

#[test]
fn config_reads_partial_week() {
    let json = r#"{
        "buffer_minutes": 10,
        "timezone": "Europe/Madrid",
        "operating_hours": {
            "monday": { "opens": "10:00", "closes": "20:00" },
            "saturday": { "closed": true }
        }
    }"#;
    let config: BusinessConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.buffer_minutes(), 10);
    assert_eq!(config.timezone(), chrono_tz::Europe::Madrid);
    assert_eq!(
        config.hours().resolve(date(2026, 3, 16)),
        Some(DayHours {
            opens: 600,
            closes: 1200
        })
    );
    assert_eq!(config.hours().resolve(date(2026, 3, 21)), None);
    // Days not mentioned keep their defaults.
    assert_eq!(
        config.hours().resolve(date(2026, 3, 17)),
        Some(DayHours {
            opens: 540,
            closes: 1080
        })
    );
}

#[test]
fn buffer_above_limit_is_rejected() {
    let err = BusinessConfig::new(61, Tz::UTC, WeeklyHours::default()).unwrap_err();
    assert!(matches!(err, AvailabilityError::InvalidRecord(_)));

    assert!(BusinessConfig::new(60, Tz::UTC, WeeklyHours::default()).is_ok());
    assert!(BusinessConfig::new(0, Tz::UTC, WeeklyHours::default()).is_ok());
}

#[test]
fn unknown_timezone_is_rejected() {
    let err = serde_json::from_str::<BusinessConfig>(r#"{"timezone": "Mars/Olympus"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("Invalid timezone"), "{err}");
}

#[test]
fn malformed_opening_time_is_rejected() {
    let json = r#"{"operating_hours": {"monday": {"opens": "9am", "closes": "18:00"}}}"#;
    assert!(serde_json::from_str::<BusinessConfig>(json).is_err());
}

#[test]
fn provider_fails_without_configuration() {
    let store = InMemoryStore::new();
    assert_eq!(
        store.operating_hours(date(2026, 3, 16)),
        Err(AvailabilityError::ConfigurationMissing)
    );
}

#[test]
fn provider_resolves_through_configuration() {
    let store = InMemoryStore::new().with_business(BusinessConfig::default());
    assert_eq!(store.operating_hours(date(2026, 3, 22)), Ok(None));
    assert!(store.operating_hours(date(2026, 3, 16)).unwrap().is_some());
}

#[test]
fn omitted_times_default_per_field() {
    let json = r#"{
        "operating_hours": {
            "monday": { "opens": "10:00" },
            "tuesday": { "closes": "15:00" },
            "wednesday": { "closed": false }
        }
    }"#;
    let config: BusinessConfig = serde_json::from_str(json).unwrap();

    assert_eq!(
        config.hours().resolve(date(2026, 3, 16)),
        Some(DayHours {
            opens: 600,
            closes: 1080
        })
    );
    assert_eq!(
        config.hours().resolve(date(2026, 3, 17)),
        Some(DayHours {
            opens: 540,
            closes: 900
        })
    );
    assert_eq!(
        config.hours().resolve(date(2026, 3, 18)),
        Some(DayHours {
            opens: 540,
            closes: 1080
        })
    );
}

#[test]
fn open_day_closing_before_it_opens_is_rejected() {
    let json = r#"{"operating_hours": {"monday": {"opens": "18:00", "closes": "09:00"}}}"#;
    let err = serde_json::from_str::<BusinessConfig>(json).unwrap_err();
    assert!(err.to_string().contains("Invalid record"), "{err}");

    let mut week = WeeklyHours::default();
    week.thursday.closes = week.thursday.opens;
    assert!(matches!(
        BusinessConfig::new(15, Tz::UTC, week),
        Err(AvailabilityError::InvalidRecord(_))
    ));
}

#[test]
fn closed_day_times_are_not_validated() {
    let json = r#"{
        "operating_hours": {
            "sunday": { "opens": "18:00", "closes": "09:00", "closed": true }
        }
    }"#;
    let config: BusinessConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.hours().resolve(date(2026, 3, 22)), None);
}
