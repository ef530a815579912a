use chrono::Utc;

use almanac_syntax::{SpecialDate, SpecialDateKind};

use crate::context::Context;
use crate::error::Error;
use crate::special_dates::{upcoming_within, SpecialDateTracker};
use crate::store::{keys, KeyValueStore, MemoryStore};
use crate::{date, datetime};

use super::FailingStore;

fn birthday(name: &str, month: u8, day: u8) -> SpecialDate {
    SpecialDate::new(name, month, day, SpecialDateKind::Birthday).unwrap()
}

fn summary(dates: &[SpecialDate], today: &str, window: i64) -> Vec<(String, i64)> {
    upcoming_within(dates, date!(today), window)
        .into_iter()
        .map(|item| (item.name, item.days_until))
        .collect()
}

#[test]
fn window_is_inclusive() {
    let dates = [
        birthday("Today", 12, 29),
        birthday("In a week", 1, 5),
        birthday("Too late", 1, 6),
        birthday("Yesterday", 12, 28),
    ];

    assert_eq!(
        summary(&dates, "2024-12-29", 7),
        [("Today".to_string(), 0), ("In a week".to_string(), 7)],
    );

    assert_eq!(summary(&dates, "2024-12-29", 0), [("Today".to_string(), 0)]);
    assert!(summary(&dates, "2024-12-29", -1).is_empty());
}

#[test]
fn passed_dates_wait_for_next_year() {
    let dates = [birthday("Yesterday", 12, 28)];
    assert_eq!(summary(&dates, "2024-12-29", 364), [("Yesterday".to_string(), 364)]);
    assert!(summary(&dates, "2024-12-29", 363).is_empty());

    let upcoming = upcoming_within(&dates, date!("2024-12-29"), 365);
    assert_eq!(upcoming[0].date, date!("2025-12-28"));
}

#[test]
fn leap_day() {
    let dates = [birthday("Leap", 2, 29)];
    assert_eq!(summary(&dates, "2024-02-29", 7), [("Leap".to_string(), 0)]);
    assert_eq!(summary(&dates, "2025-02-27", 7), [("Leap".to_string(), 1)]);
    assert_eq!(summary(&dates, "2025-02-28", 7), [("Leap".to_string(), 0)]);

    // Celebrated on the 28th of next year
    let upcoming = upcoming_within(&dates, date!("2024-03-01"), 365);
    assert_eq!(upcoming[0].date, date!("2025-02-28"));
    assert_eq!(upcoming[0].days_until, 364);
}

#[test]
fn ordering() {
    let dates = [
        birthday("C", 1, 3),
        SpecialDate::new("A", 1, 1, SpecialDateKind::Anniversary).unwrap(),
        birthday("B", 1, 3),
        birthday("D", 1, 1),
    ];

    let upcoming = upcoming_within(&dates, date!("2024-12-31"), 7);

    let names: Vec<_> = upcoming.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["A", "D", "C", "B"]);
    assert_eq!(upcoming[0].kind, SpecialDateKind::Anniversary);
    assert!(upcoming.windows(2).all(|w| w[0].days_until <= w[1].days_until));
}

#[test]
fn tracker() -> Result<(), Error> {
    let ctx = Context::default();
    let mut tracker = SpecialDateTracker::load(MemoryStore::new());
    tracker.add(birthday("Alex", 12, 30))?;
    tracker.add(SpecialDate::new("Wedding", 1, 2, SpecialDateKind::Anniversary)?)?;
    tracker.add(birthday("Alex", 12, 30))?;

    let invalid = SpecialDate {
        name: " ".to_string(),
        month: 1,
        day: 1,
        kind: SpecialDateKind::Birthday,
    };

    assert!(tracker.add(invalid).is_err());
    assert_eq!(tracker.dates().len(), 3);

    // Already on the 29th in Shanghai
    let now = datetime!("2024-12-28 17:00", Utc);
    let upcoming = tracker.upcoming(&now, &ctx, 7);
    assert_eq!(upcoming.len(), 3);
    assert_eq!(upcoming[0].days_until, 1);
    assert_eq!(upcoming[2].name, "Wedding");
    assert_eq!(upcoming[2].days_until, 4);

    let removed = tracker.remove(2)?;
    assert_eq!(removed.name, "Alex");

    assert!(matches!(
        tracker.remove(2),
        Err(Error::NoSuchIndex { index: 2, len: 2 }),
    ));

    let store = tracker.into_store();
    let raw = store.get(keys::SPECIAL_DATES).unwrap().unwrap();
    assert!(raw.contains(r#""type":"birthday""#));
    assert!(raw.contains(r#""type":"anniversary""#));

    let tracker = SpecialDateTracker::load(store);
    assert_eq!(tracker.dates()[0], birthday("Alex", 12, 30));
    assert_eq!(tracker.dates()[1].name, "Wedding");
    Ok(())
}

#[test]
fn malformed_records() {
    let mut store = MemoryStore::new();

    store
        .set(
            keys::SPECIAL_DATES,
            r#"[
                {"name": "Alex", "month": 3, "day": 1, "type": "birthday"},
                {"name": "Sam", "month": 3, "day": 1, "type": "holiday"},
                {"name": "Sam", "month": 2, "day": 30, "type": "birthday"},
                {"name": "", "month": 3, "day": 1, "type": "birthday"}
            ]"#
            .to_string(),
        )
        .unwrap();

    let tracker = SpecialDateTracker::load(store);
    assert_eq!(tracker.dates(), [birthday("Alex", 3, 1)]);
}

#[test]
fn store_failures_are_ignored() -> Result<(), Error> {
    let mut tracker = SpecialDateTracker::load(FailingStore);
    assert!(tracker.dates().is_empty());

    tracker.add(birthday("Alex", 12, 30))?;
    assert_eq!(tracker.dates().len(), 1);
    Ok(())
}
