use chrono::Utc;

use almanac_syntax::rules::{Category, DateRule, RuleRecord};

use crate::catalog::{CustomRule, HolidayCatalog, RuleFields};
use crate::context::Context;
use crate::error::Error;
use crate::resolve::resolve;
use crate::search::{matches_on, next_occurrence};
use crate::store::{keys, KeyValueStore, MemoryStore};
use crate::{date, datetime};

use super::FailingStore;

fn names<'a>(rules: impl IntoIterator<Item = &'a almanac_syntax::Rule>) -> Vec<&'a str> {
    rules.into_iter().map(|rule| rule.name.as_str()).collect()
}

#[test]
fn merged_order() {
    let catalog = HolidayCatalog::new();
    let merged = catalog.merged_rules_for_display();

    let first_us = merged
        .iter()
        .position(|rule| rule.category == Category::UnitedStates)
        .unwrap();

    assert!(merged[..first_us].iter().all(|rule| rule.category == Category::China));
    assert!(merged[first_us..].iter().all(|rule| rule.category == Category::UnitedStates));

    // The chinese new year's day was kept
    let new_year = merged.iter().find(|rule| rule.name == "New Year's Day").unwrap();
    assert_eq!(new_year.category, Category::China);
}

#[test]
fn disable_builtin() -> Result<(), Error> {
    let ctx = Context::default();
    let labor_day = date!("2024-09-02");
    let from = datetime!("2024-08-31 12:00", Utc);
    let mut catalog = HolidayCatalog::new();

    assert_eq!(names(matches_on(&catalog, labor_day)), ["Labor Day"]);
    assert_eq!(next_occurrence(&catalog, &from, &ctx).unwrap().rule.name, "Labor Day");

    catalog.set_builtin_enabled("Labor Day", false)?;
    assert!(!catalog.is_builtin_enabled("Labor Day"));
    assert!(matches_on(&catalog, labor_day).is_empty());

    let next = next_occurrence(&catalog, &from, &ctx).unwrap();
    assert_eq!(next.rule.name, "Teachers' Day");
    assert_eq!(next.days_until, 10);

    catalog.set_builtin_enabled("Labor Day", true)?;
    assert_eq!(names(matches_on(&catalog, labor_day)), ["Labor Day"]);
    assert_eq!(next_occurrence(&catalog, &from, &ctx).unwrap().rule.name, "Labor Day");
    Ok(())
}

#[test]
fn disabled_names_apply_to_all_sets() -> Result<(), Error> {
    let mut catalog = HolidayCatalog::new();
    catalog.set_builtin_enabled("New Year's Day", false)?;
    assert!(matches_on(&catalog, date!("2025-01-01")).is_empty());
    Ok(())
}

#[test]
fn custom_rules() -> Result<(), Error> {
    let mut catalog = HolidayCatalog::new();
    catalog.add_custom(CustomRule::new("Anniversary", RuleFields::solar(3, 3)))?;
    catalog.add_custom(CustomRule::new(" Grandma ", RuleFields::lunar(9, 9)))?;

    assert_eq!(names(catalog.custom_rules()), ["Anniversary", "Grandma"]);
    assert_eq!(names(matches_on(&catalog, date!("2024-03-03"))), ["Anniversary"]);

    catalog.edit_custom("Anniversary", RuleFields::solar(3, 4))?;
    assert!(matches_on(&catalog, date!("2024-03-03")).is_empty());
    assert_eq!(names(matches_on(&catalog, date!("2024-03-04"))), ["Anniversary"]);

    let removed = catalog.remove_custom("Anniversary")?;
    assert_eq!(removed.kind, DateRule::Fixed { month: 3, day: 4 });
    assert_eq!(names(catalog.custom_rules()), ["Grandma"]);
    Ok(())
}

#[test]
fn custom_rules_validation() -> Result<(), Error> {
    let mut catalog = HolidayCatalog::new();
    catalog.add_custom(CustomRule::new("Alex", RuleFields::solar(2, 29)))?;

    let invalid = [
        CustomRule::new("", RuleFields::solar(1, 1)),
        CustomRule::new("Alex", RuleFields::solar(1, 1)),
        CustomRule::new("Bad month", RuleFields::solar(13, 1)),
        CustomRule::new("Bad day", RuleFields::solar(4, 31)),
        CustomRule::new("Bad lunar day", RuleFields::lunar(1, 31)),
        CustomRule::new("Bad lunar month", RuleFields::lunar(0, 1)),
    ];

    for rule in invalid {
        assert!(catalog.add_custom(rule.clone()).is_err(), "{rule:?} was accepted");
    }

    assert!(matches!(
        catalog.edit_custom("Unknown", RuleFields::solar(1, 1)),
        Err(Error::UnknownCustom(_)),
    ));

    assert!(matches!(
        catalog.edit_custom("Alex", RuleFields::lunar(12, 31)),
        Err(Error::Syntax(_)),
    ));

    assert!(matches!(catalog.remove_custom("Unknown"), Err(Error::UnknownCustom(_))));
    assert!(matches!(
        catalog.set_builtin_enabled("Alex", false),
        Err(Error::UnknownBuiltin(_)),
    ));

    // Nothing changed
    assert_eq!(names(catalog.custom_rules()), ["Alex"]);
    assert_eq!(catalog.custom_rules()[0].kind, DateRule::Fixed { month: 2, day: 29 });
    Ok(())
}

#[test]
fn custom_shadowed_by_builtin() -> Result<(), Error> {
    let mut catalog = HolidayCatalog::new();
    catalog.add_custom(CustomRule::new("Halloween", RuleFields::solar(10, 30)))?;
    assert!(matches_on(&catalog, date!("2024-10-30")).is_empty());

    catalog.set_builtin_enabled("Halloween", false)?;
    assert_eq!(names(matches_on(&catalog, date!("2024-10-30"))), ["Halloween"]);
    assert!(matches_on(&catalog, date!("2024-10-31")).is_empty());
    Ok(())
}

#[test]
fn lunar_short_month_fallback() -> Result<(), Error> {
    let mut catalog = HolidayCatalog::new();
    catalog.add_custom(CustomRule::new("Lunar birthday", RuleFields::lunar(5, 30)))?;

    // The 5th lunar month of 2017 only has 29 days
    assert_eq!(
        names(matches_on(&catalog, date!("2017-06-23"))),
        ["Lunar birthday"],
    );

    Ok(())
}

#[test]
fn persistence() -> Result<(), Error> {
    let mut catalog = HolidayCatalog::load(MemoryStore::new());
    catalog.add_custom(CustomRule::new("Wedding", RuleFields::solar(6, 12)))?;
    catalog.add_custom(CustomRule::new("Grandma", RuleFields::lunar(9, 9)))?;
    catalog.set_builtin_enabled("Halloween", false)?;

    let store = catalog.into_store();
    let raw = store.get(keys::CUSTOM_HOLIDAYS).unwrap().unwrap();
    let records: Vec<RuleRecord> = serde_json::from_str(&raw).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[1].is_lunar);
    assert!(!records[1].is_fixed);
    assert_eq!(records[1].category, Category::Custom);

    assert_eq!(
        store.get(keys::DISABLED_HOLIDAYS).unwrap().as_deref(),
        Some(r#"["Halloween"]"#),
    );

    let catalog = HolidayCatalog::load(store);
    assert_eq!(names(catalog.custom_rules()), ["Wedding", "Grandma"]);
    assert!(!catalog.is_builtin_enabled("Halloween"));
    assert!(catalog.is_builtin_enabled("Christmas Day"));
    Ok(())
}

#[test]
fn unchanged_state_is_persisted() -> Result<(), Error> {
    let mut store = MemoryStore::new();

    store
        .set(keys::DISABLED_HOLIDAYS, "{not json".to_string())
        .unwrap();

    let mut catalog = HolidayCatalog::load(store);
    assert!(catalog.is_builtin_enabled("Halloween"));
    catalog.set_builtin_enabled("Halloween", true)?;

    assert_eq!(
        catalog.store().get(keys::DISABLED_HOLIDAYS).unwrap().as_deref(),
        Some("[]"),
    );

    Ok(())
}

#[test]
fn record_round_trip() -> Result<(), Error> {
    let mut catalog = HolidayCatalog::new();
    catalog.add_custom(CustomRule::new("Wedding", RuleFields::solar(6, 12)))?;
    catalog.add_custom(CustomRule::new("Grandma", RuleFields::lunar(9, 9)))?;

    let restored = HolidayCatalog::load(catalog.store().clone());

    for (original, restored) in catalog.custom_rules().iter().zip(restored.custom_rules()) {
        for year in [2017, 2023, 2024, 2025] {
            assert_eq!(resolve(&original.kind, year), resolve(&restored.kind, year));
        }
    }

    assert_eq!(restored.custom_rules().len(), 2);
    Ok(())
}

#[test]
fn malformed_records() {
    let mut store = MemoryStore::new();

    store
        .set(
            keys::CUSTOM_HOLIDAYS,
            r#"[
                {"name": "Ok", "month": 1, "day": 2, "isFixed": true, "isLunar": false},
                {"name": "Ok", "month": 1, "day": 3, "isFixed": true, "isLunar": false},
                {"name": "", "month": 1, "day": 2},
                {"name": "Bad day", "month": 2, "day": 30},
                {"month": 1, "day": 2},
                42
            ]"#
            .to_string(),
        )
        .unwrap();

    store
        .set(keys::DISABLED_HOLIDAYS, "{not json".to_string())
        .unwrap();

    let catalog = HolidayCatalog::load(store);
    assert_eq!(names(catalog.custom_rules()), ["Ok"]);
    assert_eq!(catalog.custom_rules()[0].kind, DateRule::Fixed { month: 1, day: 2 });
    assert!(catalog.builtin_rules().all(|(_, enabled)| enabled));
}

#[test]
fn store_failures_are_ignored() -> Result<(), Error> {
    let mut catalog = HolidayCatalog::load(FailingStore);
    assert!(catalog.custom_rules().is_empty());

    catalog.add_custom(CustomRule::new("Wedding", RuleFields::solar(6, 12)))?;
    catalog.set_builtin_enabled("Halloween", false)?;

    assert_eq!(names(catalog.custom_rules()), ["Wedding"]);
    assert!(!catalog.is_builtin_enabled("Halloween"));
    assert_eq!(names(matches_on(&catalog, date!("2024-06-12"))), ["Wedding"]);
    Ok(())
}
