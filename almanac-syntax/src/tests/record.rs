use crate::error::{Error, Result};
use crate::rules::special::{SpecialDate, SpecialDateKind};
use crate::rules::{Category, DateRule, Rule, RuleRecord};

#[test]
fn record_fields() -> Result<()> {
    let rule = Rule::new("Anniversary", DateRule::fixed(6, 12)?, Category::Custom);
    let json = serde_json::to_value(rule.to_record()?).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "name": "Anniversary",
            "month": 6,
            "day": 12,
            "isFixed": true,
            "isLunar": false,
            "category": "custom",
        }),
    );

    Ok(())
}

#[test]
fn record_rebuilds_same_kind() -> Result<()> {
    for rule in [
        Rule::new("Solar", DateRule::fixed(3, 14)?, Category::Custom),
        Rule::new("Lunar", DateRule::lunar(5, 30)?, Category::Custom),
    ] {
        let raw = serde_json::to_string(&rule.to_record()?).unwrap();
        let record: RuleRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.into_rule()?, rule);
    }

    Ok(())
}

#[test]
fn record_defaults() -> Result<()> {
    let record: RuleRecord =
        serde_json::from_str(r#"{"name": "Old format", "month": 2, "day": 3}"#).unwrap();

    let rule = record.into_rule()?;
    assert_eq!(rule.kind, DateRule::Fixed { month: 2, day: 3 });
    assert_eq!(rule.category, Category::Custom);
    Ok(())
}

#[test]
fn record_rejects_inconsistent_fields() {
    let record = |name: &str, month, day, is_lunar: bool| RuleRecord {
        name: name.to_string(),
        month,
        day,
        is_fixed: !is_lunar,
        is_lunar,
        category: Category::Custom,
    };

    assert!(matches!(
        record("", 1, 1, false).into_rule(),
        Err(Error::EmptyName)
    ));

    assert!(matches!(
        record("x", 0, 1, false).into_rule(),
        Err(Error::InvalidMonth { .. })
    ));

    assert!(matches!(
        record("x", 2, 30, false).into_rule(),
        Err(Error::InvalidDay { .. })
    ));

    // Lunar months may have 30 days, including the second one
    assert!(record("x", 2, 30, true).into_rule().is_ok());
}

#[test]
fn only_plain_dates_are_stored() -> Result<()> {
    let rule = Rule::parse("Labor Day", "Mo[1] Sep", Category::UnitedStates)?;
    assert!(matches!(rule.to_record(), Err(Error::Unsupported(_))));

    let rule = Rule::parse("Eve", "lunar 01-01 -1 day", Category::China)?;
    assert!(matches!(rule.to_record(), Err(Error::Unsupported(_))));
    Ok(())
}

#[test]
fn special_date_json() -> Result<()> {
    let date = SpecialDate::new("Sam", 7, 21, SpecialDateKind::Birthday)?;

    assert_eq!(
        serde_json::to_value(&date).unwrap(),
        serde_json::json!({"name": "Sam", "month": 7, "day": 21, "type": "birthday"}),
    );

    let parsed: SpecialDate = serde_json::from_str(
        r#"{"name": "Wedding", "month": 10, "day": 2, "type": "anniversary"}"#,
    )
    .unwrap();

    assert_eq!(parsed.kind, SpecialDateKind::Anniversary);
    assert!(parsed.validate().is_ok());
    Ok(())
}
