use crate::error::{Error, Result};
use crate::parser::{parse, parse_table};
use crate::rules::{Category, DateRule, Weekday};

macro_rules! ex {
    ( $( $tt: expr ),* $( , )? ) => {
        (file!(), line!() $( , $tt )*)
    };
}

const EXAMPLES: &[(&str, u32, &str, &str)] = &[
    ex!("Jan 01", "Jan 01"),
    ex!("Dec 5", "Dec 05"),
    ex!("  Feb 29 ", "Feb 29"),
    ex!("Mo[1] Sep", "Mo[1] Sep"),
    ex!("Th[4] Nov", "Th[4] Nov"),
    ex!("Mo[-1] May", "Mo[-1] May"),
    ex!("2021/4 Jan 20", "2021/4 Jan 20"),
    ex!("1/4 Jan 20", "1/4 Jan 20"),
    ex!("easter", "easter"),
    ex!("easter -2 days", "easter -2 days"),
    ex!("easter +1 day", "easter +1 day"),
    ex!("easter +0 days", "easter"),
    ex!("lunar 8-15", "lunar 08-15"),
    ex!("lunar 01-01 -1 day", "lunar 01-01 -1 day"),
];

#[test]
fn display_normalizes() -> Result<()> {
    for (file, line, expr, displayed) in EXAMPLES {
        assert_eq!(
            parse(expr)?.to_string(),
            *displayed,
            "error with example from {file}:{line}",
        );
    }

    Ok(())
}

#[test]
fn display_is_parsable() -> Result<()> {
    for (file, line, _, displayed) in EXAMPLES {
        assert_eq!(
            parse(displayed)?.to_string(),
            *displayed,
            "error with example from {file}:{line}",
        );
    }

    Ok(())
}

#[test]
fn kinds() -> Result<()> {
    assert_eq!(parse("Jul 04")?, DateRule::Fixed { month: 7, day: 4 });

    assert_eq!(
        parse("Su[2] May")?,
        DateRule::NthWeekday { month: 5, weekday: Weekday::Sun, nth: 2 },
    );

    assert_eq!(
        parse("2021/4 Jan 20")?,
        DateRule::Cycle { month: 1, day: 20, anchor: 2021, step: 4 },
    );

    assert_eq!(parse("easter -2 days")?, DateRule::Easter { offset: -2 });

    assert_eq!(
        parse("lunar 12-08")?,
        DateRule::Lunar { month: 12, day: 8, offset: 0 },
    );

    Ok(())
}

#[test]
fn invalid_syntax() {
    for expr in [
        "",
        "January 01",
        "Mo Sep",
        "Mo[1]Sep",
        "easter 2 days",
        "lunar 08/15",
        "Jan 01 | name",
    ] {
        assert!(
            matches!(parse(expr), Err(Error::Parser(_))),
            "`{expr}` should not be parsable",
        );
    }
}

#[test]
fn invalid_values() {
    assert!(matches!(
        parse("Apr 31"),
        Err(Error::InvalidDay { month: 4, day: 31, lunar: false }),
    ));

    assert!(matches!(
        parse("lunar 13-01"),
        Err(Error::InvalidMonth { month: 13, lunar: true }),
    ));

    assert!(matches!(
        parse("lunar 05-31"),
        Err(Error::InvalidDay { month: 5, day: 31, lunar: true }),
    ));

    assert!(matches!(parse("Mo[6] Sep"), Err(Error::Overflow { .. })));
    assert!(matches!(parse("Mo[0] Sep"), Err(Error::Overflow { .. })));
    assert!(matches!(parse("Mo[-2] Sep"), Err(Error::Overflow { .. })));
    assert!(matches!(parse("2021/0 Jan 20"), Err(Error::Overflow { .. })));

    assert!(matches!(
        parse("easter +99999999999999999999 days"),
        Err(Error::Overflow { .. }),
    ));
}

#[test]
fn table() -> Result<()> {
    let rules = parse_table(
        "
        # comment
        Jan 01     | New Year's Day

        lunar 01-01|Spring Festival
        ",
        Category::China,
    )?;

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].name, "New Year's Day");
    assert_eq!(rules[1].name, "Spring Festival");
    assert!(rules[1].is_lunar());
    assert!(rules.iter().all(|rule| rule.category == Category::China));
    Ok(())
}

#[test]
fn invalid_table() {
    assert!(matches!(
        parse_table("Jan 01 New Year", Category::China),
        Err(Error::Unsupported(_)),
    ));

    assert!(matches!(
        parse_table("Jan 01 |  ", Category::China),
        Err(Error::EmptyName),
    ));

    assert!(parse_table("Jan 32 | Nope", Category::China).is_err());
}
