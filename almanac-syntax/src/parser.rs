use std::convert::TryInto;

use pest::iterators::Pair;
use pest::Parser;

use crate::error::{Error, Result};
use crate::rules as rl;
use crate::rules::date::{check_lunar, check_solar};

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct DateRuleParser;

/// Just used while collecting parsed expression
enum PlusOrMinus {
    Plus,
    Minus,
}

/// Parse the textual representation of a date rule.
///
/// ```
/// use almanac_syntax::rules::{DateRule, Weekday};
///
/// assert_eq!(
///     almanac_syntax::parse("Mo[-1] May").unwrap(),
///     DateRule::LastWeekday { month: 5, weekday: Weekday::Mon },
/// );
/// ```
pub fn parse(data: &str) -> Result<rl::DateRule> {
    let date_rule_pair = DateRuleParser::parse(Rule::input_date_rule, data)
        .map_err(Error::from)?
        .next()
        .expect("grammar error: no date rule found");

    build_date_rule(date_rule_pair)
}

/// Parse a table of rules, one per line with the format `<date rule> | <name>`.
///
/// Empty lines and lines starting with `#` are ignored.
///
/// ```
/// use almanac_syntax::rules::Category;
///
/// let table = "
///     ## Some US holidays
///     Jul 04   | Independence Day
///     Th[4] Nov | Thanksgiving
/// ";
///
/// let rules = almanac_syntax::parse_table(table, Category::UnitedStates).unwrap();
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[1].name, "Thanksgiving");
/// ```
pub fn parse_table(data: &str, category: rl::Category) -> Result<Vec<rl::Rule>> {
    let rules: Vec<_> = data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let Some((kind, name)) = line.split_once('|') else {
                return Err(Error::Unsupported("table line without a `|` separator"));
            };

            let name = name.trim();

            if name.is_empty() {
                return Err(Error::EmptyName);
            }

            rl::Rule::parse(name, kind.trim(), category)
        })
        .collect::<Result<_>>()?;

    #[cfg(feature = "log")]
    for (idx, rule) in rules.iter().enumerate() {
        if rules[..idx].iter().any(|prev| prev.name == rule.name) {
            log::warn!("Rule `{}` is defined twice in the {category} table", rule.name);
        }
    }

    Ok(rules)
}

fn unexpected_token<T>(token: Rule, parent: Rule) -> T {
    unreachable!("Grammar error: found `{token:?}` inside of `{parent:?}`")
}

// ---
// --- Rule kinds
// ---

fn build_date_rule(pair: Pair<Rule>) -> Result<rl::DateRule> {
    match pair.as_rule() {
        Rule::fixed => build_fixed(pair),
        Rule::cycle => build_cycle(pair),
        Rule::nth_weekday => build_nth_weekday(pair),
        Rule::easter => build_easter(pair),
        Rule::lunar => build_lunar(pair),
        other => unexpected_token(other, Rule::input_date_rule),
    }
}

fn build_fixed(pair: Pair<Rule>) -> Result<rl::DateRule> {
    assert_eq!(pair.as_rule(), Rule::fixed);
    let mut pairs = pair.into_inner();

    let month = build_month(pairs.next().expect("missing month"));
    let day = build_daynum(pairs.next().expect("missing day"));
    rl::DateRule::fixed(month, day)
}

fn build_cycle(pair: Pair<Rule>) -> Result<rl::DateRule> {
    assert_eq!(pair.as_rule(), Rule::cycle);
    let mut pairs = pair.into_inner();

    let anchor = build_year(pairs.next().expect("missing anchor year"));
    let step_raw = build_positive_number(pairs.next().expect("missing step"))?;
    let month = build_month(pairs.next().expect("missing month"));
    let day = build_daynum(pairs.next().expect("missing day"));
    check_solar(month, day)?;

    let step: u16 = step_raw.try_into().map_err(|_| Error::Overflow {
        value: format!("{}", step_raw),
        expected: "an integer in [1, 2**16[".to_string(),
    })?;

    if step == 0 {
        return Err(Error::Overflow {
            value: "0".to_string(),
            expected: "a step of at least one year".to_string(),
        });
    }

    Ok(rl::DateRule::Cycle { month, day, anchor, step })
}

fn build_nth_weekday(pair: Pair<Rule>) -> Result<rl::DateRule> {
    assert_eq!(pair.as_rule(), Rule::nth_weekday);
    let mut pairs = pair.into_inner();

    let weekday = build_wday(pairs.next().expect("missing week day"));
    let nth_pair = pairs.next().expect("missing week day index");
    let month = build_month(pairs.next().expect("missing month"));

    match nth_pair.as_str() {
        "-1" => Ok(rl::DateRule::LastWeekday { month, weekday }),
        raw => match raw.parse::<u8>() {
            Ok(nth @ 1..=5) => Ok(rl::DateRule::NthWeekday { month, weekday, nth }),
            _ => Err(Error::Overflow {
                value: raw.to_string(),
                expected: "a week day index in 1 to 5, or -1".to_string(),
            }),
        },
    }
}

fn build_easter(pair: Pair<Rule>) -> Result<rl::DateRule> {
    assert_eq!(pair.as_rule(), Rule::easter);

    let offset = match pair.into_inner().next() {
        Some(pair) => build_day_offset(pair)?,
        None => 0,
    };

    Ok(rl::DateRule::Easter { offset })
}

fn build_lunar(pair: Pair<Rule>) -> Result<rl::DateRule> {
    assert_eq!(pair.as_rule(), Rule::lunar);
    let mut pairs = pair.into_inner();

    let month = build_monthnum(pairs.next().expect("missing lunar month"));
    let day = build_daynum(pairs.next().expect("missing lunar day"));
    check_lunar(month, day)?;

    let offset = match pairs.next() {
        Some(pair) => build_day_offset(pair)?,
        None => 0,
    };

    Ok(rl::DateRule::Lunar { month, day, offset })
}

fn build_day_offset(pair: Pair<Rule>) -> Result<i64> {
    assert_eq!(pair.as_rule(), Rule::day_offset);
    let mut pairs = pair.into_inner();

    let sign = build_plus_or_minus(pairs.next().expect("empty day offset"));
    let val_abs = build_positive_number(pairs.next().expect("missing value"))?;

    let val_abs: i64 = val_abs.try_into().map_err(|_| Error::Overflow {
        value: format!("{}", val_abs),
        expected: "an integer in [-2**63, 2**63[".to_string(),
    })?;

    Ok(match sign {
        PlusOrMinus::Plus => val_abs,
        PlusOrMinus::Minus => -val_abs,
    })
}

// ---
// --- Atoms
// ---

fn build_plus_or_minus(pair: Pair<Rule>) -> PlusOrMinus {
    assert_eq!(pair.as_rule(), Rule::plus_or_minus);
    let pair = pair.into_inner().next().expect("empty sign");

    match pair.as_rule() {
        Rule::plus => PlusOrMinus::Plus,
        Rule::minus => PlusOrMinus::Minus,
        other => unexpected_token(other, Rule::plus_or_minus),
    }
}

fn build_wday(pair: Pair<Rule>) -> rl::Weekday {
    assert_eq!(pair.as_rule(), Rule::wday);
    let pair = pair.into_inner().next().expect("empty week day");

    match pair.as_rule() {
        Rule::sunday => rl::Weekday::Sun,
        Rule::monday => rl::Weekday::Mon,
        Rule::tuesday => rl::Weekday::Tue,
        Rule::wednesday => rl::Weekday::Wed,
        Rule::thursday => rl::Weekday::Thu,
        Rule::friday => rl::Weekday::Fri,
        Rule::saturday => rl::Weekday::Sat,
        other => unexpected_token(other, Rule::wday),
    }
}

fn build_month(pair: Pair<Rule>) -> u8 {
    assert_eq!(pair.as_rule(), Rule::month);
    let pair = pair.into_inner().next().expect("empty month");

    match pair.as_rule() {
        Rule::january => 1,
        Rule::february => 2,
        Rule::march => 3,
        Rule::april => 4,
        Rule::may => 5,
        Rule::june => 6,
        Rule::july => 7,
        Rule::august => 8,
        Rule::september => 9,
        Rule::october => 10,
        Rule::november => 11,
        Rule::december => 12,
        other => unexpected_token(other, Rule::month),
    }
}

fn build_monthnum(pair: Pair<Rule>) -> u8 {
    assert_eq!(pair.as_rule(), Rule::monthnum);
    pair.as_str().parse().expect("invalid month format")
}

fn build_daynum(pair: Pair<Rule>) -> u8 {
    assert_eq!(pair.as_rule(), Rule::daynum);
    pair.as_str().parse().expect("invalid day format")
}

fn build_year(pair: Pair<Rule>) -> i32 {
    assert_eq!(pair.as_rule(), Rule::year);
    pair.as_str().parse().expect("invalid year format")
}

fn build_positive_number(pair: Pair<Rule>) -> Result<u64> {
    assert_eq!(pair.as_rule(), Rule::positive_number);
    pair.as_str().parse().map_err(|_| Error::Overflow {
        value: pair.as_str().to_string(),
        expected: "a number between 0 and 2**64".to_string(),
    })
}
