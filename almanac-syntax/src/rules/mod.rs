pub mod date;
pub mod special;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub use date::{DateRule, Weekday};

use crate::error::{Error, Result};

// Category

/// Group a rule belongs to. This only drives how the rule is displayed.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Built-in set of chinese holidays.
    #[serde(rename = "cn")]
    China,
    /// Built-in set of holidays from the United States.
    #[serde(rename = "us")]
    UnitedStates,
    /// Defined by the user.
    #[serde(rename = "custom")]
    Custom,
}

impl Category {
    #[inline]
    pub fn is_builtin(self) -> bool {
        self != Self::Custom
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::China => "cn",
            Self::UnitedStates => "us",
            Self::Custom => "custom",
        }
    }
}

impl Default for Category {
    #[inline]
    fn default() -> Self {
        Self::Custom
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Rule

/// A named holiday, or any named date recurring every year.
///
/// The name is the identity of a rule inside of a catalog.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub kind: DateRule,
    pub category: Category,
}

impl Rule {
    pub fn new(name: impl Into<String>, kind: DateRule, category: Category) -> Self {
        Self { name: name.into(), kind, category }
    }

    /// Parse a rule from its name and the textual representation of its date.
    ///
    /// ```
    /// use almanac_syntax::rules::{Category, Rule};
    ///
    /// let rule = Rule::parse("Labor Day", "Mo[1] Sep", Category::UnitedStates).unwrap();
    /// assert_eq!(rule.kind.to_string(), "Mo[1] Sep");
    /// ```
    pub fn parse(name: impl Into<String>, kind: &str, category: Category) -> Result<Self> {
        Ok(Self::new(name, kind.parse()?, category))
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.kind.is_fixed()
    }

    #[inline]
    pub fn is_lunar(&self) -> bool {
        self.kind.is_lunar()
    }

    /// Convert this rule into its storable form, only fixed and lunar rules
    /// without offset can be stored.
    pub fn to_record(&self) -> Result<RuleRecord> {
        let (month, day, is_lunar) = match self.kind {
            DateRule::Fixed { month, day } => (month, day, false),
            DateRule::Lunar { month, day, offset: 0 } => (month, day, true),
            _ => return Err(Error::Unsupported("storing a rule that is not a plain date")),
        };

        Ok(RuleRecord {
            name: self.name.clone(),
            month,
            day,
            is_fixed: !is_lunar,
            is_lunar,
            category: self.category,
        })
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

// RuleRecord

/// Data-only representation of a custom rule, as it is persisted.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    pub name: String,
    pub month: u8,
    pub day: u8,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default)]
    pub is_lunar: bool,
    #[serde(default)]
    pub category: Category,
}

impl RuleRecord {
    /// Rebuild the rule described by this record, checking that its fields
    /// are still consistent.
    ///
    /// ```
    /// use almanac_syntax::rules::{DateRule, RuleRecord};
    ///
    /// let record: RuleRecord = serde_json::from_str(
    ///     r#"{"name": "Grandma", "month": 9, "day": 9, "isFixed": false, "isLunar": true}"#,
    /// ).unwrap();
    ///
    /// let rule = record.into_rule().unwrap();
    /// assert_eq!(rule.kind, DateRule::Lunar { month: 9, day: 9, offset: 0 });
    /// ```
    pub fn into_rule(self) -> Result<Rule> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        let kind = DateRule::from_triple(self.month, self.day, self.is_lunar)?;
        Ok(Rule::new(self.name, kind, self.category))
    }
}

impl TryFrom<&Rule> for RuleRecord {
    type Error = Error;

    fn try_from(rule: &Rule) -> Result<Self> {
        rule.to_record()
    }
}
