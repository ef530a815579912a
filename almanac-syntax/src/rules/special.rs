use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::display::month_str;
use crate::error::{Error, Result};
use crate::rules::date::check_solar;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialDateKind {
    Birthday,
    Anniversary,
}

impl SpecialDateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Anniversary => "anniversary",
        }
    }
}

impl Display for SpecialDateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A personal date recurring every year on the same solar day.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDate {
    pub name: String,
    pub month: u8,
    pub day: u8,
    #[serde(rename = "type")]
    pub kind: SpecialDateKind,
}

impl SpecialDate {
    /// ```
    /// use almanac_syntax::rules::special::{SpecialDate, SpecialDateKind};
    ///
    /// assert!(SpecialDate::new("Alex", 2, 29, SpecialDateKind::Birthday).is_ok());
    /// assert!(SpecialDate::new("Alex", 2, 30, SpecialDateKind::Birthday).is_err());
    /// assert!(SpecialDate::new(" ", 1, 1, SpecialDateKind::Birthday).is_err());
    /// ```
    pub fn new(name: impl Into<String>, month: u8, day: u8, kind: SpecialDateKind) -> Result<Self> {
        let res = Self { name: name.into(), month, day, kind };
        res.validate()?;
        Ok(res)
    }

    /// Check the fields of a special date, which may come from an untrusted
    /// source.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        check_solar(self.month, self.day)
    }
}

impl Display for SpecialDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} {} {:02})",
            self.name,
            self.kind,
            month_str(self.month),
            self.day,
        )
    }
}
