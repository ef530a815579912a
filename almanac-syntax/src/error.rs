use std::fmt;

use crate::parser::Rule as GrammarRule;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug)]
pub enum Error {
    Parser(Box<pest::error::Error<GrammarRule>>),
    Unsupported(&'static str),
    Overflow { value: String, expected: String },
    InvalidMonth { month: u8, lunar: bool },
    InvalidDay { month: u8, day: u8, lunar: bool },
    EmptyName,
}

impl From<pest::error::Error<GrammarRule>> for Error {
    fn from(pest_err: pest::error::Error<GrammarRule>) -> Self {
        Self::Parser(Box::new(pest_err))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parser(pest_err) => write!(f, "{}", pest_err),
            Self::Unsupported(desc) => write!(f, "using an unsupported feature: {}", desc),
            Self::Overflow { value, expected } => {
                write!(f, "{} is too large: expected {}", value, expected)
            }
            Self::InvalidMonth { month, lunar } => {
                let calendar = if *lunar { "lunar" } else { "solar" };
                write!(f, "{month} is not a valid {calendar} month: expected 1 to 12")
            }
            Self::InvalidDay { month, day, lunar: true } => {
                write!(f, "{day} is not a valid day of lunar month {month}: expected 1 to 30")
            }
            Self::InvalidDay { month, day, lunar: false } => {
                write!(f, "{day} is not a valid day of month {month}")
            }
            Self::EmptyName => write!(f, "a name is required"),
        }
    }
}

impl std::error::Error for Error {}
