#![doc = include_str!("../README.md")]

#[macro_use]
extern crate pest_derive;

pub mod error;
pub mod rules;

mod display;
mod parser;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use parser::{parse, parse_table};
pub use rules::special::{SpecialDate, SpecialDateKind};
pub use rules::{Category, DateRule, Rule, RuleRecord};
