#![doc = include_str!("../README.md")]
// Enable doc_auto_cfg feature when building docs on the nightly channel
// (which will be the case for docs.rs).
#![allow(unexpected_cfgs)]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]

pub mod builtin;
pub mod catalog;
pub mod context;
pub mod error;
pub mod resolve;
pub mod search;
pub mod special_dates;
pub mod store;
pub mod timer;
pub mod widgets;

mod utils;

#[cfg(test)]
mod tests;

// Public re-exports
pub use crate::catalog::{CustomRule, HolidayCatalog, RuleFields};
pub use crate::context::Context;
pub use crate::error::{Error, Result};
pub use crate::search::{matches_on, next_occurrence, Occurrence};
pub use crate::special_dates::{upcoming_within, SpecialDateTracker, UpcomingSpecialDate};
pub use almanac_syntax::rules::{Category, DateRule, Rule};
pub use almanac_syntax::{SpecialDate, SpecialDateKind};
pub use lunar_calendar::LunarDate;
