use std::collections::{BTreeSet, HashSet};

use almanac_syntax::rules::{Category, DateRule, Rule, RuleRecord};

use crate::builtin;
use crate::error::{Error, Result};
use crate::store::{keys, load_json, load_records, save_json, KeyValueStore, MemoryStore};

// --
// -- Custom rules input
// --

/// The editable fields of a custom rule.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct RuleFields {
    pub month: u8,
    pub day: u8,
    pub is_lunar: bool,
}

impl RuleFields {
    pub fn solar(month: u8, day: u8) -> Self {
        Self { month, day, is_lunar: false }
    }

    pub fn lunar(month: u8, day: u8) -> Self {
        Self { month, day, is_lunar: true }
    }

    /// Validate the fields and build the rule they describe.
    ///
    /// ```
    /// use almanac::catalog::RuleFields;
    ///
    /// assert!(RuleFields::lunar(5, 30).to_date_rule().is_ok());
    /// assert!(RuleFields::lunar(5, 31).to_date_rule().is_err());
    /// assert!(RuleFields::solar(2, 30).to_date_rule().is_err());
    /// ```
    pub fn to_date_rule(self) -> Result<DateRule> {
        Ok(DateRule::from_triple(self.month, self.day, self.is_lunar)?)
    }
}

/// A rule defined by the user.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CustomRule {
    pub name: String,
    pub fields: RuleFields,
}

impl CustomRule {
    pub fn new(name: impl Into<String>, fields: RuleFields) -> Self {
        Self { name: name.into(), fields }
    }
}

// --
// -- Catalog
// --

/// Built-in holidays together with the rules defined by the user.
///
/// Every mutation is persisted immediately into the underlying store. A store
/// failure doesn't prevent the catalog from applying the change.
#[derive(Clone, Debug, Default)]
pub struct HolidayCatalog<S = MemoryStore> {
    store: S,
    custom: Vec<Rule>,
    disabled: BTreeSet<String>,
}

impl HolidayCatalog<MemoryStore> {
    /// Create a catalog with only built-in rules, backed by an in-memory
    /// store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: KeyValueStore> HolidayCatalog<S> {
    /// Load user rules and preferences from a store. Records that can't be
    /// read are dropped.
    ///
    /// ```
    /// use almanac::HolidayCatalog;
    /// use almanac::store::{KeyValueStore, MemoryStore};
    ///
    /// let mut store = MemoryStore::new();
    ///
    /// store.set(
    ///     "customHolidays",
    ///     r#"[
    ///         {"name": "Grandma", "month": 9, "day": 9, "isFixed": false, "isLunar": true},
    ///         {"name": "Broken", "month": 13, "day": 1, "isFixed": true, "isLunar": false},
    ///         "garbage"
    ///     ]"#.to_string(),
    /// ).unwrap();
    ///
    /// let catalog = HolidayCatalog::load(store);
    /// assert_eq!(catalog.custom_rules().len(), 1);
    /// ```
    pub fn load(store: S) -> Self {
        let mut names = HashSet::new();

        let custom = load_records(&store, keys::CUSTOM_HOLIDAYS, |record: RuleRecord| -> Result<_> {
            let mut rule = record.into_rule()?;
            rule.category = Category::Custom;

            if !names.insert(rule.name.clone()) {
                return Err(Error::DuplicateName(rule.name));
            }

            Ok(rule)
        });

        let disabled: Vec<String> = load_json(&store, keys::DISABLED_HOLIDAYS);

        Self {
            store,
            custom,
            disabled: disabled.into_iter().collect(),
        }
    }

    /// All rules that are displayed on a calendar: built-in rules that are
    /// enabled, followed by custom rules. When several rules share the same
    /// name, only the first one is kept.
    ///
    /// ```
    /// use almanac::HolidayCatalog;
    ///
    /// let catalog = HolidayCatalog::new();
    /// let merged = catalog.merged_rules_for_display();
    ///
    /// // Both sets define a new year's day
    /// let new_years: Vec<_> = merged.iter().filter(|r| r.name == "New Year's Day").collect();
    /// assert_eq!(new_years.len(), 1);
    /// ```
    pub fn merged_rules_for_display(&self) -> Vec<&Rule> {
        let mut seen = HashSet::new();
        let mut merged = Vec::new();

        let builtin = builtin::all().filter(|rule| !self.disabled.contains(&rule.name));

        for rule in builtin {
            if seen.insert(rule.name.as_str()) {
                merged.push(rule);
            }
        }

        for rule in &self.custom {
            if seen.insert(rule.name.as_str()) {
                merged.push(rule);
            }
        }

        merged
    }

    /// Iterate over the rules that should be considered when searching for
    /// occurrences, in display order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.merged_rules_for_display().into_iter()
    }

    /// List all built-in rules along with a flag telling if each of them is
    /// enabled.
    pub fn builtin_rules(&self) -> impl Iterator<Item = (&'static Rule, bool)> + '_ {
        builtin::all().map(|rule| (rule, !self.disabled.contains(&rule.name)))
    }

    pub fn is_builtin_enabled(&self, name: &str) -> bool {
        !self.disabled.contains(name)
    }

    /// Rules defined by the user, in insertion order.
    pub fn custom_rules(&self) -> &[Rule] {
        &self.custom
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Define a new rule. Names must be unique among custom rules, a custom
    /// rule that has the same name as a built-in rule will only be visible
    /// while the built-in rule is disabled.
    pub fn add_custom(&mut self, rule: CustomRule) -> Result<()> {
        let name = rule.name.trim();

        if name.is_empty() {
            return Err(almanac_syntax::Error::EmptyName.into());
        }

        if self.custom.iter().any(|other| other.name == name) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        let kind = rule.fields.to_date_rule()?;

        if builtin::find(name).is_some() {
            #[cfg(feature = "log")]
            log::warn!("Custom date `{name}` is shadowed by a built-in holiday");
        }

        self.custom.push(Rule::new(name, kind, Category::Custom));
        self.persist_custom();
        Ok(())
    }

    /// Delete a custom rule, returning it.
    pub fn remove_custom(&mut self, name: &str) -> Result<Rule> {
        let idx = self.custom_position(name)?;
        let rule = self.custom.remove(idx);
        self.persist_custom();
        Ok(rule)
    }

    /// Replace the date of a custom rule, its name can't be changed.
    pub fn edit_custom(&mut self, name: &str, fields: RuleFields) -> Result<()> {
        let idx = self.custom_position(name)?;
        let kind = fields.to_date_rule()?;
        self.custom[idx].kind = kind;
        self.persist_custom();
        Ok(())
    }

    /// Enable or disable a built-in rule.
    ///
    /// ```
    /// use almanac::HolidayCatalog;
    ///
    /// let mut catalog = HolidayCatalog::new();
    /// catalog.set_builtin_enabled("Halloween", false).unwrap();
    /// assert!(catalog.enabled_rules().all(|rule| rule.name != "Halloween"));
    ///
    /// assert!(catalog.set_builtin_enabled("Unknown", false).is_err());
    /// ```
    pub fn set_builtin_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        if builtin::find(name).is_none() {
            return Err(Error::UnknownBuiltin(name.to_string()));
        }

        if enabled {
            self.disabled.remove(name);
        } else {
            self.disabled.insert(name.to_string());
        }

        save_json(&mut self.store, keys::DISABLED_HOLIDAYS, &self.disabled);

        Ok(())
    }

    fn custom_position(&self, name: &str) -> Result<usize> {
        self.custom
            .iter()
            .position(|rule| rule.name == name)
            .ok_or_else(|| Error::UnknownCustom(name.to_string()))
    }

    fn persist_custom(&mut self) {
        let records: Vec<_> = self
            .custom
            .iter()
            .filter_map(|rule| rule.to_record().ok())
            .collect();

        save_json(&mut self.store, keys::CUSTOM_HOLIDAYS, &records);
    }
}
