//! Persistence of user data through an external key-value store.
//!
//! The store is a cache rather than a source of truth: read failures are
//! replaced with empty defaults and write failures are logged and ignored.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Keys under which each kind of user data is stored.
pub mod keys {
    pub const CUSTOM_HOLIDAYS: &str = "customHolidays";
    pub const DISABLED_HOLIDAYS: &str = "disabledHolidays";
    pub const SPECIAL_DATES: &str = "specialDates";
    pub const NOTE: &str = "note";
    pub const TASKS: &str = "tasks";
}

/// A string-to-string storage, holding JSON documents.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// A store that lives in memory and never fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Allows several widgets to share a single store.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use almanac::store::{KeyValueStore, MemoryStore};
///
/// let shared = Rc::new(RefCell::new(MemoryStore::new()));
/// let mut handle = shared.clone();
/// handle.set("note", "\"hello\"".to_string()).unwrap();
/// assert_eq!(shared.get("note").unwrap().as_deref(), Some("\"hello\""));
/// ```
impl<S: KeyValueStore> KeyValueStore for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.try_borrow()
            .map_err(|err| StoreError(err.to_string()))?
            .get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.try_borrow_mut()
            .map_err(|err| StoreError(err.to_string()))?
            .set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.try_borrow_mut()
            .map_err(|err| StoreError(err.to_string()))?
            .remove(key)
    }
}

/// Read a JSON document, falling back to the default value if it is missing
/// or can't be read.
pub(crate) fn load_json<T: DeserializeOwned + Default>(store: &impl KeyValueStore, key: &str) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(_err) => {
            #[cfg(feature = "log")]
            log::warn!("Could not read `{key}` from store: {_err}");
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|_err| {
        #[cfg(feature = "log")]
        log::warn!("Ignoring malformed value for `{key}`: {_err}");
        T::default()
    })
}

/// Read a JSON list, dropping the items that don't have the expected shape
/// or that are refused by `validate`.
pub(crate) fn load_records<T, U, E>(
    store: &impl KeyValueStore,
    key: &str,
    mut validate: impl FnMut(T) -> Result<U, E>,
) -> Vec<U>
where
    T: DeserializeOwned,
    E: std::fmt::Display,
{
    let items: Vec<serde_json::Value> = load_json(store, key);

    items
        .into_iter()
        .filter_map(|item| {
            let record = match serde_json::from_value(item) {
                Ok(record) => record,
                Err(_err) => {
                    #[cfg(feature = "log")]
                    log::warn!("Dropping malformed record from `{key}`: {_err}");
                    return None;
                }
            };

            match validate(record) {
                Ok(res) => Some(res),
                Err(_err) => {
                    #[cfg(feature = "log")]
                    log::warn!("Dropping invalid record from `{key}`: {_err}");
                    None
                }
            }
        })
        .collect()
}

/// Write a JSON document, failures are logged and otherwise ignored.
pub(crate) fn save_json<T: Serialize + ?Sized>(store: &mut impl KeyValueStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(_err) => {
            #[cfg(feature = "log")]
            log::warn!("Could not serialize `{key}`: {_err}");
            return;
        }
    };

    if let Err(_err) = store.set(key, raw) {
        #[cfg(feature = "log")]
        log::warn!("Could not write `{key}` to store: {_err}");
    }
}

/// Remove a key, failures are logged and otherwise ignored.
pub(crate) fn remove_key(store: &mut impl KeyValueStore, key: &str) {
    if let Err(_err) = store.remove(key) {
        #[cfg(feature = "log")]
        log::warn!("Could not remove `{key}` from store: {_err}");
    }
}
