use crate::store::{keys, load_json, remove_key, save_json, KeyValueStore, MemoryStore};

/// A free-text note, persisted after each change.
#[derive(Clone, Debug, Default)]
pub struct Notes<S = MemoryStore> {
    store: S,
    text: String,
}

impl Notes<MemoryStore> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: KeyValueStore> Notes<S> {
    pub fn load(store: S) -> Self {
        let text = load_json(&store, keys::NOTE);
        Self { store, text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();

        if self.text.is_empty() {
            remove_key(&mut self.store, keys::NOTE);
        } else {
            save_json(&mut self.store, keys::NOTE, &self.text);
        }
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }
}
