use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{keys, load_records, save_json, KeyValueStore, MemoryStore};

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// A to-do list, persisted after each change.
#[derive(Clone, Debug, Default)]
pub struct TaskList<S = MemoryStore> {
    store: S,
    tasks: Vec<Task>,
}

impl TaskList<MemoryStore> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: KeyValueStore> TaskList<S> {
    pub fn load(store: S) -> Self {
        let tasks = load_records(&store, keys::TASKS, |task: Task| -> Result<_> {
            if task.text.trim().is_empty() {
                return Err(Error::EmptyText);
            }

            Ok(task)
        });

        Self { store, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks that are not done yet.
    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|task| !task.done).count()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a task, returning its identifier.
    ///
    /// ```
    /// use almanac::widgets::TaskList;
    ///
    /// let mut tasks = TaskList::new();
    /// let id = tasks.add("  Buy mooncakes ").unwrap();
    /// assert_eq!(tasks.tasks()[0].text, "Buy mooncakes");
    /// assert_eq!(tasks.toggle(id).unwrap(), true);
    /// assert!(tasks.add("").is_err());
    /// ```
    pub fn add(&mut self, text: &str) -> Result<u64> {
        let text = text.trim();

        if text.is_empty() {
            return Err(Error::EmptyText);
        }

        let id = self.tasks.iter().map(|task| task.id + 1).max().unwrap_or(0);
        self.tasks.push(Task { id, text: text.to_string(), done: false });
        self.persist();
        Ok(id)
    }

    /// Flip the completion status of a task, returning the new status.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::UnknownTask(id))?;

        task.done = !task.done;
        let done = task.done;
        self.persist();
        Ok(done)
    }

    pub fn remove(&mut self, id: u64) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(Error::UnknownTask(id))?;

        let task = self.tasks.remove(idx);
        self.persist();
        Ok(task)
    }

    /// Remove all tasks that are done, returning how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.done);
        let removed = before - self.tasks.len();

        if removed > 0 {
            self.persist();
        }

        removed
    }

    fn persist(&mut self) {
        save_json(&mut self.store, keys::TASKS, &self.tasks);
    }
}
