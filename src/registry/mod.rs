//! Name-keyed catalogue of evaluation tasks.
//!
//! The registry starts empty and only ever grows: [`TaskRegistry::register`]
//! ignores names that are already taken, so the first registration wins.
//! [`TaskRegistry::discover`] fills it from plugin manifests on disk.

mod discovery;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::error::{LookupError, RegistrationError};
use crate::task::{Task, TaskFactory};

/// Registry of all available tasks.
///
/// Created empty by the caller and passed around explicitly; there is no global instance.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, TaskFactory>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`.
    ///
    /// Returns `Ok(false)` without replacing anything if `name` is already
    /// registered. Blank names are rejected.
    pub fn register(&mut self, name: &str, factory: TaskFactory) -> Result<bool, RegistrationError> {
        if name.trim().is_empty() {
            return Err(RegistrationError::MissingName);
        }

        if self.tasks.contains_key(name) {
            debug!(
                task = name,
                "not registering task, one with the same name has already been registered"
            );
            return Ok(false);
        }

        self.tasks.insert(name.to_string(), factory);
        debug!(task = name, "registered task");
        Ok(true)
    }

    /// Create a new instance of the task registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn Task>, LookupError> {
        let factory = self.tasks.get(name).ok_or_else(|| LookupError::UnknownTask {
            name: name.to_string(),
            known: self.list_names().into_iter().collect(),
        })?;
        let task = factory();
        debug!(task = name, "created task");
        Ok(task)
    }

    /// Create one task per name, in order. Fails on the first unknown name.
    pub fn create_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Box<dyn Task>>, LookupError> {
        names.iter().map(|name| self.create(name.as_ref())).collect()
    }

    /// All registered task names, sorted.
    pub fn list_names(&self) -> BTreeSet<String> {
        self.tasks.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("tasks", &self.list_names())
            .finish()
    }
}
