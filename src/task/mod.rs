//! Evaluation tasks.
//!
//! A [`Task`] consumes an [`Embedding`] and produces a [`TaskReport`]. Tasks are
//! made available by registering a [`TaskFactory`] under a unique name in a
//! [`TaskRegistry`]; [`register_builtin_tasks`] does this for the tasks shipped
//! with the crate.

pub mod definition;
pub mod odd_one_out;
pub mod word_analogy;

use std::sync::Arc;

use anyhow::Result;

use crate::embedding::Embedding;
use crate::error::RegistrationError;
use crate::registry::TaskRegistry;
use crate::report::TaskReport;

pub use definition::TaskDefinition;
pub use odd_one_out::OddOneOutTask;
pub use word_analogy::WordAnalogyTask;

/// An evaluation routine run against a loaded embedding.
///
/// Implementations must not rely on shared mutable state: the embedding is
/// shared read-only and every registry lookup creates a fresh instance.
pub trait Task: Send + Sync {
    /// Unique name this task is registered under.
    fn name(&self) -> &str;

    /// Evaluate the embedding. Errors are turned into a failed report by the pipeline.
    fn evaluate(&self, embedding: &Embedding) -> Result<TaskReport>;
}

/// Zero-argument constructor for a task.
pub type TaskFactory = Arc<dyn Fn() -> Box<dyn Task> + Send + Sync>;

/// Register the tasks shipped with this crate.
pub fn register_builtin_tasks(registry: &mut TaskRegistry) -> Result<(), RegistrationError> {
    registry.register(
        odd_one_out::GOT_TASK_NAME,
        Arc::new(|| Box::new(OddOneOutTask::got()) as Box<dyn Task>),
    )?;
    registry.register(
        word_analogy::GOT_TASK_NAME,
        Arc::new(|| Box::new(WordAnalogyTask::got()) as Box<dyn Task>),
    )?;
    Ok(())
}
