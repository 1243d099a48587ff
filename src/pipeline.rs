//! Sequential evaluation of tasks against one embedding.
//!
//! Every task runs on a blocking worker thread. Whatever happens inside a task
//! (an error, a panic, or a timeout) only affects that task's report: the
//! pipeline always returns one report per task, in submission order.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::embedding::Embedding;
use crate::error::TaskExecutionError;
use crate::report::TaskReport;
use crate::task::Task;

/// Title of the synthetic report created for a task that could not finish.
pub const EXECUTION_FAILURE_TITLE: &str = "The task raised an error during evaluation";

/// Runs tasks one after another and collects their reports.
#[derive(Debug, Clone, Default)]
pub struct EvaluationPipeline {
    task_timeout: Option<Duration>,
}

impl EvaluationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail tasks that run longer than `timeout`. `None` waits forever.
    ///
    /// A timed-out task is reported as failed but its worker thread is not
    /// interrupted.
    pub fn with_task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout
    }

    /// Evaluate every task against `embedding`, in order.
    pub async fn run(&self, embedding: Arc<Embedding>, tasks: Vec<Box<dyn Task>>) -> Vec<TaskReport> {
        let total = tasks.len();
        let mut reports = Vec::with_capacity(total);

        for (position, task) in tasks.into_iter().enumerate() {
            let name = task.name().to_string();
            info!(task = %name, position = position + 1, total, "evaluating task");

            let report = match self.evaluate(task, Arc::clone(&embedding)).await {
                Ok(report) => report,
                Err(err) => {
                    error!(task = %name, error = %err, "task execution failed");
                    failure_report(&name, &err)
                }
            };

            info!(task = %name, outcome = report.outcome_str(), "task evaluated");
            reports.push(report);
        }

        reports
    }

    /// Evaluate a single task on a blocking thread.
    pub async fn evaluate(
        &self,
        task: Box<dyn Task>,
        embedding: Arc<Embedding>,
    ) -> Result<TaskReport, TaskExecutionError> {
        let name = task.name().to_string();
        let handle = tokio::task::spawn_blocking(move || task.evaluate(&embedding));

        let joined = match self.task_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    warn!(task = %name, timeout_secs = timeout.as_secs_f64(), "task timed out");
                    return Err(TaskExecutionError::TimedOut {
                        task: name,
                        timeout,
                    });
                }
            },
            None => handle.await,
        };

        match joined {
            Ok(Ok(report)) => Ok(report),
            Ok(Err(source)) => Err(TaskExecutionError::Failed { task: name, source }),
            Err(join_error) => Err(TaskExecutionError::Panicked {
                task: name,
                message: panic_message(join_error),
            }),
        }
    }
}

/// Failed report standing in for a task that raised `err`.
pub fn failure_report(name: &str, err: &TaskExecutionError) -> TaskReport {
    TaskReport::new(name)
        .with_title(EXECUTION_FAILURE_TITLE)
        .with_body(err.to_string())
}

fn panic_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".into()
    }
}
