//! Odd-one-out task: which word of a list doesn't belong with the others?

use anyhow::Result;
use tracing::{debug, error};

use super::Task;
use crate::embedding::Embedding;
use crate::report::TaskReport;

/// Name of the built-in Game of Thrones odd-one-out task.
pub const GOT_TASK_NAME: &str = "en-got-odd-one-out";

/// Passes if the embedding picks `goal` as the odd one out of `words`.
#[derive(Debug, Clone)]
pub struct OddOneOutTask {
    name: String,
    words: Vec<String>,
    goal: String,
}

impl OddOneOutTask {
    pub fn new(name: impl Into<String>, words: Vec<String>, goal: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            words,
            goal: goal.into(),
        }
    }

    /// Four Starks and their castle.
    pub fn got() -> Self {
        Self::new(
            GOT_TASK_NAME,
            ["Eddard", "Catelyn", "Rob", "Riverrun", "Sansa"]
                .map(String::from)
                .to_vec(),
            "Riverrun",
        )
    }

    fn title(&self) -> String {
        format!(
            "Which of the following words is the odd one out?\n    {}",
            self.words.join(" ")
        )
    }
}

impl Task for OddOneOutTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, embedding: &Embedding) -> Result<TaskReport> {
        let report = TaskReport::new(&self.name).with_title(self.title());
        let odd_one_out = embedding.doesnt_match(&self.words)?;

        if odd_one_out != self.goal {
            error!(
                goal = %self.goal,
                found = %odd_one_out,
                "goal was not found to be the odd one out"
            );
            return Ok(report.with_body(format!(
                "The goal '{}' was not found, instead '{odd_one_out}' was found",
                self.goal
            )));
        }

        debug!(goal = %self.goal, "found goal as the odd one out");
        Ok(report
            .with_outcome(true)
            .with_body(format!("The goal '{}' was found", self.goal)))
    }
}
