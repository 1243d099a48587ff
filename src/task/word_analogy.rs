//! Word analogy task: `a` is to `b` as `???` is to `c`.

use anyhow::Result;
use tracing::{debug, error};

use super::Task;
use crate::embedding::Embedding;
use crate::report::TaskReport;

/// Name of the built-in Game of Thrones analogy task.
pub const GOT_TASK_NAME: &str = "en-got-word-analogy";

/// Number of candidates the goal has to appear in.
pub const DEFAULT_TOPN: usize = 10;

/// Passes if `goal` is among the `topn` answers of the 3CosMul analogy query.
#[derive(Debug, Clone)]
pub struct WordAnalogyTask {
    name: String,
    positive: Vec<String>,
    negative: Vec<String>,
    goal: String,
    topn: usize,
}

impl WordAnalogyTask {
    pub fn new(
        name: impl Into<String>,
        positive: Vec<String>,
        negative: Vec<String>,
        goal: impl Into<String>,
        topn: usize,
    ) -> Self {
        Self {
            name: name.into(),
            positive,
            negative,
            goal: goal.into(),
            topn,
        }
    }

    /// Stark is related to Eddard as Lannister is related to Jaime.
    pub fn got() -> Self {
        Self::new(
            GOT_TASK_NAME,
            vec!["Stark".into(), "Jaime".into()],
            vec!["Eddard".into()],
            "Lannister",
            DEFAULT_TOPN,
        )
    }

    fn title(&self) -> String {
        match (self.positive.as_slice(), self.negative.as_slice()) {
            ([first, .., last], [relation]) => {
                format!("{first} is related to {relation}, as ??? is related to {last}")
            }
            (positive, negative) => format!(
                "Which word is most similar to [{}] and least similar to [{}]?",
                positive.join(", "),
                negative.join(", ")
            ),
        }
    }
}

impl Task for WordAnalogyTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, embedding: &Embedding) -> Result<TaskReport> {
        let report = TaskReport::new(&self.name).with_title(self.title());
        let analogies = embedding.most_similar_cosmul(&self.positive, &self.negative, self.topn)?;

        let Some((_, similarity)) = analogies.iter().find(|(word, _)| *word == self.goal) else {
            error!(goal = %self.goal, "goal not found in most similar word analogies");
            let results = analogies
                .iter()
                .map(|(word, score)| format!("    {word}: {score:.2}"))
                .collect::<Vec<_>>()
                .join("\n");
            return Ok(report.with_body(format!(
                "The goal of '{}' was not found.\nThe following results were returned:\n{results}",
                self.goal
            )));
        };

        debug!(goal = %self.goal, similarity, "found goal in word analogies");
        Ok(report.with_outcome(true).with_body(format!(
            "The goal of '{}' was found with a similarity of {similarity:.2}.",
            self.goal
        )))
    }
}
