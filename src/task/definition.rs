//! Declarative task definitions, as found in plugin manifests.
//!
//! ```toml
//! [[task]]
//! kind = "odd-one-out"
//! name = "en-fruit-odd-one-out"
//! words = ["apple", "pear", "plum", "hammer"]
//! goal = "hammer"
//!
//! [[task]]
//! kind = "word-analogy"
//! name = "en-capitals"
//! positive = ["Paris", "Germany"]
//! negative = ["France"]
//! goal = "Berlin"
//! topn = 5
//! ```

use std::sync::Arc;

use serde::Deserialize;

use super::word_analogy::DEFAULT_TOPN;
use super::{OddOneOutTask, Task, TaskFactory, WordAnalogyTask};

/// A single `[[task]]` entry of a plugin manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TaskDefinition {
    OddOneOut {
        #[serde(default)]
        name: String,
        words: Vec<String>,
        goal: String,
    },
    WordAnalogy {
        #[serde(default)]
        name: String,
        positive: Vec<String>,
        #[serde(default)]
        negative: Vec<String>,
        goal: String,
        #[serde(default = "default_topn")]
        topn: usize,
    },
}

fn default_topn() -> usize {
    DEFAULT_TOPN
}

/// Top-level layout of a plugin manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginManifest {
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskDefinition>,
}

impl TaskDefinition {
    /// Name the task is registered under. May be empty, which the registry rejects.
    pub fn name(&self) -> &str {
        match self {
            Self::OddOneOut { name, .. } | Self::WordAnalogy { name, .. } => name,
        }
    }

    /// Build a fresh task from this definition.
    pub fn build(&self) -> Box<dyn Task> {
        match self.clone() {
            Self::OddOneOut { name, words, goal } => {
                Box::new(OddOneOutTask::new(name, words, goal)) as Box<dyn Task>
            }
            Self::WordAnalogy {
                name,
                positive,
                negative,
                goal,
                topn,
            } => Box::new(WordAnalogyTask::new(name, positive, negative, goal, topn)),
        }
    }

    /// Factory producing a new task from this definition on every call.
    pub fn into_factory(self) -> TaskFactory {
        Arc::new(move || self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_with_both_kinds() {
        let manifest: PluginManifest = toml::from_str(
            r#"
[[task]]
kind = "odd-one-out"
name = "fruit"
words = ["apple", "pear", "hammer"]
goal = "hammer"

[[task]]
kind = "word-analogy"
name = "capitals"
positive = ["Paris", "Germany"]
negative = ["France"]
goal = "Berlin"
"#,
        )
        .unwrap();

        assert_eq!(manifest.tasks.len(), 2);
        assert_eq!(manifest.tasks[0].name(), "fruit");
        match &manifest.tasks[1] {
            TaskDefinition::WordAnalogy { topn, .. } => assert_eq!(*topn, DEFAULT_TOPN),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_name_defaults_to_empty() {
        let manifest: PluginManifest = toml::from_str(
            r#"
[[task]]
kind = "odd-one-out"
words = ["a"]
goal = "a"
"#,
        )
        .unwrap();
        assert_eq!(manifest.tasks[0].name(), "");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<PluginManifest, _> = toml::from_str(
            r#"
[[task]]
kind = "sentiment"
name = "x"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn factory_builds_fresh_tasks() {
        let definition = TaskDefinition::OddOneOut {
            name: "fruit".into(),
            words: vec!["a".into()],
            goal: "a".into(),
        };
        let factory = definition.into_factory();
        assert_eq!(factory().name(), "fruit");
        assert_eq!(factory().name(), "fruit");
    }
}
