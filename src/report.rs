//! Task evaluation reports.

use serde::{Deserialize, Serialize};

/// Indentation of title and body lines in the rendered report.
const INDENT: &str = "    ";

/// The outcome of evaluating one task against an embedding.
///
/// A report starts out failed; tasks mark it passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReport {
    /// Name of the task that produced this report.
    pub name: String,
    /// `true` if the task passed.
    pub outcome: bool,
    /// What was tested.
    pub title: String,
    /// Free-form details.
    pub body: String,
}

impl TaskReport {
    /// Create a failed report with an empty title and body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: false,
            title: String::new(),
            body: String::new(),
        }
    }

    pub fn with_outcome(mut self, outcome: bool) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn passed(&self) -> bool {
        self.outcome
    }

    pub fn outcome_str(&self) -> &'static str {
        if self.outcome {
            "passed"
        } else {
            "failed"
        }
    }
}

impl std::fmt::Display for TaskReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "The Task {} {}:", self.name, self.outcome_str())?;
        for line in self.title.split('\n') {
            writeln!(f, "{INDENT}{line}")?;
        }
        writeln!(f, "Details:")?;
        let mut lines = self.body.split('\n').peekable();
        while let Some(line) = lines.next() {
            write!(f, "{INDENT}{line}")?;
            if lines.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_failed() {
        let report = TaskReport::new("task");
        assert!(!report.outcome);
        assert_eq!(report.title, "");
        assert_eq!(report.body, "");
    }

    #[test]
    fn members_are_accessible() {
        let report = TaskReport::new("name")
            .with_outcome(false)
            .with_title("title")
            .with_body("body");
        assert_eq!(report.name, "name");
        assert!(!report.outcome);
        assert_eq!(report.title, "title");
        assert_eq!(report.body, "body");
    }

    #[test]
    fn renders_failed_report() {
        let report = TaskReport::new("name").with_title("title").with_body("body");
        assert_eq!(
            report.to_string(),
            "The Task name failed:\n    title\nDetails:\n    body"
        );
    }

    #[test]
    fn renders_multiline_passed_report() {
        let report = TaskReport::new("t")
            .with_outcome(true)
            .with_title("first\nsecond")
            .with_body("a\nb");
        assert_eq!(
            report.to_string(),
            "The Task t passed:\n    first\n    second\nDetails:\n    a\n    b"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = TaskReport::new("t").with_outcome(true).with_body("x");
        assert_eq!(report.to_string(), report.clone().to_string());
    }

    #[test]
    fn serializes_to_json() {
        let report = TaskReport::new("t").with_outcome(true);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["name"], "t");
        assert_eq!(json["outcome"], true);
    }
}
