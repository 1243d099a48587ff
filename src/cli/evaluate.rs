//! CLI `evaluate` command: load an embedding and run tasks against it.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use embedeval::config::EvalConfig;
use embedeval::pipeline::EvaluationPipeline;
use embedeval::report::TaskReport;

/// Everything the `evaluate` command was asked to do.
pub struct EvaluateRequest {
    pub path: PathBuf,
    pub format: Option<embedeval::embedding::Format>,
    pub tasks: Vec<String>,
    pub task_paths: Vec<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub json: bool,
}

/// Run the requested tasks and print their reports in request order.
///
/// Unknown task names and load failures abort before any task runs.
pub async fn evaluate(config: &EvalConfig, request: EvaluateRequest) -> Result<Vec<TaskReport>> {
    let registry = super::build_registry(config, &request.task_paths)?;

    let names: Vec<String> = if request.tasks.is_empty() {
        registry.list_names().into_iter().collect()
    } else {
        request.tasks
    };
    let tasks = registry.create_all(&names)?;

    let format = super::resolve_format(config, &request.path, request.format);
    let path = request.path.clone();
    let embedding = tokio::task::spawn_blocking(move || super::load_with_progress(&path, format))
        .await
        .context("embedding loader task failed")??;

    let timeout = match request.timeout_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.task_timeout(),
    };
    let pipeline = EvaluationPipeline::new().with_task_timeout(timeout);
    let reports = pipeline.run(Arc::new(embedding), tasks).await;

    if request.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{report}");
            println!();
        }
        let passed = reports.iter().filter(|r| r.passed()).count();
        println!("{passed} of {} tasks passed", reports.len());
    }

    Ok(reports)
}
