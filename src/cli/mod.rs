pub mod evaluate;
pub mod inspect;
pub mod tasks;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use embedeval::config::EvalConfig;
use embedeval::embedding::{self, Embedding, Format};
use embedeval::registry::TaskRegistry;
use embedeval::task::register_builtin_tasks;

/// Build the task registry: built-in tasks first, then configured plugin
/// directories, then the ones given on the command line.
pub fn build_registry(config: &EvalConfig, extra_paths: &[PathBuf]) -> Result<TaskRegistry> {
    let mut registry = TaskRegistry::new();
    register_builtin_tasks(&mut registry).context("failed to register built-in tasks")?;

    let mut locations = config.resolved_plugin_dirs();
    locations.extend(extra_paths.iter().cloned());
    if !locations.is_empty() {
        registry
            .discover(&locations)
            .context("failed to discover task plugins")?;
    }

    Ok(registry)
}

/// Format from the flag, or from a `.bin`/`.txt` extension, or from config.
pub fn resolve_format(config: &EvalConfig, path: &Path, flag: Option<Format>) -> Format {
    flag.or_else(|| Format::from_extension(path))
        .unwrap_or(config.embedding.default_format)
}

/// Load an embedding while showing a spinner on stderr.
pub fn load_with_progress(path: &Path, format: Format) -> Result<Embedding> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg} ({elapsed})")
            .expect("valid template"),
    );
    pb.set_message(format!("Loading {} embedding {}", format, path.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = embedding::load_embedding(path, format);
    pb.finish_and_clear();

    Ok(result?)
}
