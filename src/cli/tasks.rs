use anyhow::Result;
use std::path::PathBuf;

use embedeval::config::EvalConfig;

/// Print the names of all registered tasks.
pub fn list_tasks(config: &EvalConfig, task_paths: &[PathBuf]) -> Result<()> {
    let registry = super::build_registry(config, task_paths)?;

    println!("Available Tasks");
    println!("{}", "=".repeat(40));
    for name in registry.list_names() {
        println!("  {name}");
    }

    Ok(())
}
