//! CLI `inspect` command: display the shape and first words of an embedding.

use anyhow::Result;
use std::path::Path;

use embedeval::config::EvalConfig;
use embedeval::embedding::Format;

/// Load an embedding and print a short summary.
pub fn inspect(config: &EvalConfig, path: &Path, format: Option<Format>, limit: usize) -> Result<()> {
    let format = super::resolve_format(config, path, format);
    let embedding = super::load_with_progress(path, format)?;
    let (word_count, dim) = embedding.shape();

    println!("Embedding: {}", embedding.path().display());
    println!("{}", "=".repeat(50));
    println!("  Format:         {format}");
    println!("  Words:          {word_count}");
    println!("  Dimensions:     {dim}");

    if !embedding.is_empty() {
        println!();
        println!("First words:");
        for word in embedding.words().iter().take(limit) {
            let vector = embedding.vector(word)?;
            let preview: Vec<String> = vector.iter().take(4).map(|v| format!("{v:.4}")).collect();
            let ellipsis = if dim > 4 { " ..." } else { "" };
            println!("  {word:<20} [{}{ellipsis}]", preview.join(", "));
        }
    }

    Ok(())
}
