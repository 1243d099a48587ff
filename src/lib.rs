//! Word embedding evaluation: load word2vec vectors and run pluggable evaluation tasks.
//!
//! embedeval parses a word-vector file into an immutable [`embedding::Embedding`],
//! resolves the requested tasks from a [`registry::TaskRegistry`], and runs them
//! through an [`pipeline::EvaluationPipeline`] that turns every task into a
//! [`report::TaskReport`]. A failing task never prevents the others from running.
//!
//! | Format | Header | Records |
//! |--------|--------|---------|
//! | **text** | `<word_count> <dim>` | `word v1 ... vdim`, one per line |
//! | **binary** | `<word_count> <dim>` | `word ` + `dim` little-endian `f32` |
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use embedeval::embedding::{load_embedding, Format};
//! use embedeval::pipeline::EvaluationPipeline;
//! use embedeval::registry::TaskRegistry;
//! use embedeval::task::register_builtin_tasks;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut registry = TaskRegistry::new();
//! register_builtin_tasks(&mut registry)?;
//! registry.discover(&["./tasks"])?;
//!
//! let embedding = Arc::new(load_embedding("vectors.txt", Format::Text)?);
//! let tasks = registry.create_all(&["en-got-odd-one-out"])?;
//! for report in EvaluationPipeline::new().run(embedding, tasks).await {
//!     println!("{report}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`embedding`]: Embedding store, text/binary parsers and writers, similarity queries
//! - [`error`]: Parse, registration, lookup, and task execution errors
//! - [`pipeline`]: Sequential, failure-isolating task execution
//! - [`registry`]: Task registration, plugin discovery, and instantiation
//! - [`report`]: Task reports and their text rendering
//! - [`task`]: The `Task` trait and built-in tasks

pub mod config;
pub mod embedding;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod task;
