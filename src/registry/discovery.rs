//! Plugin discovery: register every task declared by the `*.toml` manifests
//! found below a set of directories.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use super::TaskRegistry;
use crate::error::RegistrationError;
use crate::task::definition::PluginManifest;

/// File extension of plugin manifests.
const MANIFEST_EXTENSION: &str = "toml";

impl TaskRegistry {
    /// Load every plugin manifest found recursively under `locations`.
    ///
    /// All locations must exist. Manifests are loaded in sorted traversal
    /// order and the first one that fails aborts the discovery, so a broken
    /// plugin never results in a silently reduced task set. Returns the paths
    /// of all loaded manifests.
    pub fn discover<P: AsRef<Path>>(
        &mut self,
        locations: &[P],
    ) -> Result<Vec<PathBuf>, RegistrationError> {
        for location in locations {
            let location = location.as_ref();
            if !location.exists() {
                return Err(RegistrationError::LocationNotFound {
                    path: location.to_path_buf(),
                });
            }
        }

        let mut loaded = Vec::new();
        for location in locations {
            let location = location.as_ref();
            debug!(location = %location.display(), "discovering task plugins");

            for entry in WalkDir::new(location).sort_by_file_name() {
                let entry = entry.map_err(|e| RegistrationError::PluginLoad {
                    module: module_name(e.path().unwrap_or(location)),
                    path: e.path().unwrap_or(location).to_path_buf(),
                    reason: e.to_string(),
                })?;

                let path = entry.path();
                let is_manifest = path
                    .extension()
                    .is_some_and(|ext| ext == MANIFEST_EXTENSION);
                if !entry.file_type().is_file() || !is_manifest {
                    continue;
                }

                self.load_module(path)?;
                loaded.push(path.to_path_buf());
            }
        }

        info!(modules = loaded.len(), tasks = self.len(), "task plugins discovered");
        Ok(loaded)
    }

    /// Register all tasks of the manifest at `path`. Returns how many were newly added.
    ///
    /// The manifest is validated as a whole before any of its tasks is registered.
    pub fn load_module(&mut self, path: &Path) -> Result<usize, RegistrationError> {
        let fail = |reason: String| RegistrationError::PluginLoad {
            module: module_name(path),
            path: path.to_path_buf(),
            reason,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
        let manifest: PluginManifest =
            toml::from_str(&contents).map_err(|e| fail(e.to_string()))?;

        if let Some(position) = manifest
            .tasks
            .iter()
            .position(|task| task.name().trim().is_empty())
        {
            return Err(fail(format!(
                "task #{} {}",
                position + 1,
                RegistrationError::MissingName
            )));
        }

        let mut added = 0;
        for task in manifest.tasks {
            let name = task.name().to_string();
            if self
                .register(&name, task.into_factory())
                .map_err(|e| fail(e.to_string()))?
            {
                added += 1;
            }
        }

        debug!(module = %path.display(), added, "loaded task plugin");
        Ok(added)
    }
}

fn module_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
