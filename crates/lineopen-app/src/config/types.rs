//! Configuration types

use serde::Deserialize;
use std::path::PathBuf;

/// Settings from `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub editor: EditorSettings,
}

/// Where relative source paths are resolved from
#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    /// Workspace root. When set, a relative `base_dir` is taken relative to it.
    #[serde(default)]
    pub workspace: Option<PathBuf>,

    /// Directory the `../../` paths in log lines are relative to
    /// (the build output directory of the logging binary).
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            workspace: None,
            base_dir: default_base_dir(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

impl PathSettings {
    /// The effective base directory (may still be relative to the working directory).
    pub fn effective_base_dir(&self) -> PathBuf {
        match &self.workspace {
            Some(workspace) => workspace.join(&self.base_dir),
            None => self.base_dir.clone(),
        }
    }
}

/// Editor settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorSettings {
    /// Name of a known editor (e.g., "source-insight", "notepad++", "vim").
    #[serde(default)]
    pub preset: Option<String>,

    /// Command template, overrides `preset`.
    /// Variables: {source}, {line}
    /// Example: `vim +{line} "{source}"`
    #[serde(default)]
    pub command: Option<String>,
}
