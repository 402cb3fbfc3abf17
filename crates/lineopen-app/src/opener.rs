//! Opening log line source references in the editor.

use std::path::PathBuf;

use lineopen_core::prelude::*;

use crate::config::Settings;
use crate::editor::{resolve_source_path, CommandTemplate, EditorCommand, EditorError};
use crate::process::{DetachedLauncher, Launcher};
use crate::reference::find_source_reference;

// ─────────────────────────────────────────────────────────────────────────────
// OpenerConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable configuration for a [`LineOpener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenerConfig {
    /// Directory the relative source paths are resolved against
    pub base_dir: PathBuf,
    /// Editor command template
    pub template: CommandTemplate,
}

impl OpenerConfig {
    pub fn new(base_dir: impl Into<PathBuf>, template: CommandTemplate) -> Self {
        Self {
            base_dir: base_dir.into(),
            template,
        }
    }

    /// Build the configuration from loaded settings, resolving the editor
    /// template from the environment when none is configured.
    pub fn from_settings(settings: &Settings) -> std::result::Result<Self, EditorError> {
        let template = CommandTemplate::parse(&settings.editor.resolve()?)?;
        Ok(Self::new(settings.paths.effective_base_dir(), template))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LineOpener
// ─────────────────────────────────────────────────────────────────────────────

/// Opens the source location referenced by a log line.
#[derive(Debug)]
pub struct LineOpener<L = DetachedLauncher> {
    config: OpenerConfig,
    launcher: L,
}

impl<L: Launcher> LineOpener<L> {
    pub fn new(config: OpenerConfig, launcher: L) -> Self {
        Self { config, launcher }
    }

    /// Open the first source reference in `line` in the editor.
    ///
    /// Lines without a reference are ignored: nothing is logged or launched
    /// and `Ok(None)` is returned. On a match the input line and the command
    /// are logged, then the editor is started without waiting for it.
    ///
    /// # Returns
    ///
    /// `Ok(Some(command))` with the launched command, `Ok(None)` when the
    /// line holds no reference, `Err(EditorError)` if the launch failed.
    pub fn open_line_from_log_entry(
        &self,
        line: &str,
    ) -> std::result::Result<Option<EditorCommand>, EditorError> {
        let Some(reference) = find_source_reference(line) else {
            return Ok(None);
        };

        info!("[open] line: '{}'", line);

        let source = resolve_source_path(&self.config.base_dir, &reference.path)?;
        let command = self.config.template.render(&source, &reference.line);

        info!("[exec] {}", command);

        let pid = self.launcher.launch(&command)?;
        debug!("Editor started with pid {}", pid);

        Ok(Some(command))
    }
}
