//! # lineopen-app - Line Opener Application Logic
//!
//! Finds the source location embedded in a log line and opens it in an
//! external editor.
//!
//! ## Public API
//!
//! ### Matching (`reference`)
//! - [`find_source_reference()`] - Extract `../../path:line` from a log line
//! - [`SourceReference`] - Relative path and line number text
//!
//! ### Editor Commands (`editor`)
//! - [`CommandTemplate`] - Parsed `{source}` / `{line}` command template
//! - [`EditorCommand`] - Rendered program, arguments and display string
//! - [`resolve_source_path()`] - Relative path -> absolute normalized path
//!
//! ### Launching (`process`)
//! - [`Launcher`] - Process launch seam
//! - [`DetachedLauncher`] - Fire-and-forget OS process launcher
//!
//! ### Opening (`opener`)
//! - [`LineOpener`] - `open_line_from_log_entry` over an injected config and launcher
//! - [`OpenerConfig`] - Base directory and command template
//!
//! ### Configuration (`config`)
//! - [`config::Settings`] - `config.toml` contents
//! - [`config::load_settings()`] - Load settings, falling back to defaults

pub mod config;
pub mod editor;
pub mod opener;
pub mod process;
pub mod reference;

#[cfg(test)]
mod test_utils;

pub use editor::{resolve_source_path, CommandTemplate, EditorCommand, EditorError};
pub use opener::{LineOpener, OpenerConfig};
pub use process::{DetachedLauncher, Launcher};
pub use reference::{find_source_reference, SourceReference};
