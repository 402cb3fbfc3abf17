//! Editor command construction for opening files at specific lines.
//!
//! This module turns a relative source reference into an absolute path and
//! renders the configured command template into the command that opens it.

use regex::{Captures, Regex};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Placeholder replaced with the absolute source path.
pub const SOURCE_PLACEHOLDER: &str = "{source}";

/// Placeholder replaced with the line number text.
pub const LINE_PLACEHOLDER: &str = "{line}";

/// Matches either placeholder, so both are substituted in one pass.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(source|line)\}").expect("placeholder regex is valid")
});

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur when opening a file in an editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// No command template configured or detected
    #[error("No editor configured or detected")]
    NoEditor,

    /// Configured preset does not name a known editor
    #[error("Unknown editor preset: {0}")]
    UnknownPreset(String),

    /// Command template contains no program
    #[error("Editor command template is empty")]
    EmptyTemplate,

    /// Command template has an opening quote without a closing one
    #[error("Unterminated quote in editor command template: {0}")]
    UnterminatedQuote(String),

    /// Command template never receives the file path
    #[error("Editor command template has no {{source}} placeholder: {0}")]
    MissingSourcePlaceholder(String),

    /// Current directory needed to absolutize a relative base directory
    #[error("Could not determine working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    /// Failed to start the editor process
    #[error("Failed to execute editor '{program}': {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve a relative source path against the base directory.
///
/// The result is absolute and lexically normalized (`.` dropped, `..` pops a
/// component). The file is not required to exist.
///
/// # Examples
///
/// - base `/ws/fw/bin/dummy` + `../../src/foo.c` -> `/ws/fw/src/foo.c`
/// - base `build/out` + `../../src/foo.c` -> `<cwd>/src/foo.c`
pub fn resolve_source_path(base_dir: &Path, relative: &str) -> Result<PathBuf, EditorError> {
    let joined = base_dir.join(relative);
    let absolute = if joined.is_absolute() {
        joined
    } else {
        std::env::current_dir()
            .map_err(EditorError::WorkingDirectory)?
            .join(joined)
    };
    let normalized = normalize_path(&absolute);
    Ok(dunce::simplified(&normalized).to_path_buf())
}

/// Normalize a path without touching the filesystem.
///
/// `..` at the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

// ─────────────────────────────────────────────────────────────────────────────
// Command Templates
// ─────────────────────────────────────────────────────────────────────────────

/// A parsed editor command template.
///
/// The template text is kept for rendering the human-readable command; the
/// tokens are what actually gets executed, so quoting in the template decides
/// argument boundaries and no shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    text: String,
    tokens: Vec<String>,
}

impl CommandTemplate {
    /// Parse a template such as `vim +{line} "{source}"`.
    pub fn parse(text: &str) -> Result<Self, EditorError> {
        let tokens = split_command_line(text)?;
        if tokens.is_empty() {
            return Err(EditorError::EmptyTemplate);
        }

        if !text.contains(SOURCE_PLACEHOLDER) {
            return Err(EditorError::MissingSourcePlaceholder(text.to_string()));
        }

        if !text.contains(LINE_PLACEHOLDER) {
            tracing::warn!(
                "Editor command template has no {} placeholder, files will open at the top: {}",
                LINE_PLACEHOLDER,
                text
            );
        }

        Ok(Self {
            text: text.to_string(),
            tokens,
        })
    }

    /// The template as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Substitute the source path and line number.
    pub fn render(&self, source: &Path, line: &str) -> EditorCommand {
        let source = source.display().to_string();
        // Substituted text is never rescanned, so a `{line}` inside the path stays literal.
        let substitute = |s: &str| {
            PLACEHOLDER_REGEX
                .replace_all(s, |caps: &Captures| match &caps[1] {
                    "source" => source.clone(),
                    _ => line.to_string(),
                })
                .into_owned()
        };

        let mut argv = self.tokens.iter().map(|token| substitute(token));
        // parse() guarantees at least one token
        let program = argv.next().unwrap_or_default();

        EditorCommand {
            program,
            args: argv.collect(),
            command_line: substitute(&self.text),
        }
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Split a command line into tokens.
///
/// Whitespace separates tokens. Double or single quotes group characters
/// (including whitespace) into one token and are removed. Backslashes are
/// literal so Windows paths survive unchanged.
fn split_command_line(text: &str) -> Result<Vec<String>, EditorError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in text.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(EditorError::UnterminatedQuote(text.to_string()));
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

// ─────────────────────────────────────────────────────────────────────────────
// EditorCommand
// ─────────────────────────────────────────────────────────────────────────────

/// A fully rendered editor invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    /// Executable to start
    pub program: String,
    /// Arguments passed to the executable
    pub args: Vec<String>,
    /// The template with placeholders substituted, for logging
    pub command_line: String,
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
