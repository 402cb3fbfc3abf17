//! Editor process launching.
//!
//! The editor is started as a detached child: stdio is disconnected, the
//! child is never waited on, and it keeps running after this process exits.

use std::process::{Command, Stdio};

use crate::editor::{EditorCommand, EditorError};

/// Starts editor processes.
#[cfg_attr(test, mockall::automock)]
pub trait Launcher {
    /// Start `command` without waiting for it. Returns the child's process id.
    fn launch(&self, command: &EditorCommand) -> Result<u32, EditorError>;
}

/// Launches the editor as a detached OS process.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLauncher;

impl Launcher for DetachedLauncher {
    fn launch(&self, command: &EditorCommand) -> Result<u32, EditorError> {
        let mut process = Command::new(&command.program);
        process
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut process);

        // Dropping the Child neither waits for nor kills the editor.
        let child = process.spawn().map_err(|source| EditorError::LaunchFailed {
            program: command.program.clone(),
            source,
        })?;

        Ok(child.id())
    }
}

#[cfg(unix)]
fn detach(process: &mut Command) {
    use std::os::unix::process::CommandExt;

    // Own process group, so signals aimed at the log viewer's group skip the editor.
    process.process_group(0);
}

#[cfg(windows)]
fn detach(process: &mut Command) {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    process.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_process: &mut Command) {}
