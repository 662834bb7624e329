//! Clipboard capability
//!
//! The viewer's only system-boundary call. Callers hand the viewer a
//! `&dyn Clipboard`; failures are reported to the caller of the trait but the
//! viewer never propagates them.

use crate::error::ClipboardError;
use parking_lot::Mutex;
use std::io::Write;
use std::process::{Command, Stdio};

/// Something that can receive copied text
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`
    ///
    /// # Errors
    /// Returns `ClipboardError` when the text could not be stored.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// No clipboard; every write fails
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl Clipboard for Unavailable {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

/// In-process clipboard holding the last copied text
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock() = Some(text.to_owned());
        Ok(())
    }
}

/// Clipboard backed by an external command reading stdin (`xclip`, `pbcopy`)
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Build from an argv; `None` if `argv` is empty
    #[must_use]
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Program that receives the text
    #[inline]
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let spawn_err = |source| ClipboardError::Spawn {
            command: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_err)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(spawn_err)?;
        }

        let status = child.wait().map_err(spawn_err)?;
        if !status.success() {
            return Err(ClipboardError::Exit {
                command: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}
