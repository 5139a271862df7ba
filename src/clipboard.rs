//! Copying generated passwords to the clipboard.
//!
//! The system clipboard is tried first. When it cannot be reached, for
//! example over SSH or on a headless session, the text is handed to the
//! terminal through an OSC 52 escape sequence instead.

use std::io::Write;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{debug, error, warn};

use crate::error::{Error, Result};

/// Name reported by [`SystemClipboard`].
pub const SYSTEM_BACKEND: &str = "system";

pub trait ClipboardBackend {
    fn name(&self) -> &'static str;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Native clipboard through `arboard`.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| Error::Clipboard(format!("clipboard init: {e}")))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| Error::Clipboard("clipboard unavailable".to_string()))
    }

    /// Keeps `text` available after the process stops serving it.
    ///
    /// On Linux the selection belongs to the process that set it and is
    /// lost when that process exits, so this blocks until another client
    /// takes ownership or `deadline` passes. Other platforms hand the
    /// contents to the OS and return immediately.
    #[cfg(target_os = "linux")]
    pub fn hold(&mut self, text: &str, deadline: Option<Instant>) -> Result<()> {
        use arboard::SetExtLinux;

        let set = self.handle()?.set();
        let set = match deadline {
            Some(deadline) => set.wait_until(deadline),
            None => set.wait(),
        };
        set.text(text.to_owned())
            .map_err(|e| Error::Clipboard(format!("clipboard hold: {e}")))
    }

    #[cfg(not(target_os = "linux"))]
    pub fn hold(&mut self, _text: &str, _deadline: Option<Instant>) -> Result<()> {
        Ok(())
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        SYSTEM_BACKEND
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.handle()?
            .set_text(text.to_owned())
            .map_err(|e| Error::Clipboard(format!("clipboard set: {e}")))
    }
}

/// Terminal clipboard via the OSC 52 escape sequence.
pub struct Osc52<W> {
    out: W,
}

impl<W: Write> Osc52<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardBackend for Osc52<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Copies `text` with `primary`, falling back to `fallback` when it fails.
/// Returns the name of the backend that took the text.
pub fn copy_with_fallback(
    primary: &mut dyn ClipboardBackend,
    fallback: &mut dyn ClipboardBackend,
    text: &str,
) -> Result<&'static str> {
    match primary.set_text(text) {
        Ok(()) => return Ok(primary.name()),
        Err(e) => warn!(backend = primary.name(), error = %e, "copy failed, trying fallback"),
    }

    match fallback.set_text(text) {
        Ok(()) => Ok(fallback.name()),
        Err(e) => {
            error!(backend = fallback.name(), error = %e, "fallback copy failed");
            Err(Error::Clipboard(format!(
                "{} and {} backends both failed",
                primary.name(),
                fallback.name()
            )))
        }
    }
}

/// Empties the system clipboard after `delay` if it still holds `text`.
///
/// Nothing is done when the user has copied something else in the meantime.
pub fn clear_after(text: String, delay: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(delay);

        let mut clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                warn!(error = %e, "could not open clipboard to clear it");
                return;
            }
        };
        if clipboard.get_text().ok().as_deref() == Some(text.as_str()) {
            match clipboard.clear() {
                Ok(()) => debug!("clipboard cleared"),
                Err(e) => warn!(error = %e, "could not clear clipboard"),
            }
        }
    })
}
