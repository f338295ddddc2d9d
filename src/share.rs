use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clipboard::{ClipboardContext, ClipboardProvider};
use tracing::{info, warn};

/// Where a share landed, so the caller can word its confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareReceipt {
    Clipboard,
    SavedTo(PathBuf),
}

pub trait ShareSink {
    fn name(&self) -> &'static str;
    fn share(&mut self, text: &str) -> Result<ShareReceipt>;
}

/// System clipboard through the platform provider.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ShareSink for SystemClipboard {
    fn name(&self) -> &'static str {
        "system clipboard"
    }

    fn share(&mut self, text: &str) -> Result<ShareReceipt> {
        let mut ctx: ClipboardContext =
            ClipboardProvider::new().map_err(|err| anyhow!("clipboard unavailable: {err}"))?;
        ctx.set_contents(text.to_string())
            .map_err(|err| anyhow!("clipboard write failed: {err}"))?;
        Ok(ShareReceipt::Clipboard)
    }
}

/// OSC 52 escape: asks the terminal emulator itself to set the clipboard.
pub struct TerminalClipboard<W: Write> {
    out: W,
}

impl<W: Write> TerminalClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ShareSink for TerminalClipboard<W> {
    fn name(&self) -> &'static str {
        "terminal clipboard"
    }

    fn share(&mut self, text: &str) -> Result<ShareReceipt> {
        let payload = STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{payload}\x07").context("write osc52 sequence")?;
        self.out.flush().context("flush osc52 sequence")?;
        Ok(ShareReceipt::Clipboard)
    }
}

/// Last resort: drop the text in a file the user can copy from by hand.
#[derive(Debug, Clone)]
pub struct ShareFile {
    path: PathBuf,
}

impl ShareFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ShareSink for ShareFile {
    fn name(&self) -> &'static str {
        "share file"
    }

    fn share(&mut self, text: &str) -> Result<ShareReceipt> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context("create share dir")?;
        }
        fs::write(&self.path, text)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(ShareReceipt::SavedTo(self.path.clone()))
    }
}

/// Tries each sink in order; the first success wins.
pub fn share_with_fallback(sinks: &mut [Box<dyn ShareSink>], text: &str) -> Result<ShareReceipt> {
    let mut last_err = None;
    for sink in sinks.iter_mut() {
        match sink.share(text) {
            Ok(receipt) => {
                info!(sink = sink.name(), "shared result");
                return Ok(receipt);
            }
            Err(err) => {
                warn!(sink = sink.name(), error = %err, "share sink failed");
                last_err = Some(err);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| anyhow!("no share sinks configured")))
}
