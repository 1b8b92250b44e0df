//! Host capabilities the workflow talks to instead of ambient globals.
//!
//! A browser front end would back these with toasts, `navigator.clipboard`,
//! a confetti burst and the window width; the terminal front end and the
//! tests supply their own.

use std::sync::{Arc, Mutex};

use tracing::{error, info};

use crate::error::ClipboardError;

/// Widths below this are laid out for small screens
pub const COMPACT_BREAKPOINT: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Fired once when every test case of a run passes
pub trait Celebration: Send + Sync {
    fn celebrate(&self);
}

pub trait Viewport: Send + Sync {
    fn width(&self) -> u32;

    fn compact_breakpoint(&self) -> u32 {
        COMPACT_BREAKPOINT
    }

    fn is_compact(&self) -> bool {
        self.width() < self.compact_breakpoint()
    }
}

/// Capabilities handed to a playground
#[derive(Clone)]
pub struct Capabilities {
    pub notifier: Arc<dyn Notifier>,
    pub clipboard: Arc<dyn Clipboard>,
    pub celebration: Arc<dyn Celebration>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            notifier: Arc::new(TracingNotifier),
            clipboard: Arc::new(MemoryClipboard::default()),
            celebration: Arc::new(NoCelebration),
        }
    }
}

/// Routes notices into the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => error!(title = %notice.title, "{}", notice.description),
            _ => info!(title = %notice.title, "{}", notice.description),
        }
    }
}

/// Keeps the last copied text in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|e| ClipboardError(e.to_string()))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn celebrate(&self) {}
}

#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub u32);

impl Viewport for FixedViewport {
    fn width(&self) -> u32 {
        self.0
    }
}
