//! Progress handler trait and events

use std::path::PathBuf;
use std::time::Duration;

use crate::convert::SkipReason;

/// Events emitted while converting a catalog
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Batch conversion started
    Started { root: PathBuf, dry_run: bool },

    /// Page scan completed
    PagesLocated { count: usize, scan_time: Duration },

    /// A page was rewritten (or would be, in a dry run)
    PageConverted {
        path: PathBuf,
        index: usize,
        total: usize,
        sections: usize,
    },

    /// A page was left untouched
    PageSkipped {
        path: PathBuf,
        index: usize,
        total: usize,
        reason: SkipReason,
    },

    /// A page could not be read or written
    PageFailed {
        path: PathBuf,
        index: usize,
        total: usize,
        error: String,
    },

    /// Batch conversion finished
    Completed {
        converted: usize,
        skipped: usize,
        failed: usize,
        total_time: Duration,
    },
}

/// Trait for handling progress events during conversion
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
