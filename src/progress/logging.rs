//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { root, dry_run } => {
                info!(root = %root.display(), dry_run, "Starting conversion");
            }
            ProgressEvent::PagesLocated { count, scan_time } => {
                info!(
                    pages = count,
                    scan_time_ms = scan_time.as_millis(),
                    "Pages located"
                );
            }
            ProgressEvent::PageConverted {
                path,
                index,
                total,
                sections,
            } => {
                info!(
                    page = %path.display(),
                    progress = format!("{}/{}", index, total),
                    sections,
                    "Page converted"
                );
            }
            ProgressEvent::PageSkipped {
                path,
                index,
                total,
                reason,
            } => {
                debug!(
                    page = %path.display(),
                    progress = format!("{}/{}", index, total),
                    reason = %reason,
                    "Page skipped"
                );
            }
            ProgressEvent::PageFailed {
                path,
                index,
                total,
                error,
            } => {
                warn!(
                    page = %path.display(),
                    progress = format!("{}/{}", index, total),
                    error = %error,
                    "Page failed"
                );
            }
            ProgressEvent::Completed {
                converted,
                skipped,
                failed,
                total_time,
            } => {
                if *failed > 0 {
                    warn!(
                        converted,
                        skipped,
                        failed,
                        total_time_ms = total_time.as_millis(),
                        "Conversion complete with failures"
                    );
                } else {
                    info!(
                        converted,
                        skipped,
                        total_time_ms = total_time.as_millis(),
                        "Conversion complete"
                    );
                }
            }
        }
    }
}
