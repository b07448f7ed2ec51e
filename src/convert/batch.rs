use super::{PageConverter, PageReport, SkipReason};
use crate::fs::FileSystem;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::scan::PageLocator;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// A page that could not be read or written
#[derive(Debug, Clone, Serialize)]
pub struct PageFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub located: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub root: PathBuf,
    pub dry_run: bool,
    /// Reports for converted and skipped pages; failed pages are listed separately
    pub pages: Vec<PageReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<PageFailure>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    pub fn skipped_with(&self, reason: SkipReason) -> usize {
        self.pages
            .iter()
            .filter(|page| page.skip_reason() == Some(reason))
            .count()
    }
}

/// Converts every page of a catalog, one at a time
pub struct BatchConverter<F: FileSystem> {
    converter: PageConverter<F>,
    progress: Arc<dyn ProgressHandler>,
}

impl<F: FileSystem> BatchConverter<F> {
    pub fn new(converter: PageConverter<F>) -> Self {
        Self {
            converter,
            progress: Arc::new(NoOpHandler),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressHandler>) -> Self {
        self.progress = progress;
        self
    }

    pub fn converter(&self) -> &PageConverter<F> {
        &self.converter
    }

    /// Locates pages below the locator's root and converts them in order
    pub fn run(&self, locator: &PageLocator) -> BatchReport {
        let start = Instant::now();
        self.started(locator.root());

        let scan_start = Instant::now();
        let pages = locator.locate();
        self.progress.on_progress(&ProgressEvent::PagesLocated {
            count: pages.len(),
            scan_time: scan_start.elapsed(),
        });

        self.convert_located(locator.root(), &pages, start)
    }

    /// Converts an already located page list
    pub fn convert_all(&self, root: &Path, pages: &[PathBuf]) -> BatchReport {
        let start = Instant::now();
        self.started(root);
        self.progress.on_progress(&ProgressEvent::PagesLocated {
            count: pages.len(),
            scan_time: Duration::ZERO,
        });

        self.convert_located(root, pages, start)
    }

    fn started(&self, root: &Path) {
        let dry_run = self.converter.options().dry_run;
        info!(root = %root.display(), dry_run, "Starting batch conversion");
        self.progress.on_progress(&ProgressEvent::Started {
            root: root.to_path_buf(),
            dry_run,
        });
    }

    fn convert_located(&self, root: &Path, pages: &[PathBuf], start: Instant) -> BatchReport {
        let total = pages.len();
        let mut report = BatchReport {
            root: root.to_path_buf(),
            dry_run: self.converter.options().dry_run,
            pages: Vec::with_capacity(total),
            failures: Vec::new(),
            summary: BatchSummary {
                located: total,
                ..Default::default()
            },
        };

        for (i, path) in pages.iter().enumerate() {
            let index = i + 1;
            match self.converter.convert_page(path) {
                Ok(page) => {
                    match page.skip_reason() {
                        Some(reason) => {
                            report.summary.skipped += 1;
                            self.progress.on_progress(&ProgressEvent::PageSkipped {
                                path: path.clone(),
                                index,
                                total,
                                reason,
                            });
                        }
                        None => {
                            report.summary.converted += 1;
                            self.progress.on_progress(&ProgressEvent::PageConverted {
                                path: path.clone(),
                                index,
                                total,
                                sections: page.keys.len().saturating_sub(1),
                            });
                        }
                    }
                    report.pages.push(page);
                }
                Err(err) => {
                    let error = format!("{:#}", err);
                    warn!(page = %path.display(), error = %error, "Failed to convert page");
                    report.summary.failed += 1;
                    self.progress.on_progress(&ProgressEvent::PageFailed {
                        path: path.clone(),
                        index,
                        total,
                        error: error.clone(),
                    });
                    report.failures.push(PageFailure {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        let summary = report.summary;
        self.progress.on_progress(&ProgressEvent::Completed {
            converted: summary.converted,
            skipped: summary.skipped,
            failed: summary.failed,
            total_time: start.elapsed(),
        });

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConvertOptions, PageState, MARKER};
    use crate::fs::MockFileSystem;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<String>>,
    }

    impl ProgressHandler for RecordingHandler {
        fn on_progress(&self, event: &ProgressEvent) {
            let name = match event {
                ProgressEvent::Started { .. } => "started",
                ProgressEvent::PagesLocated { .. } => "located",
                ProgressEvent::PageConverted { .. } => "converted",
                ProgressEvent::PageSkipped { .. } => "skipped",
                ProgressEvent::PageFailed { .. } => "failed",
                ProgressEvent::Completed { .. } => "completed",
            };
            self.events.lock().unwrap().push(name.to_string());
        }
    }

    fn catalog() -> (MockFileSystem, Vec<PathBuf>) {
        let fs = MockFileSystem::new();
        let root = fs.root().to_path_buf();
        let pages = vec![
            root.join("page.js"),
            root.join("app/shop/page.js"),
            root.join("app/locked/page.js"),
            root.join("app/faq/page.js"),
            root.join("app/team/page.js"),
        ];
        fs.add_file(&pages[0], "const products = [];");
        fs.add_file(&pages[1], "'use client';\nconst products = [{ id: 1 }];\n");
        fs.add_unreadable_file(&pages[2]);
        fs.add_file(&pages[3], &format!("{}\nconst faqs = [];\n", MARKER));
        fs.add_file(&pages[4], "const team = [{ name: 'Ada' }];\n");
        (fs, pages)
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let (fs, pages) = catalog();
        let root = fs.root().to_path_buf();
        let handler = Arc::new(RecordingHandler::default());
        let batch = BatchConverter::new(PageConverter::new(fs, ConvertOptions::new(&root)))
            .with_progress(handler.clone());

        let report = batch.convert_all(&root, &pages);

        assert_eq!(
            report.summary,
            BatchSummary {
                located: 5,
                converted: 2,
                skipped: 2,
                failed: 1,
            }
        );
        assert!(report.has_failures());
        assert_eq!(report.pages.len(), 4);
        assert!(report.pages.iter().all(|p| p.path != pages[2]));
        assert_eq!(report.failures[0].path, pages[2]);
        assert!(report.failures[0].error.contains("Permission denied"));
        assert_eq!(report.skipped_with(SkipReason::RootIndex), 1);
        assert_eq!(report.skipped_with(SkipReason::AlreadyConverted), 1);

        assert_eq!(
            *handler.events.lock().unwrap(),
            vec!["started", "located", "skipped", "converted", "failed", "skipped", "converted", "completed"]
        );

        let written = batch.converter().file_system().written_paths();
        assert_eq!(written, vec![pages[1].clone(), pages[4].clone()]);
    }

    #[test]
    fn test_pages_reported_in_input_order() {
        let (fs, pages) = catalog();
        let root = fs.root().to_path_buf();
        let batch = BatchConverter::new(PageConverter::new(fs, ConvertOptions::new(&root)));

        let report = batch.convert_all(&root, &pages);
        let reported: Vec<&PathBuf> = report.pages.iter().map(|p| &p.path).collect();
        assert_eq!(
            reported,
            vec![&pages[0], &pages[1], &pages[3], &pages[4]]
        );
    }

    #[test]
    fn test_second_run_skips_everything() {
        let (fs, pages) = catalog();
        let root = fs.root().to_path_buf();
        let batch = BatchConverter::new(PageConverter::new(fs, ConvertOptions::new(&root)));

        batch.convert_all(&root, &pages);
        let first_contents: Vec<String> = [&pages[1], &pages[4]]
            .iter()
            .map(|p| batch.converter().file_system().read_to_string(p).unwrap())
            .collect();

        let second = batch.convert_all(&root, &pages);
        assert_eq!(second.summary.converted, 0);
        assert_eq!(second.summary.skipped, 4);
        assert_eq!(second.skipped_with(SkipReason::AlreadyConverted), 3);

        let second_contents: Vec<String> = [&pages[1], &pages[4]]
            .iter()
            .map(|p| batch.converter().file_system().read_to_string(p).unwrap())
            .collect();
        assert_eq!(first_contents, second_contents);
    }

    #[test]
    fn test_dry_run_batch() {
        let (fs, pages) = catalog();
        let root = fs.root().to_path_buf();
        let options = ConvertOptions::new(&root).with_dry_run(true);
        let batch = BatchConverter::new(PageConverter::new(fs, options));

        let report = batch.convert_all(&root, &pages);

        assert!(report.dry_run);
        assert_eq!(report.summary.converted, 2);
        assert!(report
            .pages
            .iter()
            .filter(|p| p.is_converted())
            .all(|p| p.state == PageState::Synthesized));
        assert!(batch.converter().file_system().written_paths().is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let fs = MockFileSystem::new();
        let root = fs.root().to_path_buf();
        let batch = BatchConverter::new(PageConverter::new(fs, ConvertOptions::new(&root)));

        let report = batch.convert_all(&root, &[]);
        assert_eq!(report.summary, BatchSummary::default());
        assert!(!report.has_failures());
    }
}
