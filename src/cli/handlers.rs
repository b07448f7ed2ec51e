//! Command handlers
//!
//! Each handler returns the process exit code: 0 on success, 1 on a fatal
//! error, 2 when a conversion finished but some pages failed.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::commands::{ConfigArgs, ConvertArgs, ExtractArgs, ScanArgs, WalkArgs};
use super::output::{ExtractOutput, OutputFormat, OutputFormatter, ScanOutput};
use crate::config::{ConfigError, PagecfgConfig};
use crate::convert::{BatchConverter, PageConverter};
use crate::extract::Extractor;
use crate::fs::{FileSystem, RealFileSystem};
use crate::progress::LoggingHandler;
use crate::scan::PageLocator;
use crate::synth::synthesize_config;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FATAL: i32 = 1;
pub const EXIT_PAGES_FAILED: i32 = 2;

pub fn handle_scan(args: &ScanArgs, quiet: bool) -> i32 {
    let result = (|| -> Result<()> {
        let config = load_config(Some(&args.walk))?;
        let locator = open_locator(args.root.as_deref(), &config, args.sorted)?;

        let scan = ScanOutput {
            root: locator.root().to_path_buf(),
            pages: locator.locate(),
        };

        let format: OutputFormat = args.format.into();
        if !(quiet && format == OutputFormat::Human) {
            print!("{}", ensure_newline(OutputFormatter::new(format).format_scan(&scan)?));
        }
        Ok(())
    })();

    exit_code(result)
}

pub fn handle_extract(args: &ExtractArgs, quiet: bool) -> i32 {
    let result = (|| -> Result<()> {
        let file_system = RealFileSystem;
        if !file_system.is_file(&args.file) {
            bail!("Not a page file: {}", args.file.display());
        }
        let source = file_system.read_to_string(&args.file)?;

        let extraction = extractor_for(&args.only).extract(&source);
        debug!(
            path = %args.file.display(),
            entries = extraction.entries.len(),
            issues = extraction.issues.len(),
            "Extraction finished"
        );

        let extract = ExtractOutput {
            path: args.file.clone(),
            config: synthesize_config(extraction.entries),
            issues: extraction.issues,
        };

        let format: OutputFormat = args.format.into();
        if !(quiet && format == OutputFormat::Human) {
            print!(
                "{}",
                ensure_newline(OutputFormatter::new(format).format_extract(&extract)?)
            );
        }
        Ok(())
    })();

    exit_code(result)
}

pub fn handle_convert(args: &ConvertArgs, quiet: bool) -> i32 {
    let result = (|| -> Result<bool> {
        let config = load_config(Some(&args.walk))?;
        let locator = open_locator(args.root.as_deref(), &config, true)?;

        let options = config.convert_options(locator.root(), args.dry_run);
        let converter =
            PageConverter::new(RealFileSystem, options).with_extractor(extractor_for(&args.only));
        let batch = BatchConverter::new(converter).with_progress(Arc::new(LoggingHandler));

        let report = batch.run(&locator);

        let format: OutputFormat = args.format.into();
        let rendered = ensure_newline(OutputFormatter::new(format).format_batch(&report)?);
        match &args.output {
            Some(path) => {
                fs::write(path, rendered)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                info!(path = %path.display(), "Report written");
            }
            None if quiet && format == OutputFormat::Human => {}
            None => print!("{}", rendered),
        }

        Ok(report.has_failures())
    })();

    match result {
        Ok(false) => EXIT_SUCCESS,
        Ok(true) => EXIT_PAGES_FAILED,
        Err(e) => fatal(&e),
    }
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let result = (|| -> Result<()> {
        let config = load_config(None)?;
        let output = OutputFormatter::new(args.format.into()).format_config(&config)?;
        print!("{}", ensure_newline(output));
        Ok(())
    })();

    exit_code(result)
}

/// Environment configuration with command-line overrides applied
fn load_config(walk: Option<&WalkArgs>) -> Result<PagecfgConfig, ConfigError> {
    let mut config = PagecfgConfig::from_env()?;

    if let Some(walk) = walk {
        if let Some(page_file) = &walk.page_file {
            config.page_file = page_file.clone();
        }
        if let Some(max_depth) = walk.max_depth {
            config.max_depth = max_depth;
        }
        for dir in &walk.exclude {
            if !config.excluded_dirs.contains(dir) {
                config.excluded_dirs.push(dir.clone());
            }
        }
        config.validate()?;
    }

    debug!(?config, "Configuration loaded");
    Ok(config)
}

fn open_locator(root: Option<&Path>, config: &PagecfgConfig, sorted: bool) -> Result<PageLocator> {
    let root = root.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let locator = PageLocator::new(root)?.with_config(config.locator_config(sorted));
    Ok(locator)
}

fn extractor_for(only: &[crate::extract::RecognizedName]) -> Extractor {
    if only.is_empty() {
        Extractor::new()
    } else {
        Extractor::with_names(only.iter().copied())
    }
}

fn ensure_newline(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => fatal(&e),
    }
}

fn fatal(e: &anyhow::Error) -> i32 {
    eprintln!("Error: {:#}", e);
    EXIT_FATAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RecognizedName;

    #[test]
    fn test_extractor_for_defaults_to_all_names() {
        assert_eq!(extractor_for(&[]).names(), &RecognizedName::ALL);
        assert_eq!(
            extractor_for(&[RecognizedName::Team]).names(),
            &[RecognizedName::Team]
        );
    }

    #[test]
    fn test_ensure_newline() {
        assert_eq!(ensure_newline("a".to_string()), "a\n");
        assert_eq!(ensure_newline("a\n".to_string()), "a\n");
    }

    #[test]
    fn test_open_locator_rejects_missing_root() {
        let config = PagecfgConfig {
            page_file: "page.js".to_string(),
            excluded_dirs: Vec::new(),
            root_pages: Vec::new(),
            max_depth: 4,
            log_level: "info".to_string(),
            log_json: false,
        };
        assert!(open_locator(Some(Path::new("/nonexistent/catalog")), &config, false).is_err());
    }
}
