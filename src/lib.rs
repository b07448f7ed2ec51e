//! pagecfg - lift hard-coded content out of catalog pages
//!
//! A catalog is a tree of `page.js` files, each declaring its content as
//! literal arrays and objects (`const products = [...]`, `const faqs = [...]`).
//! pagecfg finds those declarations, parses them without evaluating any code,
//! and inserts a `pageConfig` object holding the content plus default styling
//! tokens at the top of each page.
//!
//! # Example
//!
//! ```
//! use pagecfg::{extract_literals, synthesize_config, RecognizedName};
//!
//! let entries = extract_literals(r#"const faqs = [{question:"Q1",answer:"A1"}];"#);
//! let config = synthesize_config(entries);
//!
//! assert_eq!(config.keys(), vec!["colors", "faqs"]);
//! assert!(config.section(RecognizedName::Faqs).is_some());
//! ```
//!
//! # Project Structure
//!
//! - [`scan`]: page discovery
//! - [`literal`]: restricted literal parser
//! - [`extract`]: declaration matching and extraction
//! - [`synth`]: page config synthesis
//! - [`convert`]: page rewriting and batch conversion

pub mod cli;
pub mod config;
pub mod convert;
pub mod extract;
pub mod fs;
pub mod literal;
pub mod progress;
pub mod scan;
pub mod synth;
pub mod util;

pub use config::{ConfigError, PagecfgConfig};
pub use convert::{
    convert_page, convert_source, BatchConverter, BatchReport, ConvertOptions, PageConverter,
    PageReport, PageStatus, SkipReason,
};
pub use extract::{extract_literals, ExtractedEntries, Extractor, RecognizedName};
pub use literal::{parse_literal, LiteralError};
pub use scan::{locate_pages, LocatorConfig, PageLocator, ScanError};
pub use synth::{synthesize_config, ColorTokens, PageConfig};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
