use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::extract::RecognizedName;

/// Extract editable content from catalog pages into a page config
#[derive(Parser, Debug)]
#[command(
    name = "pagecfg",
    about = "Extract editable content from catalog pages into a page config",
    version,
    author,
    long_about = "pagecfg walks a catalog of page.js files, lifts the hard-coded content \
                  literals (products, faqs, team, ...) out of each page and inserts them \
                  as a `pageConfig` object together with default styling tokens. \
                  Converted pages are marked so that repeated runs leave them untouched."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "List the pages a conversion would visit",
        long_about = "Walks the catalog and prints every page file, skipping excluded \
                      directories.\n\n\
                      Examples:\n  \
                      pagecfg scan\n  \
                      pagecfg scan ./catalog --sorted\n  \
                      pagecfg scan --format json"
    )]
    Scan(ScanArgs),

    #[command(
        about = "Show the page config extracted from one file",
        long_about = "Extracts the recognized literals from a single page and prints the \
                      synthesized config without modifying the file.\n\n\
                      Examples:\n  \
                      pagecfg extract app/shop/page.js\n  \
                      pagecfg extract app/faq/page.js --format json\n  \
                      pagecfg extract app/faq/page.js --only faqs"
    )]
    Extract(ExtractArgs),

    #[command(
        about = "Rewrite every page with an inserted page config",
        long_about = "Converts each page in the catalog in place. Already converted pages \
                      and root index pages are skipped. Exits with status 2 when some pages \
                      could not be read or written.\n\n\
                      Examples:\n  \
                      pagecfg convert\n  \
                      pagecfg convert ./catalog --dry-run\n  \
                      pagecfg convert --exclude legacy --format json -o report.json"
    )]
    Convert(ConvertArgs),

    #[command(
        about = "Show the effective configuration",
        long_about = "Prints the configuration resolved from PAGECFG_* environment variables.\n\n\
                      Examples:\n  \
                      pagecfg config\n  \
                      pagecfg config --format yaml"
    )]
    Config(ConfigArgs),
}

/// Options shared by the commands that walk a catalog
#[derive(Parser, Debug, Clone, Default)]
pub struct WalkArgs {
    #[arg(
        long = "exclude",
        value_name = "DIR",
        help = "Additional directory name to skip (repeatable)"
    )]
    pub exclude: Vec<String>,

    #[arg(long, value_name = "NAME", help = "Page file name (default: page.js)")]
    pub page_file: Option<String>,

    #[arg(long, value_name = "N", help = "Maximum directory depth to walk")]
    pub max_depth: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "ROOT",
        help = "Catalog root (defaults to current directory)"
    )]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub walk: WalkArgs,

    #[arg(long, help = "List pages in file name order")]
    pub sorted: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(value_name = "FILE", help = "Page file to extract from")]
    pub file: PathBuf,

    #[arg(
        long = "only",
        value_name = "NAME",
        value_parser = parse_recognized_name,
        help = "Restrict extraction to a declaration name (repeatable)"
    )]
    pub only: Vec<RecognizedName>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    #[arg(
        value_name = "ROOT",
        help = "Catalog root (defaults to current directory)"
    )]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub walk: WalkArgs,

    #[arg(long, help = "Report what would change without writing any file")]
    pub dry_run: bool,

    #[arg(
        long = "only",
        value_name = "NAME",
        value_parser = parse_recognized_name,
        help = "Restrict extraction to a declaration name (repeatable)"
    )]
    pub only: Vec<RecognizedName>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the report to a file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_recognized_name(s: &str) -> Result<RecognizedName, String> {
    s.parse::<RecognizedName>().map_err(|e| e.to_string())
}
