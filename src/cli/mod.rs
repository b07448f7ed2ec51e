pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, ConvertArgs, ExtractArgs, ScanArgs, WalkArgs};
pub use output::{ExtractOutput, OutputFormat, OutputFormatter, ScanOutput};
