use pagecfg::cli::commands::{CliArgs, Commands};
use pagecfg::cli::handlers::{handle_config, handle_convert, handle_extract, handle_scan};
use pagecfg::util::logging::{init_logging, parse_level, LoggingConfig};
use pagecfg::{PagecfgConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("pagecfg v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Scan(scan_args) => handle_scan(scan_args, args.quiet),
        Commands::Extract(extract_args) => handle_extract(extract_args, args.quiet),
        Commands::Convert(convert_args) => handle_convert(convert_args, args.quiet),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    // Lenient load: invalid values are reported by the command itself
    let env_config = PagecfgConfig::default();

    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&env_config.log_level)
    };

    init_logging(LoggingConfig {
        use_json: env_config.log_json,
        ..LoggingConfig::with_level(level)
    });
}
