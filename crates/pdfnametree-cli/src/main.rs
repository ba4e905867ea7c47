mod check_cmd;
mod cli;
mod get_cmd;
mod list_cmd;
mod repair_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        cli::Commands::List {
            ref file,
            ref tree,
            ref format,
            no_repair,
        } => list_cmd::run(file, tree.as_deref(), format, no_repair),
        cli::Commands::Get {
            ref file,
            ref tree,
            ref key,
            ref format,
        } => get_cmd::run(file, tree, key, format),
        cli::Commands::Check {
            ref file,
            ref format,
        } => check_cmd::run(file, format),
        cli::Commands::Repair {
            ref file,
            ref output,
            fan_out,
            ref format,
        } => repair_cmd::run(file, output, fan_out, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
