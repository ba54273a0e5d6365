// CLI binary entry point for wemkit

mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::commands;
use cli::{Commands, Config, OutputFormatter};

fn main() -> ExitCode {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let formatter = OutputFormatter::new(config.format, config.quiet);

    // Per-file commands report their own failures and return how many failed
    let result = match &config.command {
        Commands::Detect { files } => commands::command_detect(files, &formatter),
        Commands::Verify { files } => commands::command_verify(files, &formatter),
        Commands::Info { files, detailed } => commands::command_info(files, *detailed, &formatter),
        Commands::Strip { file, output } => {
            commands::command_strip(file, output.clone(), &formatter).map(|_| 0)
        }
        Commands::Downgrade { file, output } => {
            commands::command_downgrade(file, output.clone(), &formatter).map(|_| 0)
        }
        Commands::Swap { file, output } => {
            commands::command_swap(file, output.clone(), &formatter).map(|_| 0)
        }
        Commands::Convert { file, output } => {
            commands::command_convert(file, output.clone(), &formatter).map(|_| 0)
        }
        Commands::Decode { file, output, toolkit } => {
            commands::command_decode(file, output.clone(), toolkit, &formatter).map(|_| 0)
        }
        Commands::Batch { directory, pattern, operation } => {
            commands::command_batch(directory, pattern, *operation, &formatter)
        }
    };

    match result {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            formatter.print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
