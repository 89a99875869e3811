use clap::Parser;
use tickoff::cli::commands::Cli;
use tickoff::cli::handlers::{self, Context};
use tickoff::io::config_io;
use tickoff::logging::{self, LOG_LEVEL_ENV};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref())?;
    let config = config_io::read_config(&data_dir)?;

    // Logging is best effort; the handle must outlive the command
    let level = std::env::var(LOG_LEVEL_ENV).ok();
    let _logger = match logging::init_logging(&data_dir, level.as_deref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: logging disabled: {}", e);
            None
        }
    };

    match cli.command {
        // No subcommand → launch TUI
        None => tickoff::tui::run(&data_dir, &config),
        Some(cmd) => {
            let ctx = Context {
                data_dir,
                config,
                json: cli.json,
            };
            handlers::dispatch(cmd, &ctx)
        }
    }
}
