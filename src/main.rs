use clap::Parser;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers;
use taskdeck::io::logging;

fn main() {
    let cli = Cli::parse();

    let config = match handlers::resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            // No subcommand → launch TUI, logging to a file
            let log_file = config
                .log_file
                .clone()
                .unwrap_or_else(logging::default_log_file);
            if let Err(e) = logging::init_file(&config.log_level, &log_file) {
                eprintln!("warning: could not open {}: {}", log_file.display(), e);
            }
            if let Err(e) = taskdeck::tui::run(&config) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(command) => {
            logging::init_stderr(&config.log_level);
            if let Err(e) = handlers::dispatch(command, cli.json, &config) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
