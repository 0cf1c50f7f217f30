//! JSONify CLI - Validate, format, convert, and scan JSON documents
//!
//! This is the main entry point for the JSONify CLI application, providing
//! commands for validating, transforming, and inspecting JSON documents,
//! with AI-assisted explanation, conversion, and secret scanning.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use std::process;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::LoggingConfig;
use output::OutputWriter;
use tracing::instrument;

#[tokio::main]
async fn main() {
    // Honor a local .env file for the service API key
    dotenv::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Initialize logging
    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    let result = run(cli).await;

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    tracing::info!("Loading configuration");
    let config = Config::load_with_file(cli.config.as_deref())?;

    // Create output writer
    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &mut output).await,
        Commands::Format(args) => handlers::handle_format(args, &mut output).await,
        Commands::Minify(args) => handlers::handle_minify(args, &mut output).await,
        Commands::Tree(args) => handlers::handle_tree(args, &mut output).await,
        Commands::Stats(args) => handlers::handle_stats(args, &mut output).await,
        Commands::Convert(args) => handlers::handle_convert(args, &config, &mut output).await,
        Commands::Scan(args) => handlers::handle_scan(args, &config, &mut output).await,
        Commands::Explain(args) => handlers::handle_explain(args, &config, &mut output).await,
        Commands::Sample(args) => handlers::handle_sample(args, &mut output).await,
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output).await,
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}
