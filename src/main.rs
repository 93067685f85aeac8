use clap::Parser;
use propmatch::cli::build_match_request;
use propmatch::cli::handle_config_command;
use propmatch::cli::handle_index_command;
use propmatch::cli::handle_init_command;
use propmatch::cli::handle_match_command;
use propmatch::cli::handle_search_command;
use propmatch::cli::handle_serve_api;
use propmatch::cli::print_error;
use propmatch::cli::Cli;
use propmatch::cli::Commands;
use propmatch::config::AppConfig;
use propmatch::PropMatchError;
use propmatch::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    if cli.verbose {
        propmatch::logging::init_logging_with_level("debug")?;
    } else {
        propmatch::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    let outcome = match cli.command {
        Commands::Init { force } => handle_init_command(&config, force).await,
        Commands::Index { csv, rebuild } => handle_index_command(&config, csv, rebuild).await,
        Commands::Search {
            query,
            max_price,
            min_bedrooms,
        } => handle_search_command(&config, query, max_price, min_bedrooms).await,
        Commands::Match {
            input,
            budget,
            bedrooms,
            preferences,
            json,
        } => match build_match_request(input, budget, bedrooms, preferences) {
            Ok(request) => handle_match_command(&config, request, json).await,
            Err(e) => Err(e),
        },
        Commands::Serve { host, port, cors } => handle_serve_api(&config, host, port, cors).await,
        Commands::Config => handle_config_command(&config).await,
    };

    if let Err(PropMatchError::IndexUnavailable(reason)) = &outcome {
        print_error(&format!("Vector index unavailable: {reason}"));
        println!("Run `propmatch init --force` and `propmatch index <csv>` first.");
    }

    outcome
}
