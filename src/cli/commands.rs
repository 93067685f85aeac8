//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "propmatch")]
#[command(about = "Match housing preferences to a property corpus with hybrid search and LLM scoring")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the pgvector extension, documents table and index
    Init {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Load a property CSV and write it into the vector index
    Index {
        /// Corpus file (default: corpus.path from config)
        csv: Option<PathBuf>,
        /// Clear the index before loading
        #[arg(long)]
        rebuild: bool,
    },
    /// Run the hybrid search tool directly, without transformation or scoring
    Search {
        /// Semantic query
        query: String,
        /// Maximum price, 0 for no limit
        #[arg(long, default_value = "0")]
        max_price: u64,
        /// Minimum bedrooms, 0 for no limit
        #[arg(long, default_value = "0")]
        min_bedrooms: u32,
    },
    /// Run the full matching pipeline
    Match {
        /// Free-text request; omit to compose one from --budget/--bedrooms/--preferences
        input: Option<String>,
        /// Budget, e.g. "$500k"
        #[arg(long)]
        budget: Option<String>,
        /// Minimum bedrooms
        #[arg(long)]
        bedrooms: Option<u32>,
        /// Style, location and amenity preferences
        #[arg(long)]
        preferences: Option<String>,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Enable CORS
        #[arg(long)]
        cors: bool,
    },
    /// Show current configuration
    Config,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_match_with_profile_fields() {
        let cli = Cli::try_parse_from([
            "propmatch",
            "match",
            "--budget",
            "$500k",
            "--bedrooms",
            "2",
            "--preferences",
            "near the beach",
        ])
        .unwrap();

        match cli.command {
            Commands::Match {
                input,
                budget,
                bedrooms,
                ..
            } => {
                assert!(input.is_none());
                assert_eq!(budget.as_deref(), Some("$500k"));
                assert_eq!(bedrooms, Some(2));
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_parse_index_rebuild() {
        let cli = Cli::try_parse_from(["propmatch", "-v", "index", "data.csv", "--rebuild"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Index { csv, rebuild } => {
                assert_eq!(csv, Some(PathBuf::from("data.csv")));
                assert!(rebuild);
            }
            _ => panic!("expected index command"),
        }
    }
}
