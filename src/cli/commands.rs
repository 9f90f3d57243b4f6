//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "docmatch")]
#[command(about = "Find ingested documents whose stored answers agree with yours")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create document tables and search indexes
    Init,
    /// Run one search from a JSON file of question/answer records
    Search {
        /// JSON file: an array of records or {"questions_answers": [...]}
        file: PathBuf,
        /// Print the raw JSON response instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP API server
    Serve {
        /// Host to bind (default from config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (default from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Allow cross-origin requests
        #[arg(long)]
        cors: bool,
    },
    /// Show document, chunk and answer counts
    Stats,
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
    fn test_search_args() {
        let cli = Cli::parse_from(["docmatch", "search", "pairs.json", "--json"]);
        match cli.command {
            Commands::Search { file, json } => {
                assert_eq!(file, PathBuf::from("pairs.json"));
                assert!(json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["docmatch", "serve", "--port", "9000", "-c", "prod.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("prod.toml")));
        assert!(matches!(cli.command, Commands::Serve { port: Some(9000), .. }));
    }
}
