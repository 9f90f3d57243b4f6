use clap::Parser;
use docmatch::cli::handlers;
use docmatch::cli::Cli;
use docmatch::cli::Commands;
use docmatch::config::AppConfig;
use docmatch::logging;
use docmatch::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    if cli.verbose {
        logging::init_logging_with_level("debug")?;
    } else {
        logging::init_logging_with_config(Some(&config))?;
    }
    if config.logging.backtrace {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    match cli.command {
        Commands::Init => handlers::handle_init(&config).await,
        Commands::Search { file, json } => handlers::handle_search(&config, &file, json).await,
        Commands::Serve { host, port, cors } => {
            handlers::handle_serve(&config, host, port, cors).await
        }
        Commands::Stats => handlers::handle_stats(&config).await,
        Commands::Config => {
            handlers::handle_config(&config);
            Ok(())
        }
    }
}
