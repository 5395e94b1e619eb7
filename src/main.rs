use clap::Parser;
use docrag::cli::*;
use docrag::config::AppConfig;
use docrag::Result;
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    if cli.verbose {
        docrag::logging::init_logging_with_level("debug")?;
    } else {
        docrag::logging::init_logging_with_config(&config)?;
    }
    info!("Configuration loaded successfully");

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => handle_serve_api(&config, host, port, no_cors).await,
        Commands::Ingest { files } => handle_ingest(&config, files).await,
        Commands::Ask {
            question,
            show_context,
        } => handle_ask(&config, question, show_context).await,
        Commands::Config => handle_config_command(&config),
    }
}
