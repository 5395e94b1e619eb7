//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "docrag")]
#[command(about = "DocRAG: ask questions about your PDF documents")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: configured level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file (default: config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Disable CORS
        #[arg(long)]
        no_cors: bool,
    },
    /// Index PDF files, replacing the current index
    Ingest {
        /// PDF files to index
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Ask a question against the saved index
    Ask {
        /// The question
        question: String,
        /// Show the assembled context
        #[arg(long)]
        show_context: bool,
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
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["docrag", "serve", "--port", "8000", "--no-cors"]).unwrap();
        match cli.command {
            Commands::Serve {
                host,
                port,
                no_cors,
            } => {
                assert!(host.is_none());
                assert_eq!(port, Some(8000));
                assert!(no_cors);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_ingest_requires_files() {
        assert!(Cli::try_parse_from(["docrag", "ingest"]).is_err());

        let cli = Cli::try_parse_from(["docrag", "-v", "ingest", "a.pdf", "b.pdf"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Ingest { files } => assert_eq!(files.len(), 2),
            _ => panic!("expected ingest"),
        }
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["docrag", "ask", "what is this?", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }
}
