mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use whiteboard_core::{NotesExporter, WhiteboardAnalyzer};
use whiteboard_gateway::{start_server, GatewayState, NotesPipeline};
use whiteboard_understanding::AnthropicAnalyzer;

use config::Config;

#[derive(Parser)]
#[command(name = "whiteboard-notes")]
#[command(about = "Turn lecture whiteboard photos into structured notes and flashcards")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the upload form (default)
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// IP address to bind to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Analyze one image and print the notes
    Analyze {
        /// Path to the whiteboard photo
        image: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    logging::init_logger(config.log_dir.as_deref(), &config.log_level);

    let analyzer: Arc<dyn WhiteboardAnalyzer> = Arc::new(
        AnthropicAnalyzer::new(config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone())
            .with_max_tokens(config.max_tokens),
    );
    let pipeline = Arc::new(NotesPipeline::new(
        analyzer,
        NotesExporter::new(&config.export_dir),
    ));

    match cli.command.unwrap_or(Commands::Serve { port: None, bind: None }) {
        Commands::Serve { port, bind } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                bind_address: bind.unwrap_or(config.bind_address),
                ..config
            };
            run_server(config, pipeline).await?;
        }
        Commands::Analyze { image } => {
            let processed = pipeline
                .process(&image)
                .await
                .with_context(|| format!("Failed to analyze {}", image.display()))?;
            println!("{}", serde_json::to_string_pretty(&processed.result)?);
            println!("{}", processed.status);
        }
    }

    Ok(())
}

async fn run_server(config: Config, pipeline: Arc<NotesPipeline>) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        model = %config.model,
        export_dir = %config.export_dir.display(),
        "Starting whiteboard notes server"
    );

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind_address, config.port))?;

    let state = GatewayState {
        pipeline,
        max_upload_bytes: config.max_upload_bytes,
    };
    start_server(addr, state).await
}
