use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use voxify_gateway::{
    ServerConfig,
    config::{self, Configuration},
    core::tts::{PollyEngine, SynthesisClient, SynthesisSession},
    routes,
    state::{AppState, DEFAULT_SESSION_ID},
};

/// Voxify Gateway - Amazon Polly text-to-speech server
#[derive(Parser, Debug)]
#[command(name = "voxify-gateway")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve,

    /// Print the voices offered for synthesis
    Voices,

    /// Synthesize text and write the audio to a file
    Speak {
        /// Text to synthesize
        #[arg(short = 't', long = "text")]
        text: String,

        /// Voice id, as printed by `voices`
        #[arg(short = 'v', long = "voice")]
        voice: String,

        /// Engine (standard or neural); the configured default applies when omitted
        #[arg(short = 'e', long = "engine", value_parser = parse_engine)]
        engine: Option<PollyEngine>,

        /// Output file path (defaults to the download file name)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

fn parse_engine(raw: &str) -> Result<PollyEngine, String> {
    PollyEngine::parse(raw).ok_or_else(|| format!("unknown engine '{raw}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Configuration errors are fatal: nothing is served without credentials.
    let credentials = config::load().map_err(|e| {
        error!("{e}");
        anyhow!(e)
    })?;

    let server_config = if let Some(config_path) = cli.config {
        info!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(&config_path)?
    } else {
        ServerConfig::from_env()?
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(server_config, &credentials).await,
        Commands::Voices => print_voices(&server_config, &credentials).await,
        Commands::Speak {
            text,
            voice,
            engine,
            output,
        } => {
            speak(
                &server_config,
                &credentials,
                text,
                &voice,
                engine.unwrap_or(server_config.default_engine),
                output,
            )
            .await
        }
    }
}

async fn serve(config: ServerConfig, credentials: &Configuration) -> anyhow::Result<()> {
    let address = config.address();
    info!(
        region = credentials.region(),
        languages = ?config.voice_languages,
        engine = %config.default_engine,
        "Starting server on {address}"
    );

    let app_state = AppState::new(config, credentials);
    let app = routes::create_app(app_state);

    // Parse socket address
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    let listener = TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind {socket_addr}"))?;
    info!("Server listening on http://{}", socket_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn print_voices(config: &ServerConfig, credentials: &Configuration) -> anyhow::Result<()> {
    let client = SynthesisClient::new(credentials);
    let voices = client.list_voices(&config.voice_languages).await?;

    if voices.is_empty() {
        println!("No neural voices available for {:?}", config.voice_languages);
    }
    for voice in &voices {
        println!("{:<12} {}", voice.id(), voice.label());
    }
    Ok(())
}

async fn speak(
    config: &ServerConfig,
    credentials: &Configuration,
    text: String,
    voice_id: &str,
    engine: PollyEngine,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let client = Arc::new(SynthesisClient::new(credentials));
    client.list_voices(&config.voice_languages).await?;

    let session = SynthesisSession::new(DEFAULT_SESSION_ID, client);
    let audio = session.synthesize(text, voice_id, engine).await?;

    let output = output.unwrap_or_else(|| PathBuf::from(audio.download_file_name()));
    tokio::fs::write(&output, &audio.bytes)
        .await
        .with_context(|| format!("Failed to write to {}", output.display()))?;

    println!(
        "Wrote {} bytes of {} to {}",
        audio.len(),
        audio.mime_type,
        output.display()
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
