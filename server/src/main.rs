use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use textmine_core::config::{DEFAULT_CORPUS_DIR, DEFAULT_HOST, DEFAULT_PORT};
use textmine_core::{CorpusConfig, Language};
use textmine_server::build_app;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "textmine-server", about = "Serve corpus statistics over HTTP")]
struct Args {
    /// Corpus directory loaded at startup and on reload
    #[arg(long, env = "TEXTMINE_CORPUS_DIR", default_value = DEFAULT_CORPUS_DIR)]
    corpus: PathBuf,
    /// Stop-word list, one word per line (built-in list when absent)
    #[arg(long, env = "TEXTMINE_STOP_WORDS")]
    stop_words: Option<PathBuf>,
    /// Stemmer and default stop-word language
    #[arg(long, env = "TEXTMINE_LANGUAGE", default_value = "english")]
    language: Language,
    /// Recognized corpus file extensions
    #[arg(long = "ext", env = "TEXTMINE_EXTENSIONS", value_delimiter = ',', default_value = "txt")]
    extensions: Vec<String>,
    /// Host to bind
    #[arg(long, env = "TEXTMINE_HOST", default_value = DEFAULT_HOST)]
    host: String,
    /// Port to bind
    #[arg(long, env = "TEXTMINE_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = CorpusConfig {
        corpus_dir: args.corpus,
        extensions: args.extensions,
        stop_words: args.stop_words,
        language: args.language,
    };
    let app: Router = build_app(config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
