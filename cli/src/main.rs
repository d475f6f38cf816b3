use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use textmine_core::config::DEFAULT_CORPUS_DIR;
use textmine_core::{CorpusConfig, CorpusStats, Language, LoadReport, SharedCorpus};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "textmine")]
#[command(about = "Load a text corpus and compute TF-IDF and similarity statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Corpus directory (non-recursive)
    #[arg(long, env = "TEXTMINE_CORPUS_DIR", default_value = DEFAULT_CORPUS_DIR)]
    corpus: PathBuf,
    /// Stop-word list, one word per line
    #[arg(long, env = "TEXTMINE_STOP_WORDS")]
    stop_words: Option<PathBuf>,
    /// Stemmer and default stop-word language
    #[arg(long, env = "TEXTMINE_LANGUAGE", default_value = "english")]
    language: Language,
    /// Recognized corpus file extensions
    #[arg(long = "ext", value_delimiter = ',', default_value = "txt")]
    extensions: Vec<String>,
}

impl CorpusArgs {
    fn load(self) -> (SharedCorpus, LoadReport) {
        let corpus = SharedCorpus::from_config(CorpusConfig {
            corpus_dir: self.corpus,
            extensions: self.extensions,
            stop_words: self.stop_words,
            language: self.language,
        });
        let report = corpus.load_configured();
        tracing::info!(%report, "corpus loaded");
        (corpus, report)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load the corpus and print its statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Analyze a text against the corpus
    Analyze {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Text to analyze
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// File whose content is analyzed
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct StatsOutput {
    load: LoadReport,
    stats: CorpusStats,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { corpus } => {
            let (corpus, load) = corpus.load();
            let out = StatsOutput { load, stats: corpus.stats() };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Analyze { corpus, text, file } => {
            let text = match (text, file) {
                (Some(t), _) => t,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, None) => bail!("either --text or --file is required"),
            };
            let (corpus, _) = corpus.load();
            let analysis = corpus.analyze(&text)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
    }
    Ok(())
}
