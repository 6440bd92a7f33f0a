//! Meeting Decisions CLI
//!
//! Extracts approved decisions from meeting minutes and writes them as a PDF
//! report.
//!
//! Usage:
//!   meeting-decisions extract --file minutes.txt --mode rag
//!   meeting-decisions render --input decisions.txt --output report.pdf
//!   meeting-decisions list
//!
//! Set `RUST_LOG=debug` for layout and retrieval details.

use clap::{Parser, Subcommand};
use meeting_decisions::llm::GeminiClient;
use meeting_decisions::prompt::DEFAULT_QUERY;
use meeting_decisions::rag::{HashingEmbedder, PersistentStore, VectorStore, FILENAME_KEY};
use meeting_decisions::report::{ReportRenderer, REPORT_FILE_NAME};
use meeting_decisions::{DecisionExtractor, Error, ExtractorConfig, Mode, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "meeting-decisions")]
#[command(about = "Extract approved decisions from meeting minutes into a PDF report")]
#[command(version)]
struct Cli {
    /// Directory of the persistent vector store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Language model name
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract decisions from a minutes file and render the report
    Extract {
        /// Meeting minutes (.txt, UTF-8)
        #[arg(short, long)]
        file: PathBuf,

        /// Question to ask about the minutes
        #[arg(short, long, default_value = DEFAULT_QUERY)]
        query: String,

        /// Extraction mode: prompt or rag
        #[arg(short, long, default_value = "prompt")]
        mode: Mode,

        /// Where to write the PDF report
        #[arg(short, long, default_value = REPORT_FILE_NAME)]
        output: PathBuf,

        /// Compress page content streams
        #[arg(long)]
        compress: bool,
    },

    /// Render a text file as a decisions report without calling the model
    Render {
        /// Text to render (UTF-8)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the PDF report
        #[arg(short, long, default_value = REPORT_FILE_NAME)]
        output: PathBuf,

        /// Compress page content streams
        #[arg(long)]
        compress: bool,
    },

    /// List the files stored for RAG mode
    List,
}

fn read_utf8(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(std::str::from_utf8(&bytes)?.to_string())
}

fn write_report(text: &str, output: &Path, compress: bool) -> Result<()> {
    let report = ReportRenderer::new().with_compress(compress).render_report(text)?;
    std::fs::write(output, &report.bytes)?;
    println!(
        "Wrote {} ({} page{})",
        output.display(),
        report.page_count,
        if report.page_count == 1 { "" } else { "s" }
    );
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ExtractorConfig::from_env();
    if let Some(store) = cli.store {
        config = config.with_store_dir(store);
    }
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }

    match cli.command {
        Commands::Extract {
            file,
            query,
            mode,
            output,
            compress,
        } => {
            let minutes = read_utf8(&file)?;
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| Error::InvalidInput(format!("not a file: {}", file.display())))?;

            let model = GeminiClient::from_config(&config)?;
            let store = PersistentStore::open(&config.store_dir, &config.collection)?;
            let mut extractor = DecisionExtractor::new(model, HashingEmbedder::new(), store, config);

            let decisions = extractor.run(mode, &filename, &minutes, &query)?;
            println!("{}", decisions);
            write_report(&decisions, &output, compress)
        },
        Commands::Render {
            input,
            output,
            compress,
        } => write_report(&read_utf8(&input)?, &output, compress),
        Commands::List => {
            let store = PersistentStore::open(&config.store_dir, &config.collection)?;
            let stored = store.get_all()?;
            if stored.is_empty() {
                println!("No documents stored in {}", config.store_dir.display());
            }
            for metadata in stored {
                if let Some(name) = metadata.get(FILENAME_KEY) {
                    println!("{}", name);
                }
            }
            Ok(())
        },
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        },
    }
}
