// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Meeting Decisions
//!
//! Extracts approved decisions from meeting minutes with a language model and
//! renders them as a paginated PDF report.
//!
//! ## Core Features
//!
//! ### Extraction
//! - **Prompt mode**: the full minutes go to the model with a fixed instruction template
//! - **RAG mode**: minutes are embedded into a persistent vector store; the most
//!   similar stored document grounds the answer
//! - **Query cache**: bounded LRU of retrieved context, cleared when new minutes are stored
//! - **Gemini client**: blocking `generateContent` calls, failures surfaced, never retried
//!
//! ### Report Rendering
//! - **US Letter layout**: title, timestamp and rule header, 11pt body, footer with page number
//! - **Greedy word wrap**: 85 characters per line, over-long words on their own line
//! - **Deterministic PDF**: fixed object order and an injectable clock, byte-identical output
//! - **Standard fonts**: Helvetica family, WinAnsi-encoded text, optional Flate compression
//!
//! ## Quick Start
//!
//! ```ignore
//! use meeting_decisions::{DecisionExtractor, ExtractorConfig, Mode};
//! use meeting_decisions::llm::GeminiClient;
//! use meeting_decisions::rag::{HashingEmbedder, PersistentStore};
//! use meeting_decisions::report::ReportRenderer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractorConfig::from_env();
//! let model = GeminiClient::from_config(&config)?;
//! let store = PersistentStore::open(&config.store_dir, &config.collection)?;
//! let mut extractor = DecisionExtractor::new(model, HashingEmbedder::new(), store, config);
//!
//! let minutes = std::fs::read_to_string("minutes.txt")?;
//! let decisions = extractor.run(Mode::Rag, "minutes.txt", &minutes, "What decisions were approved?")?;
//!
//! let pdf = ReportRenderer::new().render(&decisions)?;
//! std::fs::write("Meeting-Decisions.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// PDF output
pub mod fonts;
pub mod object;
pub mod writer;

// Report layout and rendering
pub mod report;

// Extraction
pub mod config;
pub mod extractor;
pub mod llm;
pub mod prompt;
pub mod rag;

pub use config::ExtractorConfig;
pub use error::{Error, Result};
pub use extractor::{DecisionExtractor, Mode};
pub use report::{RenderedReport, ReportRenderer};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
