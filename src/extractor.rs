//! Decision extraction pipeline.
//!
//! [`DecisionExtractor`] ties the collaborators together. Prompt mode sends
//! the whole minutes to the model; RAG mode ingests the minutes into the
//! vector store and answers from the most similar stored document.

use crate::config::ExtractorConfig;
use crate::error::{Error, Result};
use crate::llm::LanguageModel;
use crate::prompt::{build_prompt, build_rag_prompt, trim_context};
use crate::rag::{Embedder, Metadata, QueryCache, VectorStore, FILENAME_KEY};
use std::fmt;
use std::str::FromStr;

/// How decisions are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Send the full minutes in the prompt
    #[default]
    Prompt,
    /// Retrieve stored context for the query
    Rag,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Prompt => write!(f, "prompt"),
            Mode::Rag => write!(f, "rag"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" => Ok(Mode::Prompt),
            "rag" => Ok(Mode::Rag),
            other => Err(Error::InvalidInput(format!(
                "unknown mode {:?}, expected \"prompt\" or \"rag\"",
                other
            ))),
        }
    }
}

/// Extracts approved decisions from meeting minutes.
pub struct DecisionExtractor<M, E, S> {
    model: M,
    embedder: E,
    store: S,
    config: ExtractorConfig,
    cache: QueryCache,
}

impl<M, E, S> DecisionExtractor<M, E, S>
where
    M: LanguageModel,
    E: Embedder,
    S: VectorStore,
{
    /// Create an extractor from its collaborators.
    pub fn new(model: M, embedder: E, store: S, config: ExtractorConfig) -> Self {
        let cache = QueryCache::new(config.cache_capacity);
        Self {
            model,
            embedder,
            store,
            config,
            cache,
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The backing vector store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The retrieval cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Consume the extractor and return its store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn complete(&self, prompt: &str) -> Result<String> {
        let completion = self.model.generate(&self.config.model, prompt)?;
        Ok(completion.text.trim().to_string())
    }

    /// Extract decisions by sending `minutes` to the model.
    pub fn extract_with_prompt(&self, minutes: &str, query: &str) -> Result<String> {
        check_query(query)?;
        let answer = self.complete(&build_prompt(minutes, query))?;
        log::info!("Prompt-mode extraction returned {} chars", answer.len());
        Ok(answer)
    }

    /// Ingest a document unless one with the same file name is stored.
    ///
    /// Returns whether the document was added.
    pub fn store_document(&mut self, filename: &str, text: &str) -> Result<bool> {
        if self.store.contains_filename(filename)? {
            log::debug!("{:?} already stored, skipping ingest", filename);
            return Ok(false);
        }

        let embedding = self.embedder.embed(text)?;
        let mut metadata = Metadata::new();
        metadata.insert(FILENAME_KEY.to_string(), filename.to_string());
        self.store.add(filename, text, embedding, metadata)?;
        self.cache.clear();
        Ok(true)
    }

    /// Context for `query` from the most similar stored documents, joined by
    /// blank lines and cut at the configured character limit.
    pub fn retrieve_context(&mut self, query: &str) -> Result<String> {
        check_query(query)?;
        if let Some(context) = self.cache.get(query) {
            log::debug!("Query cache hit for {:?}", query);
            return Ok(context);
        }

        let embedding = self.embedder.embed(query)?;
        let matches = self.store.query(&embedding, self.config.top_k)?;
        let joined = matches
            .iter()
            .map(|m| m.document.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let context = trim_context(&joined, self.config.context_char_limit);
        log::debug!(
            "Retrieved {} document(s), {} context chars for {:?}",
            matches.len(),
            context.chars().count(),
            query
        );

        self.cache.insert(query, context.clone());
        Ok(context)
    }

    /// Extract decisions from retrieved context.
    pub fn extract_with_rag(&mut self, query: &str) -> Result<String> {
        let context = self.retrieve_context(query)?;
        let answer = self.complete(&build_rag_prompt(&context, query))?;
        log::info!("RAG-mode extraction returned {} chars", answer.len());
        Ok(answer)
    }

    /// Run one extraction over an uploaded file.
    ///
    /// RAG mode ingests the file first, then answers from the store.
    pub fn run(&mut self, mode: Mode, filename: &str, text: &str, query: &str) -> Result<String> {
        check_query(query)?;
        match mode {
            Mode::Prompt => self.extract_with_prompt(text, query),
            Mode::Rag => {
                self.store_document(filename, text)?;
                self.extract_with_rag(query)
            },
        }
    }
}

fn check_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(Error::InvalidInput("query is empty".to_string()));
    }
    Ok(())
}
