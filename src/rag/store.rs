//! Vector store for ingested meeting documents.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata attached to a stored document.
pub type Metadata = BTreeMap<String, String>;

/// Metadata key holding the source file name.
pub const FILENAME_KEY: &str = "filename";

/// A document with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Unique id; adding an existing id replaces the entry
    pub id: String,
    /// Full document text
    pub document: String,
    /// Embedding of `document`
    pub embedding: Vec<f32>,
    /// Free-form metadata, including `filename`
    #[serde(default)]
    pub metadata: Metadata,
}

/// A ranked query result.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatch {
    /// Id of the matched document
    pub id: String,
    /// Text of the matched document
    pub document: String,
    /// Metadata of the matched document
    pub metadata: Metadata,
    /// Cosine similarity to the query, higher is better
    pub score: f32,
}

/// Storage and similarity search over embedded documents.
pub trait VectorStore {
    /// Insert a document, replacing any entry with the same id.
    fn add(&mut self, id: &str, document: &str, embedding: Vec<f32>, metadata: Metadata) -> Result<()>;

    /// The `top_k` documents most similar to `embedding`, best first.
    fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<QueryMatch>>;

    /// Metadata of every stored document, in insertion order.
    fn get_all(&self) -> Result<Vec<Metadata>>;

    /// Whether a document with this `filename` metadata is stored.
    fn contains_filename(&self, filename: &str) -> Result<bool> {
        Ok(self
            .get_all()?
            .iter()
            .any(|m| m.get(FILENAME_KEY).map(String::as_str) == Some(filename)))
    }
}

/// Cosine similarity; zero when either vector has no length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[derive(Debug, Deserialize)]
struct CollectionFile {
    name: String,
    documents: Vec<StoredDocument>,
}

#[derive(Debug, Serialize)]
struct CollectionFileRef<'a> {
    name: &'a str,
    documents: &'a [StoredDocument],
}

/// A named collection kept in `<dir>/<collection>.json`.
///
/// The file is loaded on open and rewritten after every add, so a store
/// reopened from the same directory sees everything added before. The
/// first stored embedding fixes the dimension of the collection.
#[derive(Debug)]
pub struct PersistentStore {
    path: Option<PathBuf>,
    collection: String,
    documents: Vec<StoredDocument>,
}

impl PersistentStore {
    /// Open (or create) `collection` under `dir`.
    pub fn open(dir: impl AsRef<Path>, collection: &str) -> Result<Self> {
        if collection.is_empty() || collection.contains(['/', '\\']) {
            return Err(Error::Store(format!("invalid collection name: {:?}", collection)));
        }
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", collection));

        let documents = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let file: CollectionFile = serde_json::from_str(&content)?;
            if file.name != collection {
                return Err(Error::Store(format!(
                    "{} holds collection {:?}, expected {:?}",
                    path.display(),
                    file.name,
                    collection
                )));
            }
            file.documents
        } else {
            Vec::new()
        };

        log::debug!(
            "Opened collection {:?} at {} ({} documents)",
            collection,
            path.display(),
            documents.len()
        );
        Ok(Self {
            path: Some(path),
            collection: collection.to_string(),
            documents,
        })
    }

    /// A store that is never written to disk.
    pub fn in_memory(collection: &str) -> Self {
        Self {
            path: None,
            collection: collection.to_string(),
            documents: Vec::new(),
        }
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Stored documents in insertion order.
    pub fn documents(&self) -> &[StoredDocument] {
        &self.documents
    }

    fn dimension(&self) -> Option<usize> {
        self.documents.first().map(|d| d.embedding.len())
    }

    fn check_dimension(&self, found: usize) -> Result<()> {
        match self.dimension() {
            Some(expected) if expected != found => Err(Error::DimensionMismatch { expected, found }),
            _ => Ok(()),
        }
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file = CollectionFileRef {
            name: &self.collection,
            documents: &self.documents,
        };
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(&file)?)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

impl VectorStore for PersistentStore {
    fn add(&mut self, id: &str, document: &str, embedding: Vec<f32>, metadata: Metadata) -> Result<()> {
        if embedding.is_empty() {
            return Err(Error::InvalidInput("embedding is empty".to_string()));
        }
        let existing = self.documents.iter().position(|d| d.id == id);
        // a lone document being replaced may change the dimension
        if !(existing.is_some() && self.documents.len() == 1) {
            self.check_dimension(embedding.len())?;
        }

        let entry = StoredDocument {
            id: id.to_string(),
            document: document.to_string(),
            embedding,
            metadata,
        };
        // memory only keeps the entry once it is on disk
        match existing {
            Some(index) => {
                let previous = std::mem::replace(&mut self.documents[index], entry);
                if let Err(e) = self.persist() {
                    self.documents[index] = previous;
                    return Err(e);
                }
            },
            None => {
                self.documents.push(entry);
                if let Err(e) = self.persist() {
                    self.documents.pop();
                    return Err(e);
                }
            },
        }

        log::info!(
            "Stored {:?} in collection {:?} ({} documents)",
            id,
            self.collection,
            self.documents.len()
        );
        Ok(())
    }

    fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        if top_k == 0 || self.documents.is_empty() {
            return Ok(Vec::new());
        }
        self.check_dimension(embedding.len())?;

        let mut scored: Vec<(f32, &StoredDocument)> = self
            .documents
            .iter()
            .map(|d| (cosine_similarity(embedding, &d.embedding), d))
            .collect();
        // stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(score, d)| QueryMatch {
                id: d.id.clone(),
                document: d.document.clone(),
                metadata: d.metadata.clone(),
                score,
            })
            .collect())
    }

    fn get_all(&self) -> Result<Vec<Metadata>> {
        Ok(self.documents.iter().map(|d| d.metadata.clone()).collect())
    }
}
