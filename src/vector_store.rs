//! In-memory vector index over document chunks, persisted as JSON
//!
//! The index is small enough (one entry per chunk of the uploaded PDFs) that
//! an exact cosine scan is used for retrieval.

use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use uuid::Uuid;

use crate::documents::Chunk;
use crate::embeddings::EmbeddingService;
use crate::errors::DocRagError;
use crate::errors::Result;

/// File name of the index inside the index directory
pub const INDEX_FILE: &str = "index.json";

/// A chunk and its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: Uuid,
    pub source: String,
    pub chunk_index: usize,
    pub text: String,
    pub vector: Vec<f32>,
}

/// A source file recorded in the index, identified by the SHA-256 of its bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub source: String,
    pub content_hash: String,
}

/// A retrieved chunk with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub source: String,
    pub chunk_index: usize,
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStore {
    pub model: String,
    pub dimension: usize,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    documents: Vec<IndexedDocument>,
    entries: Vec<IndexEntry>,
}

impl VectorStore {
    /// Create an empty store for vectors of the given dimension
    pub fn new(model: impl Into<String>, dimension: usize) -> Self {
        Self {
            model: model.into(),
            dimension,
            created_at: Utc::now(),
            documents: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Embed every chunk and build an index from them
    pub async fn from_chunks(chunks: Vec<Chunk>, embeddings: &EmbeddingService) -> Result<Self> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embeddings.generate_batch(&texts).await?;

        let mut store = Self::new(embeddings.model(), embeddings.dimension());
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            store.add(chunk, vector)?;
        }

        info!(
            "Built vector index with {} chunks from {} source(s)",
            store.len(),
            store.sources().len()
        );
        Ok(store)
    }

    /// Add one embedded chunk
    pub fn add(&mut self, chunk: Chunk, vector: Vec<f32>) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(DocRagError::VectorStoreError(format!(
                "Invalid vector dimensions: expected {}, got {}",
                self.dimension,
                vector.len()
            )));
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(DocRagError::VectorStoreError(
                "Invalid vector values: contains NaN or Infinity".to_string(),
            ));
        }

        self.entries.push(IndexEntry {
            id: Uuid::new_v4(),
            source: chunk.source,
            chunk_index: chunk.index,
            text: chunk.text,
            vector,
        });
        Ok(())
    }

    /// The `k` chunks most similar to `query`, best first
    ///
    /// Equal scores keep insertion order.
    pub fn similarity_search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if query.len() != self.dimension {
            return Err(DocRagError::VectorStoreError(format!(
                "Query has {} dimensions, index has {}",
                query.len(),
                self.dimension
            )));
        }

        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .map(|entry| (cosine_similarity(query, &entry.vector), entry))
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let results: Vec<ScoredChunk> = scored
            .into_iter()
            .take(k)
            .map(|(score, entry)| ScoredChunk {
                source: entry.source.clone(),
                chunk_index: entry.chunk_index,
                text: entry.text.clone(),
                score,
            })
            .collect();

        debug!("Similarity search returned {} of {} chunks", results.len(), self.len());
        Ok(results)
    }

    /// Write the index to `dir/index.json`, creating `dir` if needed
    ///
    /// The file is written next to its final name and renamed into place so a
    /// concurrent reader never sees a partial index.
    pub fn save_local(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let final_path = index_file(dir);
        let tmp_path = dir.join(format!("{INDEX_FILE}.tmp"));
        std::fs::write(&tmp_path, serde_json::to_vec(self)?)?;
        std::fs::rename(&tmp_path, &final_path)?;

        info!("Saved vector index ({} chunks) to {}", self.len(), final_path.display());
        Ok(())
    }

    /// Read an index previously written by [`VectorStore::save_local`]
    pub fn load_local(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let path = index_file(dir);
        if !path.exists() {
            return Err(DocRagError::IndexNotFound(dir.display().to_string()));
        }

        let bytes = std::fs::read(&path)?;
        let store: Self = serde_json::from_slice(&bytes)?;

        if let Some(bad) = store.entries.iter().find(|e| e.vector.len() != store.dimension) {
            return Err(DocRagError::VectorStoreError(format!(
                "Corrupt index {}: entry {} has {} dimensions, expected {}",
                path.display(),
                bad.id,
                bad.vector.len(),
                store.dimension
            )));
        }

        debug!("Loaded vector index with {} chunks from {}", store.len(), path.display());
        Ok(store)
    }

    /// Whether a saved index exists in `dir`
    pub fn exists(dir: impl AsRef<Path>) -> bool {
        index_file(dir.as_ref()).exists()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct source names, in first-seen order
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !sources.contains(&entry.source.as_str()) {
                sources.push(&entry.source);
            }
        }
        sources
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Record a source file and its content hash
    pub fn record_document(&mut self, source: impl Into<String>, content_hash: impl Into<String>) {
        self.documents.push(IndexedDocument {
            source: source.into(),
            content_hash: content_hash.into(),
        });
    }

    /// Source files the index was built from
    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }

    /// Whether a file with this content hash is already indexed
    pub fn contains_hash(&self, content_hash: &str) -> bool {
        self.documents.iter().any(|d| d.content_hash == content_hash)
    }
}

fn index_file(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILE)
}

/// Cosine similarity; 0 when either vector has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot_product / (norm_a * norm_b)
}
