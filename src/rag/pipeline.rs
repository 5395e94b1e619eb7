//! Complete RAG pipeline: Extract -> Chunk -> Embed -> Index, then
//! Retrieve -> Prompt -> Generate

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::RwLock;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::documents::split_documents;
use crate::documents::RecursiveTextSplitter;
use crate::documents::UploadedFile;
use crate::embeddings::EmbeddingService;
use crate::errors::DocRagError;
use crate::errors::Result;
use crate::llm::LlmService;
use crate::rag::prompts::build_prompt;
use crate::rag::ContextAssembler;
use crate::vector_store::ScoredChunk;
use crate::vector_store::VectorStore;

/// Complete RAG service
pub struct RagService {
    splitter: RecursiveTextSplitter,
    embedding_service: Arc<EmbeddingService>,
    llm_service: LlmService,
    context_assembler: ContextAssembler,
    index_path: PathBuf,
    top_k: usize,
    index: RwLock<Option<Arc<VectorStore>>>,
    ingest_lock: Mutex<()>,
}

impl RagService {
    /// Create a new RAG service, loading a previously saved index if present
    pub fn new(config: &AppConfig) -> Result<Self> {
        let embedding_service = Arc::new(EmbeddingService::new(config)?);
        let llm_service = LlmService::new(config)?;
        Ok(Self::from_services(config, embedding_service, llm_service))
    }

    /// Create from existing services
    #[must_use]
    pub fn from_services(
        config: &AppConfig,
        embedding_service: Arc<EmbeddingService>,
        llm_service: LlmService,
    ) -> Self {
        let index_path = PathBuf::from(config.index_path());

        let index = if VectorStore::exists(&index_path) {
            match VectorStore::load_local(&index_path) {
                Ok(store) => {
                    info!(
                        "Loaded existing vector index from {} ({} chunks)",
                        index_path.display(),
                        store.len()
                    );
                    Some(Arc::new(store))
                }
                Err(e) => {
                    warn!("Ignoring unreadable index at {}: {}", index_path.display(), e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            splitter: RecursiveTextSplitter::from_config(&config.chunking),
            embedding_service,
            llm_service,
            context_assembler: ContextAssembler::default(),
            index_path,
            top_k: config.vector_store.top_k,
            index: RwLock::new(index),
            ingest_lock: Mutex::new(()),
        }
    }

    /// Build a fresh index from uploaded PDFs, replacing the current one
    ///
    /// The new index is saved to disk before it becomes visible to queries.
    pub async fn ingest(&self, files: Vec<UploadedFile>) -> Result<IngestReport> {
        if files.is_empty() {
            return Err(DocRagError::InvalidInput("No PDF files provided".to_string()));
        }

        // One rebuild at a time; queries keep using the old index meanwhile
        let _guard = self.ingest_lock.lock().await;

        let file_count = files.len();
        info!("Processing {} PDF file(s)", file_count);

        debug!("Step 1: Extracting text");
        let documents = crate::documents::extract_pdf_texts(files).await?;

        debug!("Step 2: Splitting into chunks");
        let chunks = split_documents(&self.splitter, &documents);
        if chunks.is_empty() {
            return Err(DocRagError::InvalidInput(
                "No extractable text found in the uploaded PDF files".to_string(),
            ));
        }
        let chunk_count = chunks.len();
        debug!("Split {} document(s) into {} chunks", documents.len(), chunk_count);

        debug!("Step 3: Embedding and indexing");
        let mut store = VectorStore::from_chunks(chunks, &self.embedding_service).await?;
        for document in &documents {
            store.record_document(&document.source, &document.content_hash);
        }
        let store = Arc::new(store);

        debug!("Step 4: Saving index");
        let to_save = Arc::clone(&store);
        let path = self.index_path.clone();
        tokio::task::spawn_blocking(move || to_save.save_local(path))
            .await
            .map_err(|e| DocRagError::Custom(format!("Index save task failed: {e}")))??;

        *self.index.write().await = Some(store);

        info!(
            "PDF processing completed: {} file(s), {} chunks",
            file_count, chunk_count
        );

        Ok(IngestReport {
            files: file_count,
            chunks: chunk_count,
            sources: documents.into_iter().map(|d| d.source).collect(),
        })
    }

    /// Answer a question from the indexed documents
    pub async fn query(&self, question: &str) -> Result<RagResponse> {
        let trimmed = question.trim();
        if trimmed.is_empty() {
            return Err(DocRagError::InvalidInput("Question is required".to_string()));
        }

        info!("Processing RAG query: {}", question);
        let store = self.current_index().await?;

        debug!("Step 1: Retrieving chunks");
        let query_vector = self.embedding_service.generate(question).await?;
        let sources = store.similarity_search(&query_vector, self.top_k)?;
        debug!("Retrieved {} chunks", sources.len());

        debug!("Step 2: Assembling context");
        let context = self.context_assembler.assemble(&sources);

        debug!("Step 3: Generating answer");
        let prompt = build_prompt(&context, question);
        let answer = self.llm_service.generate(&prompt).await?;

        info!("RAG query completed successfully");

        Ok(RagResponse {
            question: question.to_string(),
            answer,
            sources,
            context,
        })
    }

    /// Number of chunks in the active index
    pub async fn indexed_chunks(&self) -> usize {
        self.index.read().await.as_ref().map_or(0, |store| store.len())
    }

    /// The active index, read from disk on first use
    async fn current_index(&self) -> Result<Arc<VectorStore>> {
        if let Some(store) = self.index.read().await.as_ref() {
            return Ok(Arc::clone(store));
        }

        let mut slot = self.index.write().await;
        if let Some(store) = slot.as_ref() {
            return Ok(Arc::clone(store));
        }

        let path = self.index_path.clone();
        let store = tokio::task::spawn_blocking(move || VectorStore::load_local(path))
            .await
            .map_err(|e| DocRagError::Custom(format!("Index load task failed: {e}")))??;
        let store = Arc::new(store);
        *slot = Some(Arc::clone(&store));
        Ok(store)
    }

    pub fn index_path(&self) -> &std::path::Path {
        &self.index_path
    }
}

/// Outcome of an ingest run
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub files: usize,
    pub chunks: usize,
    pub sources: Vec<String>,
}

/// RAG response
#[derive(Debug, Clone)]
pub struct RagResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<ScoredChunk>,
    pub context: String,
}

impl RagResponse {
    /// Get a formatted string representation
    #[must_use]
    pub fn format(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Question: {}\n\n", self.question));
        output.push_str(&format!("Answer:\n{}\n\n", self.answer));
        output.push_str(&format!("Sources ({} chunks):\n", self.sources.len()));

        for (idx, source) in self.sources.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} (chunk {}, score {:.2})\n",
                idx + 1,
                source.source,
                source.chunk_index,
                source.score
            ));
        }

        output
    }
}
