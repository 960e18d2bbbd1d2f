use std::sync::Arc;

use crate::embedding::MiniLmEmbedder;
use crate::search::SearchEngine;
use crate::store::DocumentStore;

/// Shared handler state: the pipeline plus the embedder handle for readiness
/// reporting. Everything request-scoped lives inside `SearchEngine::search`.
pub struct HandlerState<D: DocumentStore + 'static> {
    pub engine: Arc<SearchEngine<D>>,
    pub embedder: Arc<MiniLmEmbedder>,
}

impl<D: DocumentStore + 'static> Clone for HandlerState<D> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            embedder: Arc::clone(&self.embedder),
        }
    }
}

impl<D: DocumentStore + 'static> HandlerState<D> {
    pub fn new(engine: Arc<SearchEngine<D>>, embedder: Arc<MiniLmEmbedder>) -> Self {
        Self { engine, embedder }
    }
}
