//! The request pipeline: query building, candidate scoring, top-K selection.
//!
//! One [`SearchEngine::search`] call is one request: it validates the input,
//! resolves the buyer, embeds the composed query text exactly once, scans the
//! candidate collection page by page (resolving each candidate's seller
//! location inline), and selects the 10 best by composite score. Execution is
//! strictly sequential; every I/O failure is fatal for the request.

pub mod error;


pub use error::SearchError;

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::constants::DEFAULT_PAGE_SIZE;
use crate::embedding::MiniLmEmbedder;
use crate::ranking::{SelectionStrategy, TopK, rank_full};
use crate::scoring::{CandidateScorer, ScoredListing};
use crate::store::{DocumentStore, Location};

/// Per-deployment pipeline knobs (the historic deployment variants differed
/// in exactly these).
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Candidates fetched per page during the scan.
    pub page_size: usize,
    /// Break exact composite-score ties by ascending price.
    pub tie_break_by_price: bool,
    /// Top-K evaluation strategy.
    pub strategy: SelectionStrategy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            tie_break_by_price: true,
            strategy: SelectionStrategy::default(),
        }
    }
}

impl SearchOptions {
    /// Extracts the pipeline knobs from the service configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            tie_break_by_price: config.tie_break_by_price,
            strategy: config.strategy,
        }
    }
}

/// Query representation derived once per request.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// Embedding of the composed query text, reused for every candidate.
    pub vector: Vec<f32>,
    /// Buyer city, lowercased.
    pub buyer_city: String,
    /// Buyer province, lowercased.
    pub buyer_province: String,
}

/// The hybrid search pipeline over a document store and an embedder.
///
/// Nothing request-scoped lives on the engine; concurrent requests share only
/// the embedder and the store handle.
pub struct SearchEngine<D: DocumentStore> {
    embedder: Arc<MiniLmEmbedder>,
    store: D,
    options: SearchOptions,
}

impl<D: DocumentStore> SearchEngine<D> {
    pub fn new(embedder: Arc<MiniLmEmbedder>, store: D, options: SearchOptions) -> Self {
        Self {
            embedder,
            store,
            options,
        }
    }

    /// Returns the configured pipeline options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs one ranked search for `keyword` on behalf of buyer `uid`.
    ///
    /// Returns at most 10 results, best first; fewer when the candidate
    /// source holds fewer.
    pub async fn search(
        &self,
        keyword: &str,
        uid: &str,
    ) -> Result<Vec<ScoredListing>, SearchError> {
        if keyword.is_empty() {
            return Err(SearchError::InvalidQuery { field: "keyword" });
        }
        if uid.is_empty() {
            return Err(SearchError::InvalidQuery { field: "uid" });
        }

        let query = self.build_query(keyword, uid).await?;
        let scorer = CandidateScorer::new(
            query.vector,
            keyword,
            &query.buyer_city,
            &query.buyer_province,
        );

        let ranked = match self.options.strategy {
            SelectionStrategy::Streaming => {
                let mut selector = TopK::for_results();
                let scanned = self
                    .scan_candidates(&scorer, |scored| selector.push(scored))
                    .await?;
                debug!(scanned, retained = selector.len(), "Candidate scan complete");
                selector.into_ranked(self.options.tie_break_by_price)
            }
            SelectionStrategy::FullSort => {
                let mut all = Vec::new();
                let scanned = self
                    .scan_candidates(&scorer, |scored| all.push(scored))
                    .await?;
                debug!(scanned, "Candidate scan complete");
                rank_full(all, self.options.tie_break_by_price)
            }
        };

        info!(
            keyword,
            uid,
            results = ranked.len(),
            strategy = self.options.strategy.identifier(),
            "Search complete"
        );

        Ok(ranked)
    }

    /// Resolves the buyer and embeds the composed query text once.
    async fn build_query(&self, keyword: &str, uid: &str) -> Result<QueryContext, SearchError> {
        let buyer = self
            .store
            .fetch_buyer(uid)
            .await?
            .ok_or_else(|| SearchError::BuyerNotFound {
                uid: uid.to_string(),
            })?;

        let buyer_city = buyer.location.city.to_lowercase();
        let buyer_province = buyer.location.province.to_lowercase();

        // Literal concatenation: empty city/province still contribute their
        // separators, matching what the encoder was tuned on in production.
        let query_text = format!("{keyword} {buyer_city} {buyer_province}");

        debug!(uid, query_text = %query_text, "Composed query text");

        let vector = self.embedder.embed(&query_text)?;

        Ok(QueryContext {
            vector,
            buyer_city,
            buyer_province,
        })
    }

    /// Walks the candidate collection page by page, scoring each candidate
    /// and feeding it to `sink`. Returns the number of candidates scanned.
    async fn scan_candidates<F>(
        &self,
        scorer: &CandidateScorer,
        mut sink: F,
    ) -> Result<usize, SearchError>
    where
        F: FnMut(ScoredListing),
    {
        let mut cursor = None;
        let mut scanned = 0usize;

        loop {
            let page = self
                .store
                .fetch_listings_page(self.options.page_size, cursor)
                .await?;

            if page.candidates.is_empty() && page.next.is_none() {
                break;
            }

            for candidate in &page.candidates {
                let seller_location = self.resolve_seller_location(&candidate.seller_id).await?;
                sink(scorer.score(candidate, seller_location));
                scanned += 1;
            }

            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(scanned)
    }

    /// Looks up the candidate's seller location, degrading every absence
    /// (no seller id, no record, no location field) to empty fields.
    async fn resolve_seller_location(
        &self,
        seller_id: &Option<String>,
    ) -> Result<Location, SearchError> {
        let Some(seller_id) = seller_id else {
            return Ok(Location::default());
        };

        let seller = self.store.fetch_seller(seller_id).await?;
        Ok(seller
            .and_then(|s| s.location)
            .unwrap_or_default())
    }
}
