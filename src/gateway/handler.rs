use axum::{Json, extract::State};
use tracing::{debug, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{RankedListing, SearchRequest, SearchResponse};
use crate::gateway::state::HandlerState;
use crate::store::DocumentStore;

/// `POST /search`: ranks listings for a keyword on behalf of a buyer.
#[instrument(skip(state, request), fields(keyword = %request.keyword, uid = %request.uid))]
pub async fn search_handler<D>(
    State(state): State<HandlerState<D>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, GatewayError>
where
    D: DocumentStore + 'static,
{
    debug!("Processing search request");

    let ranked = state.engine.search(&request.keyword, &request.uid).await?;

    Ok(Json(SearchResponse {
        ranked_listings: ranked.into_iter().map(RankedListing::from).collect(),
    }))
}
