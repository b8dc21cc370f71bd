use axum::{extract::Query, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::flights::catalog::{search, Flight, SearchQuery};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Flight>,
}

pub fn flight_routes() -> Router<AppState> {
    Router::new().route("/search", get(search_flights))
}

#[instrument]
pub async fn search_flights(Query(query): Query<SearchQuery>) -> Json<SearchResponse> {
    Json(SearchResponse {
        results: search(&query),
    })
}
