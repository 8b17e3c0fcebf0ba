use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    pkg::{
        internal::jobsearch::{
            SearchJobs,
            spec::{SearchOutcome, SearchParams},
        },
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchOutcome>> {
    let outcome = state.jobsearch.search_jobs(&params).await?;
    tracing::info!(
        "search returned {} listings across {} sources",
        outcome.jobs.len(),
        outcome.sources.len()
    );
    Ok(Json(outcome))
}
