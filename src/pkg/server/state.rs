use std::sync::Arc;

use crate::{pkg::internal::jobsearch::JobSearchClient, prelude::Result};

#[derive(Debug, Clone)]
pub struct AppState {
    pub jobsearch: Arc<JobSearchClient>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        Ok(AppState {
            jobsearch: Arc::new(JobSearchClient::from_settings()?),
        })
    }
}
