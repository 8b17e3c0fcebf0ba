use serde::Deserialize;
use standard_error::{Interpolate, StandardError};

use super::spec::{parse_published, truncate_description, Job, JobSource, SearchParams};
use crate::prelude::Result;

// Broker marketplace for consultant assignments; already IT-scoped through
// the category tag, so no client-side relevance filter here.
const CATEGORY: &str = "it";

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub jobs: Vec<Assignment>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Assignment {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_date: Option<String>,
    pub assignment_type: Option<String>,
    pub positions: Option<i32>,
    pub deadline: Option<String>,
}

pub(super) async fn search(
    http: &reqwest::Client,
    base_url: &str,
    params: &SearchParams,
    limit: u32,
) -> Result<Vec<Job>> {
    let mut query: Vec<(&str, String)> = vec![
        ("query", params.search_term.clone().unwrap_or_default()),
        ("category", CATEGORY.into()),
        ("limit", limit.to_string()),
    ];
    if let Some(location) = &params.location {
        query.push(("location", location.clone()));
    }
    let response = http
        .get(format!("{}/api/v1/assignments", base_url))
        .query(&query)
        .send()
        .await
        .map_err(|e| StandardError::new("ERR-SEARCH-020").interpolate_err(e.to_string()))?;
    if !response.status().is_success() {
        return Err(StandardError::new("ERR-SEARCH-021")
            .interpolate_err(format!("brainwille returned {}", response.status())));
    }
    let body: SearchResponse = response
        .json()
        .await
        .map_err(|e| StandardError::new("ERR-SEARCH-022").interpolate_err(e.to_string()))?;
    Ok(body.jobs.into_iter().map(into_job).collect())
}

fn into_job(assignment: Assignment) -> Job {
    let id = assignment.id.unwrap_or_default();
    let url = assignment
        .url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| format!("https://www.brainwille.se/assignments/{}", id));
    Job {
        id: format!("brainwille-{}", id),
        title: assignment.title.unwrap_or_default(),
        company: assignment.client_name.unwrap_or_default(),
        location: assignment.location.unwrap_or_default(),
        description: truncate_description(assignment.description.as_deref().unwrap_or_default()),
        url,
        published: parse_published(assignment.published_date.as_deref()),
        salary: None,
        employment_type: assignment.assignment_type,
        source: JobSource::Brainwille,
        positions: assignment.positions,
        deadline: assignment.deadline,
        tags: Vec::new(),
    }
}
