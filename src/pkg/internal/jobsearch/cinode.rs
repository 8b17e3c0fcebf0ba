use serde::Deserialize;
use standard_error::{Interpolate, StandardError};

use super::spec::{parse_published, truncate_description, Job, JobSource, SearchParams};
use crate::prelude::Result;

// The market endpoint is queried with a fixed skills filter; results come
// back pre-scoped so only mapping is needed.
const SKILLS_FILTER: &str = "java,python,csharp,javascript,devops";

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub result: Vec<Listing>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Listing {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_date: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

pub(super) async fn search(
    http: &reqwest::Client,
    base_url: &str,
    token: &str,
    params: &SearchParams,
    limit: u32,
) -> Result<Vec<Job>> {
    let mut query: Vec<(&str, String)> = vec![
        ("term", params.search_term.clone().unwrap_or_default()),
        ("skills", SKILLS_FILTER.into()),
        ("limit", limit.to_string()),
    ];
    if let Some(location) = &params.location {
        query.push(("location", location.clone()));
    }
    let response = http
        .get(format!("{}/v0.9/market/search", base_url))
        .bearer_auth(token)
        .query(&query)
        .send()
        .await
        .map_err(|e| StandardError::new("ERR-SEARCH-030").interpolate_err(e.to_string()))?;
    if !response.status().is_success() {
        return Err(StandardError::new("ERR-SEARCH-031")
            .interpolate_err(format!("cinode returned {}", response.status())));
    }
    let body: SearchResponse = response
        .json()
        .await
        .map_err(|e| StandardError::new("ERR-SEARCH-032").interpolate_err(e.to_string()))?;
    Ok(body.result.into_iter().map(into_job).collect())
}

fn into_job(listing: Listing) -> Job {
    let id = listing.id.unwrap_or_default();
    let url = listing
        .url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| format!("https://app.cinode.market/announcements/{}", id));
    Job {
        id: format!("cinode-{}", id),
        title: listing.title.unwrap_or_default(),
        company: listing.company_name.unwrap_or_default(),
        location: listing.location.unwrap_or_default(),
        description: truncate_description(listing.description.as_deref().unwrap_or_default()),
        url,
        published: parse_published(listing.published_date.as_deref()),
        salary: None,
        employment_type: None,
        source: JobSource::Cinode,
        positions: None,
        deadline: None,
        tags: listing.skills,
    }
}
