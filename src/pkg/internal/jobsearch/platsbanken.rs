use serde::Deserialize;
use standard_error::{Interpolate, StandardError};

use super::spec::{parse_published, truncate_description, Job, JobSource, SearchParams};
use crate::prelude::Result;

// Platsbanken's search API cannot scope to IT roles server-side, so hits are
// post-filtered against these keyword and occupation-group lists.
const RELEVANT_KEYWORDS: &[&str] = &[
    "utvecklare",
    "developer",
    "programmerare",
    "software engineer",
    "mjukvara",
    "systemutveckl",
    "frontend",
    "backend",
    "fullstack",
    "full stack",
    "devops",
    "java",
    "python",
    "javascript",
    "typescript",
    "c#",
    ".net",
    "cloud",
    "molntjänst",
    "kubernetes",
    "databas",
    "it-konsult",
    "it-arkitekt",
    "it-säkerhet",
    "testautomatiser",
    "embedded",
    "inbyggda system",
    "data engineer",
    "machine learning",
];

const RELEVANT_OCCUPATION_GROUPS: &[&str] = &[
    "mjukvaru- och systemutvecklare",
    "systemanalytiker och it-arkitekter",
    "it-säkerhetsspecialister",
    "systemtestare och testledare",
    "systemförvaltare",
    "drifttekniker, it",
    "supporttekniker, it",
    "övriga it-specialister",
];

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Hit {
    pub id: Option<String>,
    pub headline: Option<String>,
    pub employer: Option<Employer>,
    pub workplace_address: Option<WorkplaceAddress>,
    pub description: Option<Description>,
    pub application_details: Option<ApplicationDetails>,
    pub webpage_url: Option<String>,
    pub publication_date: Option<String>,
    pub salary_description: Option<String>,
    pub employment_type: Option<Label>,
    pub occupation: Option<Label>,
    pub occupation_group: Option<Label>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Employer {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WorkplaceAddress {
    pub municipality: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Description {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplicationDetails {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Label {
    pub label: Option<String>,
}

pub(super) async fn search(
    http: &reqwest::Client,
    base_url: &str,
    params: &SearchParams,
    limit: u32,
) -> Result<Vec<Job>> {
    let query = build_query(params);
    tracing::debug!("platsbanken query: {}", &query);
    let response = http
        .get(format!("{}/search", base_url))
        .query(&[("q", query.as_str()), ("limit", &limit.to_string())])
        .send()
        .await
        .map_err(|e| StandardError::new("ERR-SEARCH-010").interpolate_err(e.to_string()))?;
    if !response.status().is_success() {
        return Err(StandardError::new("ERR-SEARCH-011")
            .interpolate_err(format!("platsbanken returned {}", response.status())));
    }
    let body: SearchResponse = response
        .json()
        .await
        .map_err(|e| StandardError::new("ERR-SEARCH-012").interpolate_err(e.to_string()))?;
    Ok(body
        .hits
        .into_iter()
        .filter(is_relevant)
        .map(into_job)
        .collect())
}

// Trailing wildcard widens the match the same way the site's own search does.
fn build_query(params: &SearchParams) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in [&params.search_term, &params.occupation, &params.location] {
        if let Some(part) = part {
            let part = part.trim();
            if !part.is_empty() {
                parts.push(part);
            }
        }
    }
    format!("{}*", parts.join(" "))
}

fn is_relevant(hit: &Hit) -> bool {
    let group = hit
        .occupation_group
        .as_ref()
        .and_then(|g| g.label.as_deref())
        .unwrap_or_default()
        .to_lowercase();
    let blob = format!(
        "{} {} {} {}",
        hit.headline.as_deref().unwrap_or_default(),
        hit.description
            .as_ref()
            .and_then(|d| d.text.as_deref())
            .unwrap_or_default(),
        hit.occupation
            .as_ref()
            .and_then(|o| o.label.as_deref())
            .unwrap_or_default(),
        &group,
    )
    .to_lowercase();
    RELEVANT_KEYWORDS.iter().any(|kw| blob.contains(kw))
        || RELEVANT_OCCUPATION_GROUPS.iter().any(|g| group.contains(g))
}

fn into_job(hit: Hit) -> Job {
    let id = hit.id.unwrap_or_default();
    let location = hit
        .workplace_address
        .and_then(|addr| addr.municipality.or(addr.region))
        .unwrap_or_else(|| "Sverige".into());
    let url = hit
        .application_details
        .and_then(|details| details.url)
        .or(hit.webpage_url)
        .unwrap_or_else(|| {
            format!("https://arbetsformedlingen.se/platsbanken/annonser/{}", id)
        });
    Job {
        id: format!("platsbanken-{}", id),
        title: hit.headline.unwrap_or_default(),
        company: hit.employer.and_then(|e| e.name).unwrap_or_default(),
        location,
        description: truncate_description(
            hit.description
                .and_then(|d| d.text)
                .unwrap_or_default()
                .as_str(),
        ),
        url,
        published: parse_published(hit.publication_date.as_deref()),
        salary: hit.salary_description,
        employment_type: hit.employment_type.and_then(|e| e.label),
        source: JobSource::Platsbanken,
        positions: None,
        deadline: None,
        tags: Vec::new(),
    }
}
