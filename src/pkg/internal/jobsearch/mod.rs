pub mod brainwille;
pub mod cinode;
pub mod platsbanken;
pub mod spec;

use std::time::Duration;

use async_trait::async_trait;
use standard_error::{Interpolate, StandardError};
use validator::Validate;

use crate::{conf::settings, prelude::Result};
use self::spec::{Job, JobSource, SearchOutcome, SearchParams, SourceStatus};

#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub platsbanken_url: String,
    pub brainwille_url: String,
    pub cinode_url: String,
    pub cinode_token: String,
}

impl ProviderEndpoints {
    pub fn from_settings() -> Self {
        ProviderEndpoints {
            platsbanken_url: settings.platsbanken_url.clone(),
            brainwille_url: settings.brainwille_url.clone(),
            cinode_url: settings.cinode_url.clone(),
            cinode_token: settings.cinode_token.clone(),
        }
    }
}

/// One reqwest client is shared across providers; the timeout bounds every
/// adapter call so a slow provider cannot stall the whole aggregation.
#[derive(Debug, Clone)]
pub struct JobSearchClient {
    http: reqwest::Client,
    endpoints: ProviderEndpoints,
    limit: u32,
}

impl JobSearchClient {
    pub fn new(endpoints: ProviderEndpoints, limit: u32, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StandardError::new("ERR-SEARCH-001").interpolate_err(e.to_string()))?;
        Ok(JobSearchClient {
            http,
            endpoints,
            limit,
        })
    }

    pub fn from_settings() -> Result<Self> {
        JobSearchClient::new(
            ProviderEndpoints::from_settings(),
            settings.search_limit,
            Duration::from_secs(settings.provider_timeout_secs),
        )
    }

    async fn dispatch(&self, source: JobSource, params: &SearchParams) -> Result<Vec<Job>> {
        match source {
            JobSource::Platsbanken => {
                platsbanken::search(
                    &self.http,
                    &self.endpoints.platsbanken_url,
                    params,
                    self.limit,
                )
                .await
            }
            JobSource::Brainwille => {
                brainwille::search(&self.http, &self.endpoints.brainwille_url, params, self.limit)
                    .await
            }
            JobSource::Cinode => {
                cinode::search(
                    &self.http,
                    &self.endpoints.cinode_url,
                    &self.endpoints.cinode_token,
                    params,
                    self.limit,
                )
                .await
            }
        }
    }

    // Never errors: a failed provider becomes an ok=false status entry.
    async fn run_source(&self, source: JobSource, params: &SearchParams) -> (SourceStatus, Vec<Job>) {
        match self.dispatch(source, params).await {
            Ok(jobs) => {
                tracing::debug!("{} returned {} listings", source, jobs.len());
                (
                    SourceStatus {
                        source,
                        ok: true,
                        count: jobs.len(),
                        error: None,
                    },
                    jobs,
                )
            }
            Err(err) => {
                tracing::warn!("{} search failed: {}", source, &err);
                (
                    SourceStatus {
                        source,
                        ok: false,
                        count: 0,
                        error: Some(err.to_string()),
                    },
                    Vec::new(),
                )
            }
        }
    }
}

#[async_trait]
pub trait SearchJobs {
    async fn search_jobs(&self, params: &SearchParams) -> Result<SearchOutcome>;
}

#[async_trait]
impl SearchJobs for JobSearchClient {
    async fn search_jobs(&self, params: &SearchParams) -> Result<SearchOutcome> {
        params
            .validate()
            .map_err(|e| StandardError::new("ERR-SEARCH-002").interpolate_err(e.to_string()))?;
        let outcome = match params.source {
            Some(source) => {
                let contribution = self.run_source(source, params).await;
                merge(vec![contribution])
            }
            None => {
                let (a, b, c) = tokio::join!(
                    self.run_source(JobSource::Platsbanken, params),
                    self.run_source(JobSource::Brainwille, params),
                    self.run_source(JobSource::Cinode, params),
                );
                merge(vec![a, b, c])
            }
        };
        Ok(outcome)
    }
}

// Stable sort keeps dispatch order on equal timestamps.
fn merge(contributions: Vec<(SourceStatus, Vec<Job>)>) -> SearchOutcome {
    let mut sources = Vec::with_capacity(contributions.len());
    let mut jobs = Vec::new();
    for (status, mut contribution) in contributions {
        sources.push(status);
        jobs.append(&mut contribution);
    }
    jobs.sort_by(|a, b| b.published.cmp(&a.published));
    SearchOutcome { jobs, sources }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use mockito::{Matcher, Server, ServerGuard};
    use tracing_test::traced_test;

    use super::*;

    const PLATSBANKEN_BODY: &str = r#"{
        "hits": [
            {
                "id": "29000111",
                "headline": "Systemutvecklare .NET",
                "employer": {"name": "Nordkod AB"},
                "workplace_address": {"municipality": "Göteborg"},
                "description": {"text": "Utveckling av betalsystem i C#."},
                "publication_date": "2025-06-01T10:00:00",
                "occupation_group": {"label": "Mjukvaru- och systemutvecklare m.fl."}
            },
            {
                "id": "29000112",
                "headline": "Frontendutvecklare React",
                "employer": {"name": "Pixelbyrån"},
                "workplace_address": {"municipality": "Stockholm"},
                "description": {"text": "TypeScript och React i produktteam."},
                "publication_date": "2025-05-30T09:00:00"
            },
            {
                "id": "29000113",
                "headline": "Undersköterska till äldreboende",
                "description": {"text": "Omvårdnad och dokumentation."},
                "publication_date": "2025-06-03T07:00:00",
                "occupation_group": {"label": "Undersköterskor"}
            }
        ]
    }"#;

    const BRAINWILLE_BODY: &str = r#"{
        "jobs": [
            {
                "id": 5117,
                "title": "Fullstackutvecklare till myndighetsuppdrag",
                "client_name": "Brightbyte Consulting",
                "location": "Stockholm",
                "description": "React och .NET i team om sex.",
                "published_date": "2025-06-02T08:00:00",
                "positions": 2,
                "deadline": "2025-06-15"
            }
        ]
    }"#;

    const CINODE_BODY: &str = r#"{
        "result": [
            {
                "id": 880,
                "title": "Javautvecklare till bank",
                "companyName": "Nexer Group",
                "location": "Malmö",
                "description": "Backendutveckling i Java och Kafka.",
                "publishedDate": "2025-05-31T12:30:00",
                "skills": ["java", "kafka"]
            }
        ]
    }"#;

    fn test_client(server: &ServerGuard) -> JobSearchClient {
        JobSearchClient::new(
            ProviderEndpoints {
                platsbanken_url: server.url(),
                brainwille_url: server.url(),
                cinode_url: server.url(),
                cinode_token: "test-token".into(),
            },
            20,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn assert_sorted_desc(jobs: &[Job]) {
        for pair in jobs.windows(2) {
            assert!(pair[0].published >= pair[1].published);
        }
    }

    #[traced_test]
    #[tokio::test]
    async fn test_search_queries_all_sources() -> Result<()> {
        let mut server = Server::new_async().await;
        let platsbanken = server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("q".into(), "developer*".into()))
            .with_status(200)
            .with_body(PLATSBANKEN_BODY)
            .expect(1)
            .create_async()
            .await;
        let brainwille = server
            .mock("GET", "/api/v1/assignments")
            .with_status(200)
            .with_body(BRAINWILLE_BODY)
            .expect(1)
            .create_async()
            .await;
        let cinode = server
            .mock("GET", "/v0.9/market/search")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_body(CINODE_BODY)
            .expect(1)
            .create_async()
            .await;

        let params = SearchParams {
            search_term: Some("developer".into()),
            ..Default::default()
        };
        let outcome = test_client(&server).search_jobs(&params).await?;

        platsbanken.assert_async().await;
        brainwille.assert_async().await;
        cinode.assert_async().await;

        // the off-topic platsbanken hit is filtered out
        assert_eq!(outcome.jobs.len(), 4);
        assert_sorted_desc(&outcome.jobs);
        assert!(outcome.sources.iter().all(|s| s.ok));
        let ids: HashSet<&str> = outcome.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids.len(), outcome.jobs.len());
        assert_eq!(outcome.jobs[0].id, "brainwille-5117");
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_search_single_source_skips_others() -> Result<()> {
        let mut server = Server::new_async().await;
        let platsbanken = server
            .mock("GET", "/search")
            .expect(0)
            .create_async()
            .await;
        let brainwille = server
            .mock("GET", "/api/v1/assignments")
            .with_status(200)
            .with_body(BRAINWILLE_BODY)
            .expect(1)
            .create_async()
            .await;
        let cinode = server
            .mock("GET", "/v0.9/market/search")
            .expect(0)
            .create_async()
            .await;

        let params = SearchParams {
            source: Some(JobSource::Brainwille),
            ..Default::default()
        };
        let outcome = test_client(&server).search_jobs(&params).await?;

        platsbanken.assert_async().await;
        brainwille.assert_async().await;
        cinode.assert_async().await;

        assert_eq!(outcome.sources.len(), 1);
        assert!(outcome
            .jobs
            .iter()
            .all(|j| j.source == JobSource::Brainwille));
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_provider_failure_is_isolated() -> Result<()> {
        let mut server = Server::new_async().await;
        let _platsbanken = server
            .mock("GET", "/search")
            .with_status(200)
            .with_body(PLATSBANKEN_BODY)
            .create_async()
            .await;
        let _brainwille = server
            .mock("GET", "/api/v1/assignments")
            .with_status(200)
            .with_body(BRAINWILLE_BODY)
            .create_async()
            .await;
        let _cinode = server
            .mock("GET", "/v0.9/market/search")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let params = SearchParams {
            search_term: Some("developer".into()),
            ..Default::default()
        };
        let outcome = test_client(&server).search_jobs(&params).await?;

        assert_eq!(outcome.jobs.len(), 3);
        assert_sorted_desc(&outcome.jobs);
        let cinode_status = outcome
            .sources
            .iter()
            .find(|s| s.source == JobSource::Cinode)
            .unwrap();
        assert!(!cinode_status.ok);
        assert!(cinode_status.error.is_some());
        assert!(logs_contain("cinode search failed"));
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_all_providers_failing_still_resolves() -> Result<()> {
        let mut server = Server::new_async().await;
        let mut mocks = Vec::new();
        for path in ["/search", "/api/v1/assignments", "/v0.9/market/search"] {
            mocks.push(
                server
                    .mock("GET", path)
                    .with_status(503)
                    .create_async()
                    .await,
            );
        }

        let outcome = test_client(&server)
            .search_jobs(&SearchParams::default())
            .await?;

        assert!(outcome.jobs.is_empty());
        assert_eq!(outcome.sources.len(), 3);
        assert!(outcome.sources.iter().all(|s| !s.ok));
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_params_fail_fast() {
        let server = Server::new_async().await;
        let params = SearchParams {
            search_term: Some("x".repeat(500)),
            ..Default::default()
        };
        let result = test_client(&server).search_jobs(&params).await;
        assert!(result.is_err());
    }
}
