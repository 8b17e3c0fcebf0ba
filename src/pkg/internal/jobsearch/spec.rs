use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Listings keep a bounded description preview; full text stays with the provider.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSource {
    Platsbanken,
    Brainwille,
    Cinode,
}

impl JobSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::Platsbanken => "platsbanken",
            JobSource::Brainwille => "brainwille",
            JobSource::Cinode => "cinode",
        }
    }
}

impl std::fmt::Display for JobSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobSource {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "platsbanken" => Ok(JobSource::Platsbanken),
            "brainwille" => Ok(JobSource::Brainwille),
            "cinode" => Ok(JobSource::Cinode),
            other => Err(format!("unknown job source: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub published: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    pub source: JobSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(length(max = 200))]
    pub search_term: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub occupation: Option<String>,
    pub source: Option<JobSource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub source: JobSource,
    pub ok: bool,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub jobs: Vec<Job>,
    pub sources: Vec<SourceStatus>,
}

pub fn truncate_description(text: &str) -> String {
    let mut preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    if preview.chars().count() < text.chars().count() {
        preview.push_str("...");
    }
    preview
}

/// Providers publish dates in a handful of formats; anything unparsable
/// falls back to now so the merged sort never sees a missing timestamp.
pub fn parse_published(raw: Option<&str>) -> DateTime<Utc> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
