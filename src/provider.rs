use log::{error, info, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::conf::Settings;
use crate::error::{JobSearchError, Result};
use crate::salary::{IndeedSalaryScraper, SalaryLookupCache, SalarySource};

pub const TITLE_PLACEHOLDER: &str = "Title not available";
pub const DESCRIPTION_PLACEHOLDER: &str = "Description not available";
pub const APPLY_LINK_PLACEHOLDER: &str = "Apply link not available";
pub const CITY_PLACEHOLDER: &str = "City not available";

/// Openings plotted against the first titles of a result set.
pub const DEMAND_OPENINGS: [u32; 8] = [10000, 8000, 12000, 6000, 9000, 4000, 7000, 9000];

#[derive(Debug, Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<RawJob>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
struct RawJob {
    job_title: Option<String>,
    job_description: Option<String>,
    job_apply_link: Option<String>,
    job_city: Option<String>,
}

impl RawJob {
    fn title(&self) -> String {
        self.job_title.clone().unwrap_or_else(|| TITLE_PLACEHOLDER.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalJobRecord {
    pub title: String,
    pub description: String,
    pub apply_link: String,
    pub city: String,
    pub salary_estimate: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandPoint {
    pub title: String,
    pub openings: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalSearch {
    Found {
        records: Vec<ExternalJobRecord>,
        demand: Vec<DemandPoint>,
    },
    NoResults,
    Cancelled,
}

/// JSearch (RapidAPI) client with its own salary cache.
pub struct JobProviderClient {
    client: Client,
    settings: Settings,
    salaries: SalaryLookupCache,
}

impl JobProviderClient {
    pub fn new(settings: Settings) -> Result<Self> {
        let scraper = IndeedSalaryScraper::new(&settings)?;
        Self::with_salary_source(settings, Box::new(scraper))
    }

    pub fn with_salary_source(settings: Settings, source: Box<dyn SalarySource>) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(JobProviderClient {
            client,
            settings,
            salaries: SalaryLookupCache::new(source),
        })
    }

    pub fn salaries(&self) -> &SalaryLookupCache {
        &self.salaries
    }

    /// Runs one JSearch query for `"<query> in canada"`. `choose_count` is
    /// asked how many of the N results to keep and may cancel with `None`.
    pub fn search_external<F>(&self, query: &str, choose_count: F) -> Result<ExternalSearch>
    where
        F: FnOnce(usize) -> Option<usize>,
    {
        let headers = self.auth_headers()?;

        let full_query = format!("{} in canada", query);
        info!("Searching JSearch for: '{}'", full_query);

        let resp = self
            .client
            .get(&self.settings.jsearch_url)
            .headers(headers)
            .query(&[("query", full_query.as_str()), ("page", "1"), ("num_pages", "1")])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("JSearch request failed: {}", e);
                JobSearchError::Transport(e)
            })?;

        let body = resp.text()?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| JobSearchError::Decode(e.to_string()))?;

        let raw = parsed.data.unwrap_or_default();
        if raw.is_empty() {
            info!("No jobs were found for '{}'", full_query);
            return Ok(ExternalSearch::NoResults);
        }

        let total = raw.len();
        let Some(count) = choose_count(total) else {
            info!("Count selection cancelled");
            return Ok(ExternalSearch::Cancelled);
        };
        if !(1..=total).contains(&count) {
            return Err(JobSearchError::InputValidation(format!(
                "count must be between 1 and {}, got {}",
                total, count
            )));
        }

        let records = raw
            .iter()
            .take(count)
            .map(|job| self.normalize(job))
            .collect();

        Ok(ExternalSearch::Found {
            records,
            demand: demand_series(&raw),
        })
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let Some(key) = self.settings.rapidapi_key.as_deref() else {
            warn!("RAPIDAPI_KEY is not set; skipping external search");
            return Err(JobSearchError::Configuration(
                "API key not found. Please set the RAPIDAPI_KEY environment variable.".to_string(),
            ));
        };

        let invalid = |what: &str| JobSearchError::Configuration(format!("{} is not a valid header value", what));
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-rapidapi-key",
            HeaderValue::from_str(key).map_err(|_| invalid("RAPIDAPI_KEY"))?,
        );
        headers.insert(
            "x-rapidapi-host",
            HeaderValue::from_str(&self.settings.rapidapi_host).map_err(|_| invalid("RAPIDAPI_HOST"))?,
        );
        Ok(headers)
    }

    fn normalize(&self, job: &RawJob) -> ExternalJobRecord {
        let title = job.title();
        let salary_estimate = self.salaries.estimate(&title);
        ExternalJobRecord {
            description: job
                .job_description
                .clone()
                .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string()),
            apply_link: job
                .job_apply_link
                .clone()
                .unwrap_or_else(|| APPLY_LINK_PLACEHOLDER.to_string()),
            city: job.job_city.clone().unwrap_or_else(|| CITY_PLACEHOLDER.to_string()),
            salary_estimate,
            title,
        }
    }
}

fn demand_series(raw: &[RawJob]) -> Vec<DemandPoint> {
    raw.iter()
        .zip(DEMAND_OPENINGS)
        .map(|(job, openings)| DemandPoint { title: job.title(), openings })
        .collect()
}
