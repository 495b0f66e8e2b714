use log::{debug, info, warn};
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::conf::Settings;
use crate::error::Result;
use crate::extractor::Extractor;

pub const SALARY_NOT_FOUND: &str = "Salary not found";

const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Something that can produce a salary string for a job title. Implementations
/// never fail: errors are folded into a diagnostic string.
pub trait SalarySource: Send + Sync {
    fn lookup(&self, job_title: &str) -> String;
}

/// Scrapes a salary range from an Indeed salary page.
pub struct IndeedSalaryScraper {
    client: Client,
    extractor: Extractor,
    base_url: String,
}

impl IndeedSalaryScraper {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(settings.timeout())
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(IndeedSalaryScraper {
            client,
            extractor: Extractor::new(),
            base_url: settings.salary_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn salary_url(&self, job_title: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(job_title))
    }

    fn random_user_agent(&self) -> &'static str {
        let mut rng = rand::thread_rng();
        USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())]
    }

    fn fetch(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(url)
            .header(USER_AGENT, self.random_user_agent())
            .send()?
            .error_for_status()?
            .text()
    }
}

impl SalarySource for IndeedSalaryScraper {
    fn lookup(&self, job_title: &str) -> String {
        let url = self.salary_url(job_title);
        info!("Looking up salary: {}", url);

        match self.fetch(&url) {
            Ok(html) => match self.extractor.extract_salary(&html) {
                Some(salary) => salary,
                None => {
                    debug!("No salary marker on {}", url);
                    SALARY_NOT_FOUND.to_string()
                }
            },
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                format!("Error fetching salary: {}", e)
            }
        }
    }
}

/// Per-process salary memo keyed by exact job title. Entries are never
/// refreshed, including failed lookups.
pub struct SalaryLookupCache {
    source: Box<dyn SalarySource>,
    entries: Mutex<HashMap<String, Arc<OnceLock<String>>>>,
}

impl SalaryLookupCache {
    pub fn new(source: Box<dyn SalarySource>) -> Self {
        SalaryLookupCache {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn estimate(&self, job_title: &str) -> String {
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries
                .entry(job_title.to_string())
                .or_insert_with(|| Arc::new(OnceLock::new()))
                .clone()
        };

        // Concurrent callers for the same title block here until the first
        // lookup finishes.
        slot.get_or_init(|| self.source.lookup(job_title)).clone()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
