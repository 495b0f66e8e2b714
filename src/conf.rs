use config::{Config, Environment};
use serde::Deserialize;
use std::time::Duration;

use crate::error::Result;

pub const DEFAULT_RAPIDAPI_HOST: &str = "jsearch.p.rapidapi.com";
pub const DEFAULT_JSEARCH_URL: &str = "https://jsearch.p.rapidapi.com/search";
pub const DEFAULT_SALARY_BASE_URL: &str = "https://www.indeed.com/cmp/salary";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// RapidAPI credential. Absent means external search is unavailable.
    #[serde(default)]
    pub rapidapi_key: Option<String>,
    pub rapidapi_host: String,
    pub jsearch_url: String,
    pub salary_base_url: String,
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Defaults overridden by `RAPIDAPI_KEY`, `RAPIDAPI_HOST`, `JSEARCH_URL`,
    /// `SALARY_BASE_URL` and `REQUEST_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::default())
    }

    /// Values are kept as strings; `config` converts them where a field
    /// needs a number, so digit-only credentials survive intact.
    pub fn from_environment(env: Environment) -> Result<Self> {
        let conf = Config::builder()
            .set_default("rapidapi_host", DEFAULT_RAPIDAPI_HOST)?
            .set_default("jsearch_url", DEFAULT_JSEARCH_URL)?
            .set_default("salary_base_url", DEFAULT_SALARY_BASE_URL)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .add_source(env)
            .build()?;
        let mut s: Settings = conf.try_deserialize()?;
        if s.rapidapi_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            s.rapidapi_key = None;
        }
        Ok(s)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.rapidapi_key = Some(key.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rapidapi_key: None,
            rapidapi_host: DEFAULT_RAPIDAPI_HOST.to_string(),
            jsearch_url: DEFAULT_JSEARCH_URL.to_string(),
            salary_base_url: DEFAULT_SALARY_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
