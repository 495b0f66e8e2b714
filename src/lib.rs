pub mod conf;
pub mod dataset;
pub mod error;
pub mod extractor;
pub mod logger;
pub mod provider;
pub mod rank;
pub mod report;
pub mod salary;
pub mod search;
pub mod tasks;

// Exporting types for convenience
pub use conf::Settings;
pub use dataset::{Cell, DatasetStore};
pub use error::{JobSearchError, Result};
pub use extractor::Extractor;
pub use provider::{DemandPoint, ExternalJobRecord, ExternalSearch, JobProviderClient};
pub use salary::{IndeedSalaryScraper, SalaryLookupCache, SalarySource};
pub use search::{JobDetail, JobSearchIndex, SearchResult};
pub use tasks::{SearchTasks, TaskOutcome, TaskStatus};
