use log::{debug, info, warn};
use std::collections::HashSet;

use crate::dataset::DatasetStore;
use crate::error::{JobSearchError, Result};

/// Title column position, counted back from the last column.
pub const TITLE_OFFSET_FROM_END: usize = 8;

pub const DESCRIPTION_COLUMN: &str = "description1";
pub const SKILLS_COLUMN: &str = "skills req.";

pub const DESCRIPTION_FALLBACK: &str = "Description not available";
pub const SKILLS_FALLBACK: &str = "Skills not available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub index: usize,
    pub title: String,
}

impl SearchResult {
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        SearchResult { index, title: title.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetail {
    pub description: String,
    pub skills: String,
}

/// Whole-word keyword search over a loaded dataset.
pub struct JobSearchIndex<'a> {
    store: &'a DatasetStore,
}

impl<'a> JobSearchIndex<'a> {
    pub fn new(store: &'a DatasetStore) -> Self {
        JobSearchIndex { store }
    }

    pub fn title_column(&self) -> Result<usize> {
        let columns = self.store.column_count();
        columns
            .checked_sub(TITLE_OFFSET_FROM_END)
            .ok_or(JobSearchError::Schema { columns })
    }

    /// Rows whose title shares at least one whole word with `query`,
    /// compared case-insensitively, in table order.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        if self.store.is_empty() {
            return Ok(Vec::new());
        }
        let title_col = self.title_column()?;

        let wanted: HashSet<String> = query.split_whitespace().map(str::to_lowercase).collect();

        let mut matches = Vec::new();
        for row in 0..self.store.row_count() {
            let Some(title) = self.store.cell(row, title_col).and_then(|c| c.as_text()) else {
                continue;
            };
            if title
                .split_whitespace()
                .any(|word| wanted.contains(&word.to_lowercase()))
            {
                matches.push(SearchResult::new(row, title));
            }
        }

        info!("Query '{}' matched {} of {} rows", query, matches.len(), self.store.row_count());
        Ok(matches)
    }

    /// Description and skills for `row`. A missing column falls back to a
    /// placeholder for that field only.
    pub fn detail(&self, row: usize) -> Result<JobDetail> {
        if row >= self.store.row_count() {
            return Err(JobSearchError::InputValidation(format!(
                "row {} is outside the dataset ({} rows)",
                row,
                self.store.row_count()
            )));
        }

        let description = self.named_cell(row, DESCRIPTION_COLUMN, DESCRIPTION_FALLBACK);
        let skills = self.named_cell(row, SKILLS_COLUMN, SKILLS_FALLBACK);
        Ok(JobDetail { description, skills })
    }

    fn named_cell(&self, row: usize, column: &str, fallback: &str) -> String {
        match self.store.column_index(column) {
            Ok(col) => self
                .store
                .cell(row, col)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            Err(e) => {
                debug!("{}; using fallback", e);
                fallback.to_string()
            }
        }
    }
}

/// Resolves a 1-based selection typed by the user against `results`.
pub fn select<'r>(results: &'r [SearchResult], input: &str) -> Result<&'r SearchResult> {
    let number: usize = input.trim().parse().map_err(|_| {
        warn!("Rejected selection '{}'", input);
        JobSearchError::InputValidation("Please enter a valid number.".to_string())
    })?;

    number
        .checked_sub(1)
        .and_then(|i| results.get(i))
        .ok_or_else(|| JobSearchError::InputValidation("Please enter a valid job number.".to_string()))
}
