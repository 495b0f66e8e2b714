//! Text renderings handed to whatever front end displays results.

use std::io::{self, Write};

use crate::error::Result;
use crate::provider::{DemandPoint, ExternalJobRecord};
use crate::search::{JobDetail, SearchResult};

/// `"{n} - {title}"` per result, numbered from 1.
pub fn listing(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{} - {}\n", i + 1, r.title))
        .collect()
}

pub fn detail_text(title: &str, detail: &JobDetail) -> String {
    format!(
        "Title: {}\nDescription: {}\nSkills Required: {}",
        title, detail.description, detail.skills
    )
}

pub fn external_text(records: &[ExternalJobRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "Title: {}\nDescription: {}\nSalary Estimate: {}\nApply Link: {}\nCity: {}\n\n",
                r.title, r.description, r.salary_estimate, r.apply_link, r.city
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the demand series as `title,openings` CSV.
pub fn demand_csv<W: Write>(demand: &[DemandPoint], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["title", "openings"]).map_err(io::Error::from)?;
    for point in demand {
        let openings = point.openings.to_string();
        wtr.write_record([point.title.as_str(), openings.as_str()])
            .map_err(io::Error::from)?;
    }
    wtr.flush()?;
    Ok(())
}
