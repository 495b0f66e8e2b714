use job_finder_lib::{logger, rank, report, search};
use job_finder_lib::{DatasetStore, ExternalSearch, JobProviderClient, JobSearchIndex, SearchTasks, Settings};

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "job-finder", version, about = "Search job listings locally or through JSearch")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Keyword search over a CSV or Excel job dataset
    Local {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        query: String,
        /// Sort matches by title
        #[arg(long)]
        sort: bool,
        /// Show details for the n-th listed match (1-based)
        #[arg(long)]
        select: Option<String>,
    },
    /// Search JSearch (needs RAPIDAPI_KEY) and estimate salaries
    Remote {
        #[arg(short, long)]
        query: String,
        /// How many results to show; prompts when omitted
        #[arg(short, long)]
        count: Option<usize>,
        /// Write the demand chart series to this CSV file
        #[arg(long)]
        chart: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Local { file, query, sort, select } => run_local(file, &query, sort, select.as_deref()),
        Command::Remote { query, count, chart } => run_remote(query, count, chart),
    }
}

fn run_local(file: PathBuf, query: &str, sort: bool, selection: Option<&str>) -> Result<(), Box<dyn Error>> {
    let (store, load_error) = DatasetStore::load(&file);
    if let Some(e) = load_error {
        eprintln!("File Error: {}", e);
    }

    let index = JobSearchIndex::new(&store);
    let mut results = index.search(&query.to_lowercase())?;
    if results.is_empty() {
        println!("This job is currently unavailable in our data.");
        return Ok(());
    }
    if sort {
        results = rank::sort(results);
    }
    print!("{}", report::listing(&results));

    if let Some(input) = selection {
        match search::select(&results, input) {
            Ok(chosen) => {
                let detail = index.detail(chosen.index)?;
                println!("\n{}", report::detail_text(&chosen.title, &detail));
            }
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

fn run_remote(query: String, count: Option<usize>, chart: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;
    let client = Arc::new(JobProviderClient::new(settings)?);
    let tasks = SearchTasks::new(client);

    let (id, rx) = tasks.submit(query.to_lowercase(), move |found| count.or_else(|| prompt_count(found)));
    info!("Submitted search task {}", id);

    let outcome = rx.recv()?;
    tasks.forget(&outcome.id);
    match outcome.result {
        Ok(ExternalSearch::Found { records, demand }) => {
            println!("{}", report::external_text(&records));
            if let Some(path) = chart {
                report::demand_csv(&demand, File::create(&path)?)?;
                info!("Wrote demand series to {:?}", path);
            }
        }
        Ok(ExternalSearch::NoResults) => println!("No jobs were found for your query."),
        Ok(ExternalSearch::Cancelled) => warn!("Search cancelled."),
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    }
    Ok(())
}

/// Asks on stdin how many of `found` results to show. Blank input cancels.
fn prompt_count(found: usize) -> Option<usize> {
    let stdin = io::stdin();
    loop {
        print!("We found {} jobs. How many do you want to see? [1-{}] ", found, found);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        let answer = line.trim();
        if answer.is_empty() {
            return None;
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=found).contains(&n) => return Some(n),
            _ => eprintln!("Please enter a number between 1 and {}.", found),
        }
    }
}
