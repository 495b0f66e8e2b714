use calamine::{open_workbook_auto, Data, Reader};
use log::{error, info};
use std::fmt;
use std::fs::File;
use std::path::Path;

use crate::error::{JobSearchError, Result};

/// One table cell. Only `Text` is treated as a string value by search.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(field.to_string())
        }
    }

    fn from_workbook(data: &Data) -> Self {
        match data {
            Data::String(s) if s.is_empty() => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::Empty => Cell::Empty,
            other => Cell::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Empty => Ok(()),
        }
    }
}

/// In-memory job table. Row identity is the row's position.
#[derive(Debug, Default, Clone)]
pub struct DatasetStore {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DatasetStore {
    /// Loads `path`, falling back to an empty table when it can't be read.
    /// The failure, if any, is handed back next to the (empty) store.
    pub fn load<P: AsRef<Path>>(path: P) -> (Self, Option<JobSearchError>) {
        match Self::open(path.as_ref()) {
            Ok(store) => (store, None),
            Err(e) => {
                error!("Could not load dataset {:?}: {}", path.as_ref(), e);
                (Self::default(), Some(e))
            }
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        std::fs::metadata(path_ref).map_err(|source| JobSearchError::FileAccess {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let is_excel = path_ref
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls"));

        let store = if is_excel {
            load_excel(path_ref)?
        } else {
            load_csv(path_ref)?
        };
        info!(
            "Loaded {} rows x {} columns from {:?}",
            store.row_count(),
            store.column_count(),
            path_ref
        );
        Ok(store)
    }

    /// Builds a store from memory. Short rows are padded with `Cell::Empty`.
    pub fn from_table(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, Cell::Empty);
                }
                row
            })
            .collect();
        DatasetStore { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| JobSearchError::ColumnNotFound(name.to_string()))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

fn load_csv(path: &Path) -> Result<DatasetStore> {
    let file = File::open(path).map_err(|source| JobSearchError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    // Fields and headers are kept exactly as written.
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::None)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::from_field).collect());
    }
    Ok(DatasetStore::from_table(headers, rows))
}

fn load_excel(path: &Path) -> Result<DatasetStore> {
    let mut workbook = open_workbook_auto(path)?;

    let Some((_name, range)) = workbook.worksheets().into_iter().next() else {
        return Err(JobSearchError::DatasetParse(format!("{:?} has no worksheets", path)));
    };

    let mut row_iter = range.rows();
    let headers: Vec<String> = match row_iter.next() {
        Some(header) => header.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => Vec::new(),
    };
    let rows = row_iter
        .map(|row| row.iter().map(Cell::from_workbook).collect())
        .collect();
    Ok(DatasetStore::from_table(headers, rows))
}
