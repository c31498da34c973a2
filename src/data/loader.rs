// ============================================================
// Layer 4 — Review CSV Loader
// ============================================================
// Reads the labelled review dataset from a CSV file.
//
// Expected layout (extra columns are ignored):
//
//   text,sentiment
//   "Great tacos, friendly staff",1
//   "Cold fries.",0
//
// Sentiment values:
//   - numbers: non-zero → positive (1, 0, 1.0, 0.0)
//   - booleans: true / false, any case
//   - anything else makes the row malformed
//
// The whole file is read once. Any problem (missing file,
// missing column, bad row) aborts with a DataLoadError — a
// lesson cannot be graded on partial data.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs::File, io::Read, path::Path};

use crate::domain::error::DataLoadError;
use crate::domain::example::Example;

const TEXT_COLUMN:      &str = "text";
const SENTIMENT_COLUMN: &str = "sentiment";

/// Loads labelled examples from a CSV file on disk.
pub struct CsvLoader {
    path: String,
}

impl CsvLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Read every row of the file, in file order.
    pub fn load_all(&self) -> Result<Vec<Example>, DataLoadError> {
        let file = File::open(Path::new(&self.path)).map_err(|source| DataLoadError::Unreadable {
            path: self.path.clone().into(),
            source,
        })?;

        let examples = read_examples(file)?;
        tracing::info!("Loaded {} examples from '{}'", examples.len(), self.path);
        Ok(examples)
    }
}

/// Parse examples from any CSV reader with a header row.
pub fn read_examples<R: Read>(reader: R) -> Result<Vec<Example>, DataLoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    // Locate the two required columns by header name
    let headers   = rdr.headers()?.clone();
    let text_idx  = column_index(&headers, TEXT_COLUMN)?;
    let label_idx = column_index(&headers, SENTIMENT_COLUMN)?;

    let mut examples = Vec::new();

    for (i, record) in rdr.records().enumerate() {
        // Row numbers in messages are 1-based and skip the header
        let row    = i + 1;
        let record = record?;

        let text = record
            .get(text_idx)
            .ok_or_else(|| malformed(row, "missing text field"))?;
        let raw = record
            .get(label_idx)
            .ok_or_else(|| malformed(row, "missing sentiment field"))?;

        let sentiment = parse_sentiment(raw)
            .ok_or_else(|| malformed(row, &format!("cannot read sentiment '{raw}'")))?;

        examples.push(Example::new(text, sentiment));
    }

    Ok(examples)
}

fn column_index(headers: &csv::StringRecord, column: &'static str) -> Result<usize, DataLoadError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or(DataLoadError::MissingColumn { column })
}

fn malformed(row: usize, reason: &str) -> DataLoadError {
    DataLoadError::MalformedRow { row, reason: reason.to_string() }
}

/// Truthiness of a sentiment cell.
fn parse_sentiment(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .map(|v| v != 0.0)
}
