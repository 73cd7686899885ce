use std::io::Read;
use std::path::Path;

use thiserror::Error;

pub mod reader;
pub mod table;

use reader::{detect_delimiter, open_maybe_gz};
use table::parse_records;

use crate::model::item::ItemSet;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("duplicate item id {0}")]
    DuplicateId(u64),
}

/// Which columns carry the item id and display label. Every other numeric column is a
/// score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSchema {
    pub id_column: Option<String>,
    pub label_column: Option<String>,
}

impl ItemSchema {
    pub fn partition_log_v1() -> Self {
        Self {
            id_column: Some("MinimizeOrder".to_string()),
            label_column: Some("Conformation".to_string()),
        }
    }

    pub fn row_indexed() -> Self {
        Self {
            id_column: None,
            label_column: None,
        }
    }
}

impl Default for ItemSchema {
    fn default() -> Self {
        Self::partition_log_v1()
    }
}

pub fn load_table(path: &Path, schema: &ItemSchema) -> Result<ItemSet, InputError> {
    let reader = open_maybe_gz(path)?;
    let items = read_table(reader, detect_delimiter(path), schema)?;
    tracing::info!(
        path = %path.display(),
        n_items = items.len(),
        "loaded item table"
    );
    Ok(items)
}

pub fn read_table<R: Read>(
    reader: R,
    delimiter: u8,
    schema: &ItemSchema,
) -> Result<ItemSet, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let items = parse_records(&mut csv_reader, schema)?;
    if items.is_empty() {
        return Err(InputError::Parse("table has no data rows".to_string()));
    }
    ItemSet::new(items).map_err(InputError::DuplicateId)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
