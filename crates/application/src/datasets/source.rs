//! Local dataset files.
//!
//! Every dataset is one CSV under `<data_dir>/<dataset id>/data.csv` with an
//! `id` and a `labels` column, plus either a `fold_id` column (k-fold
//! datasets) or a `split` column holding `train`/`test` (fixed-split
//! datasets). Other columns such as `sequence` are ignored.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use seqbench_domain::DatasetError;

/// File name of a dataset table inside its directory
pub const DATA_FILE_NAME: &str = "data.csv";

/// One row of a dataset table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataRow {
    pub id: String,
    pub labels: String,
    #[serde(default)]
    pub fold_id: Option<String>,
    #[serde(default)]
    pub split: Option<String>,
}

/// Path of a dataset's table below `data_dir`
pub fn data_file(data_dir: &Path, dataset: &str) -> PathBuf {
    let mut path = data_dir.to_path_buf();
    path.extend(dataset.split('/'));
    path.push(DATA_FILE_NAME);
    path
}

/// Read every row of a dataset table
#[instrument(fields(path = %path.display()))]
pub fn read_rows(path: &Path) -> Result<Vec<DataRow>, DatasetError> {
    let file = File::open(path).map_err(|e| DatasetError::DataUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for (row_num, row) in reader.deserialize::<DataRow>().enumerate() {
        let row = row.map_err(|e| DatasetError::DataUnavailable {
            path: path.to_path_buf(),
            reason: format!("Failed to parse CSV row {}: {}", row_num + 1, e),
        })?;
        rows.push(row);
    }

    debug!(rows = rows.len(), "Read dataset table");
    Ok(rows)
}

/// Whether a row's `fold_id` names `fold`. Integer-valued floats such as
/// `3.0` match fold `3`.
pub fn in_fold(row: &DataRow, fold: &str) -> bool {
    match row.fold_id.as_deref().map(str::trim) {
        Some(id) if id == fold => true,
        Some(id) => match (id.parse::<f64>(), fold.parse::<f64>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        },
        None => false,
    }
}
