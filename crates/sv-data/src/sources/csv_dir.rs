//! Stacks stored as a directory of CSV files, one slice per file

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use sv_core::ImageStack;
use tracing::{debug, info};

use crate::{DataError, Result};

/// Load one slice: every record is an image row, every field a pixel.
///
/// There is no header row. All rows must have the same number of fields.
pub fn load_csv_slice(path: &Path) -> Result<Array2<f64>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut values = Vec::new();
    let mut rows = 0;
    let mut cols = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        cols = record.len();
        for (column, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().map_err(|_| DataError::Parse {
                file: path.display().to_string(),
                row,
                column,
                value: field.to_string(),
            })?;
            values.push(value);
        }
        rows += 1;
    }

    if rows == 0 || cols == 0 {
        return Err(DataError::Empty(path.display().to_string()));
    }

    Array2::from_shape_vec((rows, cols), values)
        .map_err(|e| DataError::Csv(format!("{}: {}", path.display(), e)))
}

/// Load every `*.csv` file in `dir`, sorted by file name, as one stack
pub fn load_csv_dir(dir: &Path) -> Result<ImageStack> {
    let files = csv_files(dir)?;
    if files.is_empty() {
        return Err(DataError::Empty(dir.display().to_string()));
    }

    let mut slices = Vec::with_capacity(files.len());
    for file in &files {
        debug!("loading slice {}", file.display());
        slices.push(load_csv_slice(file)?);
    }

    let stack = ImageStack::from_slices(slices)?;
    let (rows, cols) = stack.slice_shape();
    info!(
        "loaded {} slices of {}x{} from {}",
        stack.len(),
        rows,
        cols,
        dir.display()
    );
    Ok(stack)
}

fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
