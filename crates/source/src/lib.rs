//! Cell-grid provider for tabela
//!
//! Loads the raw two-dimensional grid a [`tabela_table::Table`] is built
//! from. The grid comes back exactly as read: row 0 is the header row, no
//! columns are filtered and ragged rows are left alone.
//!
//! ```
//! use tabela_source::{read_csv_str, CsvOptions};
//! use tabela_table::Table;
//!
//! let csv = "PrvaKolona,DrugaKolona\n1,10\n2,20\n";
//! let grid = read_csv_str(csv, &CsvOptions::default()).unwrap();
//! let table = Table::from_cells(grid);
//! assert_eq!(table.aggregate_column("drugaKolona").unwrap().sum(), 30.0);
//! ```

mod csv;
mod error;
mod json;

use std::path::Path;
use tabela_table::CellValue;

/// Re-export CSV functions and options.
pub use crate::csv::{
    read_csv_path, read_csv_reader, read_csv_str, to_csv_string, write_csv, CsvOptions,
};
/// Re-export source error types.
pub use error::{Result, SourceError};
/// Re-export JSON functions.
pub use json::{read_json_path, read_json_reader, read_json_str, to_json_value};

/// Grid file formats understood by [`load_path`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFormat {
    Csv,
    Tsv,
    Json,
}

impl GridFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(GridFormat::Csv),
            "tsv" => Ok(GridFormat::Tsv),
            "json" => Ok(GridFormat::Json),
            _ => Err(SourceError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load a grid from a file, picking the reader by extension.
///
/// `options` applies to CSV and TSV files; the TSV delimiter always wins.
pub fn load_path<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Vec<Vec<CellValue>>> {
    let path = path.as_ref();
    let format = GridFormat::from_path(path)?;
    tracing::debug!(path = %path.display(), ?format, "loading grid");
    match format {
        GridFormat::Csv => read_csv_path(path, options),
        GridFormat::Tsv => read_csv_path(path, &options.clone().with_delimiter(b'\t')),
        GridFormat::Json => read_json_path(path),
    }
}
