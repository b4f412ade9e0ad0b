//! Table/Column module for tabela
//!
//! Treats a pre-fetched spreadsheet grid as a lightweight table: named column
//! access, per-column numeric aggregates, cell writes by column name, and
//! cell-wise arithmetic between tables of the same shape.
//!
//! # Examples
//!
//! ## Building a table
//!
//! ```
//! use tabela_table::{CellValue, Table};
//!
//! let table = Table::new(vec![
//!     vec!["PrvaKolona", "DrugaKolona", "Total"],
//!     vec!["1", "10", "11"],
//!     vec!["2", "20", "22"],
//! ]);
//!
//! // "Total" columns never make it into a table
//! assert_eq!(table.col_count(), 2);
//! assert_eq!(table.row(1).unwrap()[1], CellValue::from("10"));
//! ```
//!
//! ## Column requests
//!
//! ```
//! use tabela_table::{Table, TableError};
//!
//! let table = Table::new(vec![
//!     vec!["PrvaKolona", "DrugaKolona"],
//!     vec!["1", "10"],
//!     vec!["2", "20"],
//! ]);
//!
//! assert_eq!(table.aggregate_column("prvaKolona").unwrap().sum(), 3.0);
//! assert_eq!(table.aggregate_column("drugaKolona").unwrap().avg(), 15.0);
//! assert!(matches!(
//!     table.aggregate_column("treca"),
//!     Err(TableError::UnsupportedAccessor { .. })
//! ));
//! ```
//!
//! ## Table arithmetic
//!
//! ```
//! use tabela_table::{CellValue, Table};
//!
//! let table = Table::new(vec![vec!["Ime", "Broj"], vec!["a", "2"]]);
//! let doubled = table.add(&table).unwrap();
//! assert_eq!(doubled.row(1).unwrap()[1], CellValue::Float(4.0));
//!
//! let nothing_left = table.subtract_rows(&table).unwrap();
//! assert_eq!(nothing_left.row_count(), 1);
//! ```

mod cell;
pub mod coerce;
mod column;
mod error;
pub mod resolver;
mod table;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export column types.
pub use column::{Aggregate, Column};
/// Re-export table error types.
pub use error::{Result, TableError};
/// Re-export column request types.
pub use resolver::{ColumnRequest, Resolution, COLUMN_MARKER};
/// Re-export table types.
pub use table::{Shape, Table, TableKey};
