use crate::cell::CellValue;
use crate::coerce;
use crate::column::Column;
use crate::error::{Result, TableError};
use crate::resolver::{self, Resolution};
use std::fmt;

/// Header substring (case-insensitive) that excludes a column from a table.
/// `subtotal` columns are covered by the same check.
const EXCLUDED_HEADER: &str = "total";

/// Number of rows (header included) and columns of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Key accepted by [`Table::get`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableKey {
    /// Column name, matched exactly against the header row
    Name(String),
    /// Row index (0 is the header row)
    Index(usize),
}

impl From<&str> for TableKey {
    fn from(name: &str) -> Self {
        TableKey::Name(name.to_string())
    }
}

impl From<String> for TableKey {
    fn from(name: String) -> Self {
        TableKey::Name(name)
    }
}

impl From<usize> for TableKey {
    fn from(index: usize) -> Self {
        TableKey::Index(index)
    }
}

/// A grid of cells whose first row holds the column names.
///
/// Columns whose header mentions "total" are dropped on construction. The
/// shape is fixed afterwards; cells can only be changed through
/// [`Table::set`]. Every operator returns a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    data: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create a table from a 2D vector of values
    #[must_use]
    pub fn new<T: Into<CellValue>>(grid: Vec<Vec<T>>) -> Self {
        let cells = grid
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::from_cells(cells)
    }

    /// Create a table from an already-typed grid
    #[must_use]
    pub fn from_cells(grid: Vec<Vec<CellValue>>) -> Self {
        Table {
            data: filter_columns(grid),
        }
    }

    // ===== Shape =====

    #[must_use]
    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.row_count(),
            cols: self.col_count(),
        }
    }

    /// Get the number of rows, header included
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Header row; empty for an empty table
    #[must_use]
    pub fn header(&self) -> &[CellValue] {
        self.data.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Every row after the header
    #[must_use]
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        self.data.get(1..).unwrap_or(&[])
    }

    /// The whole grid, header included
    #[must_use]
    pub fn data(&self) -> &[Vec<CellValue>] {
        &self.data
    }

    /// Check that both header rows are equal, in the same order
    #[must_use]
    pub fn headers_match(&self, other: &Table) -> bool {
        self.header() == other.header()
    }

    /// Check that both tables have the same row and column counts
    #[must_use]
    pub fn same_dimensions(&self, other: &Table) -> bool {
        self.shape() == other.shape()
    }

    // ===== Access =====

    /// Get an entire row by index (0 is the header row)
    pub fn row(&self, index: usize) -> Result<&[CellValue]> {
        self.data
            .get(index)
            .map(Vec::as_slice)
            .ok_or(TableError::RowIndexOutOfBounds {
                index,
                count: self.row_count(),
            })
    }

    /// Iterate over every cell in row-major order, header included
    pub fn cells(&self) -> impl Iterator<Item = &CellValue> + '_ {
        self.data.iter().flatten()
    }

    /// Look up a column by name or a row by index.
    ///
    /// Returns `None` when nothing matches; a missing key is not an error.
    #[must_use]
    pub fn get<K: Into<TableKey>>(&self, key: K) -> Option<Vec<CellValue>> {
        match key.into() {
            TableKey::Name(name) => self.get_by_name(&name),
            TableKey::Index(index) => self.get_by_index(index),
        }
    }

    /// Get a full column, header cell first, by exact header name
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<Vec<CellValue>> {
        let index = self.column_index(name)?;
        Some(
            self.data
                .iter()
                .map(|row| row.get(index).cloned().unwrap_or_default())
                .collect(),
        )
    }

    /// Get a row by index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<Vec<CellValue>> {
        self.data.get(index).cloned()
    }

    /// Overwrite the cell at `row` in the column named `column_name`.
    ///
    /// An unknown column name is silently ignored. A known column with a
    /// missing row is an error.
    pub fn set<T: Into<CellValue>>(
        &mut self,
        column_name: &str,
        row: usize,
        value: T,
    ) -> Result<()> {
        let Some(col) = self.column_index(column_name) else {
            tracing::debug!(column = column_name, row, "set on unknown column ignored");
            return Ok(());
        };

        let count = self.row_count();
        let cell = self
            .data
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(TableError::RowIndexOutOfBounds { index: row, count })?;
        *cell = value.into();
        Ok(())
    }

    /// First data row whose cell in `column_name` reads as `value`
    #[must_use]
    pub fn lookup_row_by_value(&self, column_name: &str, value: &str) -> Option<&[CellValue]> {
        let col = self.column_index(column_name)?;
        self.data_rows()
            .iter()
            .find(|row| row.get(col).is_some_and(|cell| cell.as_str() == value))
            .map(Vec::as_slice)
    }

    // ===== Column Requests =====

    /// Resolve a column request such as `prvaKolona` into a numeric column.
    ///
    /// Any `.sum`/`.avg` suffix is parsed but not applied; call
    /// [`Column::sum`] or [`Column::avg`] on the result.
    pub fn aggregate_column(&self, identifier: &str) -> Result<Column> {
        match resolver::resolve(self, identifier) {
            Resolution::Found(column) => Ok(column),
            Resolution::NotFound => Err(TableError::UnsupportedAccessor {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Resolve a column request and map every value
    pub fn map_column<F>(&self, identifier: &str, f: F) -> Result<Vec<f64>>
    where
        F: FnMut(f64) -> f64,
    {
        Ok(self.aggregate_column(identifier)?.iter().map(f).collect())
    }

    /// Whether `identifier` looks like a column request. Permissive.
    #[must_use]
    pub fn supports(&self, identifier: &str) -> bool {
        resolver::supports(identifier)
    }

    // ===== Operators =====

    /// Cell-wise sum of two tables with the same header and shape.
    ///
    /// Numeric pairs are added; any other pair keeps the left cell.
    pub fn add(&self, other: &Table) -> Result<Table> {
        self.combine(other, "add", |l, r| l + r)
    }

    /// Cell-wise difference of two tables with the same header and shape.
    ///
    /// Numeric pairs are subtracted; any other pair keeps the left cell.
    pub fn subtract_elementwise(&self, other: &Table) -> Result<Table> {
        self.combine(other, "subtract_elementwise", |l, r| l - r)
    }

    /// Rows of `self` that do not appear anywhere in `other`.
    ///
    /// Only the headers have to match; row counts may differ. Rows are
    /// compared with [`CellValue::same_value`], so a `NaN` row matches itself.
    pub fn subtract_rows(&self, other: &Table) -> Result<Table> {
        if !self.headers_match(other) {
            return Err(TableError::HeaderMismatch {
                operation: "subtract_rows",
            });
        }

        let Some(header) = self.data.first() else {
            return Ok(Table::default());
        };

        let mut data = Vec::with_capacity(self.row_count());
        data.push(header.clone());
        data.extend(
            self.data_rows()
                .iter()
                .filter(|row| {
                    !other
                        .data_rows()
                        .iter()
                        .any(|candidate| rows_equal(row, candidate))
                })
                .cloned(),
        );
        Ok(Table::from_cells(data))
    }

    fn combine<F>(&self, other: &Table, operation: &'static str, op: F) -> Result<Table>
    where
        F: Fn(f64, f64) -> f64,
    {
        if !(self.headers_match(other) && self.same_dimensions(other)) {
            return Err(TableError::ShapeMismatch {
                operation,
                left: self.shape(),
                right: other.shape(),
            });
        }

        let Some(header) = self.data.first() else {
            return Ok(Table::default());
        };

        let mut data = Vec::with_capacity(self.row_count());
        data.push(header.clone());
        for (left, right) in self.data_rows().iter().zip(other.data_rows()) {
            let row = left
                .iter()
                .zip(right)
                .map(|(l, r)| match (coerce::to_number(l), coerce::to_number(r)) {
                    (Some(a), Some(b)) => CellValue::Float(op(a, b)),
                    _ => l.clone(),
                })
                .collect();
            data.push(row);
        }
        Ok(Table::from_cells(data))
    }

    /// Index of the first header cell that equals `name` exactly
    fn column_index(&self, name: &str) -> Option<usize> {
        self.header()
            .iter()
            .position(|cell| matches!(cell, CellValue::String(s) if s == name))
    }
}

impl std::ops::Add<&Table> for &Table {
    type Output = Result<Table>;

    fn add(self, rhs: &Table) -> Self::Output {
        Table::add(self, rhs)
    }
}

/// Drop every column whose header mentions "total", keeping order.
///
/// Short rows read as `Null` in the kept columns.
fn rows_equal(left: &[CellValue], right: &[CellValue]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.same_value(r))
}

fn filter_columns(data: Vec<Vec<CellValue>>) -> Vec<Vec<CellValue>> {
    let Some(header) = data.first() else {
        return data;
    };
    if header.is_empty() {
        return data;
    }

    let keep: Vec<usize> = header
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| {
            let name = cell.as_str();
            if name.to_lowercase().contains(EXCLUDED_HEADER) {
                tracing::debug!(column = %name, index = i, "dropping total column");
                None
            } else {
                Some(i)
            }
        })
        .collect();

    data.into_iter()
        .map(|row| {
            keep.iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}
