//! JSON grids: an array of rows, each row an array of scalars.
//!
//! ```json
//! [["PrvaKolona", "DrugaKolona"], [1, "10"], [2, null]]
//! ```

use crate::error::{Result, SourceError};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tabela_table::CellValue;

/// Load a grid from a JSON file
pub fn read_json_path<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<CellValue>>> {
    let file = File::open(path.as_ref())?;
    read_json_reader(BufReader::new(file))
}

/// Load a grid from a JSON string
pub fn read_json_str(content: &str) -> Result<Vec<Vec<CellValue>>> {
    read_json_reader(content.as_bytes())
}

/// Load a grid from a reader containing a JSON array of arrays
pub fn read_json_reader<R: Read>(reader: R) -> Result<Vec<Vec<CellValue>>> {
    let value: Value = serde_json::from_reader(reader)
        .map_err(|e| SourceError::Parse(format!("Invalid JSON: {e}")))?;

    let rows = value
        .as_array()
        .ok_or_else(|| SourceError::Parse("JSON grid must be an array of rows".to_string()))?;

    rows.iter()
        .enumerate()
        .map(|(row_idx, row)| -> Result<Vec<CellValue>> {
            let cells = row.as_array().ok_or_else(|| {
                SourceError::Parse(format!("Row {row_idx} must be an array"))
            })?;
            cells
                .iter()
                .enumerate()
                .map(|(col_idx, cell)| json_value_to_cell(cell, row_idx, col_idx))
                .collect()
        })
        .collect()
}

/// Convert a grid to a JSON array of arrays
#[must_use]
pub fn to_json_value(grid: &[Vec<CellValue>]) -> Value {
    Value::Array(
        grid.iter()
            .map(|row| Value::Array(row.iter().map(cell_to_json_value).collect()))
            .collect(),
    )
}

fn json_value_to_cell(value: &Value, row: usize, col: usize) -> Result<CellValue> {
    Ok(match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        Value::String(s) => CellValue::String(s.clone()),
        Value::Array(_) | Value::Object(_) => {
            return Err(SourceError::Parse(format!(
                "Cell at row {row}, column {col} must be a scalar"
            )))
        }
    })
}

fn cell_to_json_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Int(i) => Value::Number((*i).into()),
        CellValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::String(s) => Value::String(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scalars() {
        let grid = read_json_str(r#"[["A", "B"], [1, 2.5], [null, true]]"#).unwrap();
        assert_eq!(grid[0], vec![CellValue::from("A"), CellValue::from("B")]);
        assert_eq!(grid[1], vec![CellValue::Int(1), CellValue::Float(2.5)]);
        assert_eq!(grid[2], vec![CellValue::Null, CellValue::Bool(true)]);
    }

    #[test]
    fn test_rejects_nested_cells() {
        let err = read_json_str(r#"[["A"], [[1]]]"#).unwrap_err();
        assert!(matches!(err, SourceError::Parse(msg) if msg.contains("row 1, column 0")));
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            read_json_str(r#"{"A": 1}"#),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(read_json_str(r#"[1]"#), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_to_json_value() {
        let grid = vec![vec![CellValue::from("A"), CellValue::Float(1.5), CellValue::Null]];
        assert_eq!(to_json_value(&grid).to_string(), r#"[["A",1.5,null]]"#);
    }
}
