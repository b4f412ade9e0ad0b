use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tabela_table::{coerce, CellValue};

/// CSV reader/writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Whether to infer numbers and booleans when reading.
    /// Off by default: spreadsheet clients hand every cell over as text.
    pub infer_types: bool,
    /// Whether empty fields are read as `Null` instead of an empty string
    pub empty_as_null: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            infer_types: false,
            empty_as_null: false,
        }
    }
}

impl CsvOptions {
    /// Create options for TSV (tab-separated values)
    #[must_use]
    pub fn tsv() -> Self {
        CsvOptions {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to infer types
    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    /// Set whether empty fields become `Null`
    #[must_use]
    pub fn with_empty_as_null(mut self, empty_as_null: bool) -> Self {
        self.empty_as_null = empty_as_null;
        self
    }

    fn cell(&self, field: &str) -> CellValue {
        if self.infer_types {
            // `parse` already maps blank fields to Null. Numbers are only
            // inferred from numeric-looking text so that signed, padded and
            // exponent fields keep their text and still zero-fill.
            match CellValue::parse(field) {
                CellValue::Int(_) | CellValue::Float(_) if !coerce::is_numeric_str(field) => {
                    CellValue::String(field.to_string())
                }
                value => value,
            }
        } else if self.empty_as_null && field.is_empty() {
            CellValue::Null
        } else {
            CellValue::String(field.to_string())
        }
    }
}

/// Load a grid from a CSV file
pub fn read_csv_path<P: AsRef<Path>>(
    path: P,
    options: &CsvOptions,
) -> Result<Vec<Vec<CellValue>>> {
    let file = File::open(path.as_ref())?;
    read_csv_reader(BufReader::new(file), options)
}

/// Load a grid from a CSV string
pub fn read_csv_str(content: &str, options: &CsvOptions) -> Result<Vec<Vec<CellValue>>> {
    read_csv_reader(content.as_bytes(), options)
}

/// Load a grid from a reader. Every record becomes a row, the first one
/// included; rows are passed through with their own length.
pub fn read_csv_reader<R: Read>(
    reader: R,
    options: &CsvOptions,
) -> Result<Vec<Vec<CellValue>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .has_headers(false) // the header row is part of the grid
        .flexible(true)
        .from_reader(reader);

    let mut data: Vec<Vec<CellValue>> = Vec::new();
    let mut width: Option<usize> = None;

    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let expected = *width.get_or_insert(record.len());
        if record.len() != expected {
            tracing::warn!(row = index, expected, actual = record.len(), "ragged CSV row");
        }
        data.push(record.iter().map(|field| options.cell(field)).collect());
    }

    Ok(data)
}

/// Write a grid as CSV
pub fn write_csv<W: Write>(
    grid: &[Vec<CellValue>],
    writer: W,
    options: &CsvOptions,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .flexible(true)
        .from_writer(writer);

    for row in grid {
        let record: Vec<String> = row.iter().map(CellValue::as_str).collect();
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Convert a grid to a CSV string
pub fn to_csv_string(grid: &[Vec<CellValue>], options: &CsvOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(grid, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_keeps_text() {
        let grid =
            read_csv_str("PrvaKolona,DrugaKolona\n1,\n2,20\n", &CsvOptions::default()).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0][0], CellValue::from("PrvaKolona"));
        assert_eq!(grid[1][0], CellValue::from("1"));
        assert_eq!(grid[1][1], CellValue::from(""));
    }

    #[test]
    fn test_read_with_inference() {
        let options = CsvOptions::default().with_type_inference(true);
        let grid = read_csv_str("a,b\n1,2.5\n,true\n", &options).unwrap();
        assert_eq!(grid[1], vec![CellValue::Int(1), CellValue::Float(2.5)]);
        assert_eq!(grid[2], vec![CellValue::Null, CellValue::Bool(true)]);
    }

    #[test]
    fn test_inference_keeps_non_numeric_looking_numbers() {
        let options = CsvOptions::default().with_type_inference(true);
        let grid = read_csv_str("a,b,c,d\n+5, 7,1e3,-2\n", &options).unwrap();
        assert_eq!(
            grid[1],
            vec![
                CellValue::from("+5"),
                CellValue::from(" 7"),
                CellValue::from("1e3"),
                CellValue::from("-2"),
            ]
        );
    }

    #[test]
    fn test_empty_as_null() {
        let options = CsvOptions::default().with_empty_as_null(true);
        let grid = read_csv_str("a,b\n,x\n", &options).unwrap();
        assert_eq!(grid[1], vec![CellValue::Null, CellValue::from("x")]);
    }

    #[test]
    fn test_ragged_rows_pass_through() {
        let grid = read_csv_str("a,b,c\n1\n", &CsvOptions::default()).unwrap();
        assert_eq!(grid[1].len(), 1);
    }

    #[test]
    fn test_tsv() {
        let grid = read_csv_str("a\tb\n1\t2\n", &CsvOptions::tsv()).unwrap();
        assert_eq!(grid[1][1], CellValue::from("2"));
    }

    #[test]
    fn test_write_round_trip_text() {
        let grid = vec![
            vec![CellValue::from("Ime"), CellValue::from("Broj")],
            vec![CellValue::from("a, b"), CellValue::Float(3.0)],
        ];
        let out = to_csv_string(&grid, &CsvOptions::default()).unwrap();
        assert_eq!(out, "Ime,Broj\n\"a, b\",3\n");
    }
}
