//! # tabela-cli
//!
//! Command-line interface for tabela: loads spreadsheet grids from CSV/TSV or
//! JSON files and runs table operations on them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tabela_source::{load_path, to_csv_string, to_json_value, CsvOptions};
use tabela_table::{CellValue, ColumnRequest, Table};
use tracing_subscriber::EnvFilter;

/// tabela - named-column access and arithmetic over spreadsheet grids
#[derive(Parser)]
#[command(name = "tabela")]
#[command(author, version, about = "Table operations over spreadsheet grids", long_about = None)]
struct Cli {
    /// Output format (json, csv, table)
    #[arg(short = 'f', long = "format", default_value = "table", global = true)]
    format: OutputFormat,

    /// Infer numbers and booleans when reading CSV files
    #[arg(long = "infer-types", global = true)]
    infer_types: bool,

    /// Read empty CSV fields as absent cells
    #[arg(long = "empty-as-null", global = true)]
    empty_as_null: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the table (total columns removed)
    Show { file: PathBuf },
    /// Print every cell in row-major order
    Cells { file: PathBuf },
    /// Print one row (0 is the header row)
    Row { file: PathBuf, index: usize },
    /// Print a column by its exact header name
    Column { file: PathBuf, name: String },
    /// Resolve a column request such as `prvaKolona` or `drugaKolona.avg`
    Aggregate { file: PathBuf, identifier: String },
    /// Overwrite one cell and print the resulting table
    Set {
        file: PathBuf,
        column: String,
        row: usize,
        value: String,
    },
    /// Find the first row whose cell in COLUMN reads as VALUE
    Lookup {
        file: PathBuf,
        column: String,
        value: String,
    },
    /// Cell-wise sum of two tables
    Add { left: PathBuf, right: PathBuf },
    /// Cell-wise difference of two tables, or row difference with --rows
    Subtract {
        left: PathBuf,
        right: PathBuf,
        /// Keep the rows of LEFT that do not appear in RIGHT
        #[arg(long)]
        rows: bool,
    },
    /// Walk through the common operations on one grid
    Demo { file: PathBuf },
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Aligned table output (default)
    #[default]
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let options = CsvOptions::default()
        .with_type_inference(cli.infer_types)
        .with_empty_as_null(cli.empty_as_null);
    let format = cli.format;

    match cli.command {
        Command::Show { file } => {
            let table = load_table(&file, &options)?;
            print_grid(table.data(), format)
        }
        Command::Cells { file } => {
            let table = load_table(&file, &options)?;
            let cells: Vec<CellValue> = table.cells().cloned().collect();
            print_cells(&cells, format)
        }
        Command::Row { file, index } => {
            let table = load_table(&file, &options)?;
            let row = table.row(index)?;
            print_cells(row, format)
        }
        Command::Column { file, name } => {
            let table = load_table(&file, &options)?;
            match table.get(name.as_str()) {
                Some(column) => print_cells(&column, format),
                None => {
                    println!("{} no column named '{}'", "Not found:".yellow(), name);
                    Ok(())
                }
            }
        }
        Command::Aggregate { file, identifier } => {
            let table = load_table(&file, &options)?;
            run_aggregate(&table, &identifier, format)
        }
        Command::Set {
            file,
            column,
            row,
            value,
        } => {
            let mut table = load_table(&file, &options)?;
            table.set(&column, row, value)?;
            print_grid(table.data(), format)
        }
        Command::Lookup {
            file,
            column,
            value,
        } => {
            let table = load_table(&file, &options)?;
            match table.lookup_row_by_value(&column, &value) {
                Some(row) => print_cells(row, format),
                None => {
                    println!("{} no row with {} = '{}'", "Not found:".yellow(), column, value);
                    Ok(())
                }
            }
        }
        Command::Add { left, right } => {
            let left = load_table(&left, &options)?;
            let right = load_table(&right, &options)?;
            print_grid(left.add(&right)?.data(), format)
        }
        Command::Subtract { left, right, rows } => {
            let left = load_table(&left, &options)?;
            let right = load_table(&right, &options)?;
            let result = if rows {
                left.subtract_rows(&right)?
            } else {
                left.subtract_elementwise(&right)?
            };
            print_grid(result.data(), format)
        }
        Command::Demo { file } => run_demo(&file, &options),
    }
}

/// Load a grid file and build a table from it.
fn load_table(path: &Path, options: &CsvOptions) -> Result<Table> {
    let grid = load_path(path, options)
        .with_context(|| format!("Failed to load grid: {}", path.display()))?;
    let table = Table::from_cells(grid);
    tracing::info!(path = %path.display(), shape = %table.shape(), "loaded table");
    Ok(table)
}

/// Resolve a column request and print the aggregates.
///
/// The resolver never applies a `.sum`/`.avg` suffix itself, so the CLI reads
/// it off the parsed request and applies it here.
fn run_aggregate(table: &Table, identifier: &str, format: OutputFormat) -> Result<()> {
    let column = table.aggregate_column(identifier)?;
    let requested = ColumnRequest::parse(identifier).and_then(|r| r.aggregate());

    let mut pairs = Vec::new();
    match requested {
        Some(aggregate) => pairs.push((aggregate.to_string(), column.aggregate(aggregate))),
        None => {
            pairs.push(("sum".to_string(), column.sum()));
            pairs.push(("avg".to_string(), column.avg()));
        }
    }

    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = pairs
                .into_iter()
                .map(|(k, v)| (k, serde_json::json!(v)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Csv | OutputFormat::Table => {
            for (name, value) in pairs {
                println!("{name}: {value}");
            }
        }
    }
    Ok(())
}

/// Run the full tour of operations on one grid.
fn run_demo(path: &Path, options: &CsvOptions) -> Result<()> {
    let mut table = load_table(path, options)?;
    let other = table.clone();

    println!("{}", "Row 1:".cyan().bold());
    match table.row(1) {
        Ok(row) => println!("{}", format_cells(row)),
        Err(e) => println!("{} {e}", "Skipped:".yellow()),
    }

    println!("{}", "All cells:".cyan().bold());
    let cells: Vec<CellValue> = table.cells().cloned().collect();
    println!("{}", format_cells(&cells));

    let Some(first) = table.header().first().map(CellValue::as_str) else {
        println!("(empty table)");
        return Ok(());
    };

    println!("{} {}", "Column by name:".cyan().bold(), first);
    if let Some(column) = table.get(first.as_str()) {
        println!("{}", format_cells(&column));
    }

    if table.row_count() > 1 {
        table.set(&first, 1, "2556")?;
        println!("{}", "After set:".cyan().bold());
        let cells: Vec<CellValue> = table.cells().cloned().collect();
        println!("{}", format_cells(&cells));
    }

    let requests: Vec<String> = table
        .header()
        .iter()
        .map(CellValue::as_str)
        .filter(|name| table.supports(name))
        .collect();
    for name in &requests {
        match table.aggregate_column(name) {
            Ok(column) => {
                println!(
                    "{} {}: sum {}, avg {}",
                    "Aggregates".cyan().bold(),
                    name,
                    column.sum(),
                    column.avg()
                );
                let incremented = table.map_column(name, |v| v + 1.0)?;
                println!("  +1: {incremented:?}");
            }
            Err(e) => println!("{} {e}", "Skipped:".yellow()),
        }
    }

    println!("{}", "Sum with the original table:".cyan().bold());
    print_grid(table.add(&other)?.data(), OutputFormat::Table)
}

fn print_grid(grid: &[Vec<CellValue>], format: OutputFormat) -> Result<()> {
    if grid.is_empty() {
        println!("(empty table)");
        return Ok(());
    }

    match format {
        OutputFormat::Table => print!("{}", render_table(grid)),
        OutputFormat::Csv => print!("{}", to_csv_string(grid, &CsvOptions::default())?),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&to_json_value(grid))?);
        }
    }
    Ok(())
}

fn print_cells(cells: &[CellValue], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(cells)?);
        }
        OutputFormat::Csv => {
            print!("{}", to_csv_string(&[cells.to_vec()], &CsvOptions::default())?);
        }
        OutputFormat::Table => println!("{}", format_cells(cells)),
    }
    Ok(())
}

fn format_cells(cells: &[CellValue]) -> String {
    let parts: Vec<String> = cells.iter().map(format_cell).collect();
    format!("[{}]", parts.join(", "))
}

fn format_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => "null".to_string(),
        CellValue::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}

/// Render a grid with padded columns; the header row is highlighted.
fn render_table(grid: &[Vec<CellValue>]) -> String {
    let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for row in grid {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.as_str().chars().count());
        }
    }

    let mut out = String::new();
    for (row_idx, row) in grid.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell.as_str(), width = widths[i]))
            .collect();
        let line = line.join(" | ");
        if row_idx == 0 {
            out.push_str(&format!("{}\n", line.bold()));
        } else {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
