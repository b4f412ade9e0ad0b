//! Column requests: turning an identifier such as `prvaKolona` or
//! `drugaKolona.avg` into a live [`Column`].
//!
//! An identifier is only treated as a column request when it carries the
//! [`COLUMN_MARKER`]. The header lookup is case-insensitive and the first
//! matching header wins.

use crate::coerce;
use crate::column::{Aggregate, Column};
use crate::table::Table;

/// Substring that marks an identifier as a column request
pub const COLUMN_MARKER: &str = "Kolona";

/// A parsed column request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRequest {
    name: String,
    aggregate: Option<Aggregate>,
}

impl ColumnRequest {
    /// Parse an identifier. Returns `None` when the marker is absent.
    ///
    /// The identifier is split at the first `.sum` or `.avg` that has a
    /// non-empty name in front of it; that part is the column name.
    #[must_use]
    pub fn parse(identifier: &str) -> Option<Self> {
        if !identifier.contains(COLUMN_MARKER) {
            return None;
        }

        let split = [Aggregate::Sum, Aggregate::Avg]
            .into_iter()
            .filter_map(|agg| {
                identifier
                    .match_indices(agg.suffix())
                    .map(|(pos, _)| pos)
                    .find(|&pos| pos > 0)
                    .map(|pos| (pos, agg))
            })
            .min_by_key(|(pos, _)| *pos);

        let (name, aggregate) = match split {
            Some((pos, agg)) => (&identifier[..pos], Some(agg)),
            None => (identifier, None),
        };

        Some(ColumnRequest {
            name: name.to_string(),
            aggregate,
        })
    }

    /// Column name portion of the request
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aggregate named by the request suffix, if any.
    ///
    /// Resolution never applies it; callers decide whether to.
    #[must_use]
    pub fn aggregate(&self) -> Option<Aggregate> {
        self.aggregate
    }
}

/// Outcome of resolving a column request against a table
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Column),
    NotFound,
}

impl Resolution {
    #[must_use]
    pub fn into_column(self) -> Option<Column> {
        match self {
            Resolution::Found(column) => Some(column),
            Resolution::NotFound => None,
        }
    }
}

/// Resolve an identifier to a column of `table`.
///
/// Cells are read from every data row; absent (`Null`) cells are dropped and
/// the remaining ones are zero-filled when they are not numeric-looking.
#[must_use]
pub fn resolve(table: &Table, identifier: &str) -> Resolution {
    let Some(request) = ColumnRequest::parse(identifier) else {
        tracing::debug!(identifier, "column request without marker");
        return Resolution::NotFound;
    };
    resolve_request(table, &request)
}

/// Resolve an already-parsed request
#[must_use]
pub fn resolve_request(table: &Table, request: &ColumnRequest) -> Resolution {
    let wanted = request.name().to_lowercase();
    let Some(index) = table
        .header()
        .iter()
        .position(|cell| cell.as_str().to_lowercase() == wanted)
    else {
        tracing::debug!(name = request.name(), "no header matches column request");
        return Resolution::NotFound;
    };

    let column = table
        .data_rows()
        .iter()
        .filter_map(|row| row.get(index))
        .filter(|cell| !cell.is_null())
        .map(coerce::to_number_or_zero)
        .collect();
    Resolution::Found(column)
}

/// Permissive capability check.
///
/// True for anything that looks like a column request or an aggregate name.
/// A `true` answer does not mean [`resolve`] will find a column.
#[must_use]
pub fn supports(identifier: &str) -> bool {
    identifier.contains(COLUMN_MARKER) || identifier.ends_with("sum") || identifier.ends_with("avg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    fn sample() -> Table {
        Table::new(vec![
            vec!["PrvaKolona", "DrugaKolona", "Ime"],
            vec!["1", "10", "a"],
            vec!["2", "x", "b"],
            vec!["3.5", "", "c"],
        ])
    }

    #[test]
    fn test_parse_plain_request() {
        let request = ColumnRequest::parse("prvaKolona").unwrap();
        assert_eq!(request.name(), "prvaKolona");
        assert_eq!(request.aggregate(), None);
    }

    #[test]
    fn test_parse_splits_at_first_suffix() {
        let request = ColumnRequest::parse("drugaKolona.avg.sum").unwrap();
        assert_eq!(request.name(), "drugaKolona");
        assert_eq!(request.aggregate(), Some(Aggregate::Avg));
    }

    #[test]
    fn test_parse_leading_suffix_stays_in_name() {
        let request = ColumnRequest::parse(".sumKolona").unwrap();
        assert_eq!(request.name(), ".sumKolona");
        assert_eq!(request.aggregate(), None);

        let request = ColumnRequest::parse(".avgKolona.sum").unwrap();
        assert_eq!(request.name(), ".avgKolona");
        assert_eq!(request.aggregate(), Some(Aggregate::Sum));
    }

    #[test]
    fn test_parse_requires_marker() {
        assert!(ColumnRequest::parse("prvakolona").is_none());
        assert!(ColumnRequest::parse("Ime").is_none());
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let column = resolve(&sample(), "PRVAKolona").into_column().unwrap();
        assert_eq!(column.values(), &[1.0, 2.0, 3.5]);
    }

    #[test]
    fn test_resolve_zero_fills_non_numeric() {
        let column = resolve(&sample(), "drugaKolona").into_column().unwrap();
        assert_eq!(column.values(), &[10.0, 0.0, 0.0]);
    }

    #[test]
    fn test_resolve_drops_null_cells() {
        let table = Table::new(vec![
            vec![CellValue::from("PrvaKolona")],
            vec![CellValue::Int(4)],
            vec![CellValue::Null],
            vec![CellValue::from("6")],
        ]);
        let column = resolve(&table, "prvaKolona").into_column().unwrap();
        assert_eq!(column.values(), &[4.0, 6.0]);
    }

    #[test]
    fn test_suffix_is_not_applied() {
        let column = resolve(&sample(), "prvaKolona.sum").into_column().unwrap();
        assert_eq!(column.len(), 3);
    }

    #[test]
    fn test_resolve_not_found() {
        assert_eq!(resolve(&sample(), "drugaKolonaKolona"), Resolution::NotFound);
        assert_eq!(resolve(&sample(), "ime"), Resolution::NotFound);
    }

    #[test]
    fn test_supports_is_permissive() {
        assert!(supports("nepostojecaKolona"));
        assert!(supports("Kolona.x"));
        assert!(supports("total_sum"));
        assert!(supports("avg"));
        assert!(!supports("ime"));
    }
}
