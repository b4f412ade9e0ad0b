use std::fmt;

/// Aggregate that can be applied to a [`Column`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Avg,
}

impl Aggregate {
    /// The suffix that selects this aggregate in a column request
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Aggregate::Sum => ".sum",
            Aggregate::Avg => ".avg",
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregate::Sum => write!(f, "sum"),
            Aggregate::Avg => write!(f, "avg"),
        }
    }
}

/// Numeric values extracted from one table column, header excluded.
///
/// A `Column` is a detached snapshot: it is rebuilt on every request and
/// holds no reference to the table it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    values: Vec<f64>,
}

impl Column {
    /// Create a column from already-coerced values
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Column { values }
    }

    /// Sum of all values; `0.0` for an empty column
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Arithmetic mean; `0.0` for an empty column instead of NaN
    #[must_use]
    pub fn avg(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum() / self.values.len() as f64
        }
    }

    /// Apply an explicitly chosen aggregate
    #[must_use]
    pub fn aggregate(&self, aggregate: Aggregate) -> f64 {
        match aggregate {
            Aggregate::Sum => self.sum(),
            Aggregate::Avg => self.avg(),
        }
    }

    /// Iterate over the values in original order
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, f64>> {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::new(values)
    }
}

impl FromIterator<f64> for Column {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Column::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = f64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Column {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_column() {
        let column = Column::new(Vec::new());
        assert_eq!(column.sum(), 0.0);
        assert_eq!(column.avg(), 0.0);
        assert!(column.is_empty());
    }

    #[test]
    fn test_sum_and_avg() {
        let column = Column::from(vec![1.0, 2.0, 4.5]);
        assert_eq!(column.sum(), 7.5);
        assert_eq!(column.avg(), 2.5);
        assert_eq!(column.aggregate(Aggregate::Sum), 7.5);
        assert_eq!(column.aggregate(Aggregate::Avg), 2.5);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let column: Column = [3.0, 1.0, 2.0].into_iter().collect();
        let first: Vec<f64> = column.iter().collect();
        let second: Vec<f64> = (&column).into_iter().map(|v| v + 1.0).collect();
        assert_eq!(first, vec![3.0, 1.0, 2.0]);
        assert_eq!(second, vec![4.0, 2.0, 3.0]);
        assert_eq!(column.into_values(), first);
    }

    #[test]
    fn test_aggregate_suffix() {
        assert_eq!(Aggregate::Sum.suffix(), ".sum");
        assert_eq!(Aggregate::Avg.to_string(), "avg");
    }
}
