//! Single-column sorting with per-column comparators.

use std::cmp::Ordering;
use std::fmt;

/// Direction applied to the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Comparator order.
    #[default]
    Ascending,
    /// Reversed comparator order.
    Descending,
}

impl SortDirection {
    /// Return the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub(crate) const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

/// The active sort: one column key and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    column: &'static str,
    direction: SortDirection,
}

impl SortState {
    pub(crate) const fn new(column: &'static str, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Column key the records are sorted by.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        self.column
    }

    /// Direction applied to the column comparator.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }
}

pub(crate) type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

pub(crate) struct SortColumn<T> {
    pub(crate) key: &'static str,
    pub(crate) compare: Comparator<T>,
}

/// Compare two strings the way a locale-aware collator orders plain text:
/// case-insensitively first, falling back to exact byte order.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use list_view::compare_text;
///
/// assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
/// assert_eq!(compare_text("Zed", "zed"), Ordering::Less);
/// ```
#[must_use]
pub fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Compare two numbers; `NaN` sorts after every other value.
#[must_use]
pub fn compare_numbers(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left.total_cmp(&right),
    }
}

/// Compare two optional timestamps; missing values sort first.
#[must_use]
pub fn compare_timestamps(left: Option<i64>, right: Option<i64>) -> Ordering {
    left.cmp(&right)
}

/// Stable sort of `rows` by `column` in `direction`.
pub(crate) fn sort_rows<T>(rows: &mut [&T], column: &SortColumn<T>, direction: SortDirection) {
    rows.sort_by(|left, right| direction.apply((column.compare)(left, right)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc", "ABD", Ordering::Less)]
    #[case("b", "A", Ordering::Greater)]
    #[case("same", "same", Ordering::Equal)]
    #[case("Same", "same", Ordering::Less)]
    fn text_comparison_ignores_case_before_bytes(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_text(left, right), expected);
    }

    #[rstest]
    #[case(1.0, 2.0, Ordering::Less)]
    #[case(10.5, 2.0, Ordering::Greater)]
    #[case(f64::NAN, 2.0, Ordering::Greater)]
    #[case(2.0, f64::NAN, Ordering::Less)]
    fn numeric_comparison_orders_values(
        #[case] left: f64,
        #[case] right: f64,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_numbers(left, right), expected);
    }

    #[test]
    fn missing_timestamps_sort_first() {
        assert_eq!(compare_timestamps(None, Some(0)), Ordering::Less);
        assert_eq!(compare_timestamps(Some(5), Some(3)), Ordering::Greater);
    }

    #[test]
    fn descending_sort_keeps_ties_in_input_order() {
        let column = SortColumn::<(u8, char)> {
            key: "rank",
            compare: Box::new(|left: &(u8, char), right: &(u8, char)| left.0.cmp(&right.0)),
        };
        let data = [(1, 'a'), (2, 'b'), (1, 'c'), (2, 'd')];
        let mut rows: Vec<&(u8, char)> = data.iter().collect();
        sort_rows(&mut rows, &column, SortDirection::Descending);
        let order: String = rows.iter().map(|row| row.1).collect();
        assert_eq!(order, "bdac");
    }

    #[test]
    fn toggling_direction_flips_between_variants() {
        assert_eq!(
            SortDirection::Ascending.toggled(),
            SortDirection::Descending
        );
        assert_eq!(SortDirection::Descending.toggled().to_string(), "asc");
    }
}
