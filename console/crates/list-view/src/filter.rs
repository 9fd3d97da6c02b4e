//! Free-text filtering over a fixed set of record fields.

use std::fmt;

type TextAccessor<T> = Box<dyn for<'a> Fn(&'a T) -> &'a str + Send + Sync>;
type RenderedAccessor<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

enum Accessor<T> {
    Text(TextAccessor<T>),
    Rendered(RenderedAccessor<T>),
}

/// One searchable field of a record.
///
/// Text fields borrow straight from the record. Rendered fields produce their
/// string representation on demand, which is how numeric columns take part in
/// the search.
pub struct FieldMatcher<T> {
    name: &'static str,
    accessor: Accessor<T>,
}

impl<T> FieldMatcher<T> {
    /// Build a matcher for a string-valued field.
    pub fn text<F>(name: &'static str, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> &'a str + Send + Sync + 'static,
    {
        Self {
            name,
            accessor: Accessor::Text(Box::new(accessor)),
        }
    }

    /// Build a matcher for a field compared through its string rendering.
    pub fn rendered<F>(name: &'static str, accessor: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            name,
            accessor: Accessor::Rendered(Box::new(accessor)),
        }
    }

    /// Field name used in diagnostics and search hints.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this field contains `needle`, which must already be lowercase.
    pub(crate) fn matches(&self, record: &T, needle: &str) -> bool {
        match &self.accessor {
            Accessor::Text(get) => contains_folded(get(record), needle),
            Accessor::Rendered(render) => contains_folded(&render(record), needle),
        }
    }
}

impl<T> fmt::Debug for FieldMatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMatcher")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Keep the records where any field contains `query`, ignoring case.
///
/// An empty query keeps every record.
pub(crate) fn retain_matching<'r, T>(
    records: &'r [T],
    fields: &[FieldMatcher<T>],
    query: &str,
) -> Vec<&'r T> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| fields.iter().any(|field| field.matches(record, &needle)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    struct Row {
        comment: String,
        rating: u8,
    }

    #[fixture]
    fn rows() -> Vec<Row> {
        vec![
            Row {
                comment: "Fixed my brakes fast".to_owned(),
                rating: 5,
            },
            Row {
                comment: "Late again".to_owned(),
                rating: 2,
            },
        ]
    }

    fn fields() -> Vec<FieldMatcher<Row>> {
        vec![
            FieldMatcher::text("comment", |row: &Row| row.comment.as_str()),
            FieldMatcher::rendered("rating", |row: &Row| row.rating.to_string()),
        ]
    }

    #[rstest]
    #[case("", 2)]
    #[case("BRAKES", 1)]
    #[case("a", 2)]
    #[case("5", 1)]
    #[case("nothing", 0)]
    fn retains_records_with_any_matching_field(
        rows: Vec<Row>,
        #[case] query: &str,
        #[case] expected: usize,
    ) {
        let kept = retain_matching(&rows, &fields(), query);
        assert_eq!(kept.len(), expected, "query {query:?}");
    }

    #[rstest]
    fn records_without_searchable_fields_match_only_empty_query(rows: Vec<Row>) {
        assert_eq!(retain_matching(&rows, &[], "").len(), 2);
        assert!(retain_matching(&rows, &[], "late").is_empty());
    }

    #[test]
    fn debug_output_names_the_field() {
        let matcher = FieldMatcher::text("comment", |row: &Row| row.comment.as_str());
        assert!(format!("{matcher:?}").contains("comment"));
    }
}
