//! Composition of filter, sort, and pagination into one list view.

use std::cmp::Ordering;
use std::fmt;

use crate::filter::{FieldMatcher, retain_matching};
use crate::paging::Pagination;
use crate::sort::{
    SortColumn, SortDirection, SortState, compare_numbers, compare_text, compare_timestamps,
    sort_rows,
};
use crate::ListViewError;

/// Per-entity list configuration: searchable fields, sortable columns, and
/// page size.
pub struct ListSpec<T> {
    fields: Vec<FieldMatcher<T>>,
    columns: Vec<SortColumn<T>>,
    pagination: Pagination,
}

impl<T> Default for ListSpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListSpec<T> {
    /// Start an empty spec using the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            columns: Vec::new(),
            pagination: Pagination::default(),
        }
    }

    /// Replace the page size.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::ZeroPageSize`] when `page_size` is zero.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, ListViewError> {
        self.pagination = Pagination::new(page_size)?;
        Ok(self)
    }

    /// Register a string-valued searchable field.
    #[must_use]
    pub fn text_field<F>(mut self, name: &'static str, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> &'a str + Send + Sync + 'static,
    {
        self.fields.push(FieldMatcher::text(name, accessor));
        self
    }

    /// Register a searchable field matched through its string rendering.
    #[must_use]
    pub fn rendered_field<F>(mut self, name: &'static str, accessor: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.fields.push(FieldMatcher::rendered(name, accessor));
        self
    }

    /// Register a sortable column with an arbitrary comparator.
    ///
    /// Registering the same key twice replaces the earlier comparator.
    #[must_use]
    pub fn sort_column<F>(mut self, key: &'static str, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.columns.retain(|column| column.key != key);
        self.columns.push(SortColumn {
            key,
            compare: Box::new(compare),
        });
        self
    }

    /// Register a column sorted with [`compare_text`].
    #[must_use]
    pub fn sort_by_text<F>(self, key: &'static str, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> &'a str + Send + Sync + 'static,
    {
        self.sort_column(key, move |left, right| {
            compare_text(accessor(left), accessor(right))
        })
    }

    /// Register a column sorted with [`compare_numbers`].
    #[must_use]
    pub fn sort_by_number<F>(self, key: &'static str, accessor: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        self.sort_column(key, move |left, right| {
            compare_numbers(accessor(left), accessor(right))
        })
    }

    /// Register a column sorted with [`compare_timestamps`].
    #[must_use]
    pub fn sort_by_timestamp<F>(self, key: &'static str, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<i64> + Send + Sync + 'static,
    {
        self.sort_column(key, move |left, right| {
            compare_timestamps(accessor(left), accessor(right))
        })
    }

    /// Names of the searchable fields, in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldMatcher::name)
    }

    /// Keys of the sortable columns, in registration order.
    pub fn sortable_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.key)
    }

    /// Pagination settings for this spec.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    fn column(&self, key: &str) -> Option<&SortColumn<T>> {
        self.columns.iter().find(|column| column.key == key)
    }
}

impl<T> fmt::Debug for ListSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSpec")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .field("columns", &self.sortable_columns().collect::<Vec<_>>())
            .field("pagination", &self.pagination)
            .finish()
    }
}

/// Interactive list state: search query, active sort, and requested page.
///
/// ## Invariants
/// - At most one sort column is active.
/// - The requested page is kept as given; [`ListView::render`] clamps it to
///   the last page of the filtered set.
#[derive(Debug)]
pub struct ListView<T> {
    spec: ListSpec<T>,
    query: String,
    sort: Option<SortState>,
    page: usize,
}

impl<T> ListView<T> {
    /// Create a view with an empty query, no sort, on the first page.
    #[must_use]
    pub const fn new(spec: ListSpec<T>) -> Self {
        Self {
            spec,
            query: String::new(),
            sort: None,
            page: 0,
        }
    }

    /// The configuration backing this view.
    #[must_use]
    pub const fn spec(&self) -> &ListSpec<T> {
        &self.spec
    }

    /// Replace the free-text search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Activate `column`, replacing any other sort.
    ///
    /// Selecting the column that is already active toggles its direction.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::UnknownSortColumn`] when no comparator is
    /// registered under `column`.
    pub fn set_sort(&mut self, column: &str) -> Result<(), ListViewError> {
        let direction = match &self.sort {
            Some(active) if active.column() == column => active.direction().toggled(),
            _ => SortDirection::Ascending,
        };
        self.set_sort_direction(column, direction)
    }

    /// Activate `column` with an explicit direction, replacing any other sort.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::UnknownSortColumn`] when no comparator is
    /// registered under `column`.
    pub fn set_sort_direction(
        &mut self,
        column: &str,
        direction: SortDirection,
    ) -> Result<(), ListViewError> {
        let key = self
            .spec
            .column(column)
            .map(|registered| registered.key)
            .ok_or_else(|| ListViewError::UnknownSortColumn {
                column: column.to_owned(),
            })?;
        self.sort = Some(SortState::new(key, direction));
        Ok(())
    }

    /// Drop the active sort; rows return to fetch order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Active sort, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Request a zero-based page index.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Requested page index, before clamping.
    #[must_use]
    pub const fn requested_page(&self) -> usize {
        self.page
    }

    /// Filter, sort, and paginate `records` for display.
    pub fn render<'r>(&self, records: &'r [T]) -> PageView<'r, T> {
        let mut rows = retain_matching(records, &self.spec.fields, &self.query);
        if let Some(active) = &self.sort {
            if let Some(column) = self.spec.column(active.column()) {
                sort_rows(&mut rows, column, active.direction());
            }
        }

        let pagination = self.spec.pagination;
        let filtered_count = rows.len();
        let page = pagination.clamp_page(self.page, filtered_count);
        let visible = rows
            .into_iter()
            .skip(pagination.offset(page))
            .take(pagination.page_size())
            .collect();

        PageView {
            rows: visible,
            page,
            page_count: pagination.page_count(filtered_count),
            filtered_count,
            total_count: records.len(),
            sort: self.sort.clone(),
        }
    }
}

/// One rendered page of a list view.
#[derive(Debug)]
pub struct PageView<'r, T> {
    rows: Vec<&'r T>,
    page: usize,
    page_count: usize,
    filtered_count: usize,
    total_count: usize,
    sort: Option<SortState>,
}

impl<'r, T> PageView<'r, T> {
    /// Rows visible on this page, in display order.
    #[must_use]
    pub fn rows(&self) -> &[&'r T] {
        &self.rows
    }

    /// Zero-based index of the page actually shown.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Total number of pages for the filtered set.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of records that passed the filter.
    #[must_use]
    pub const fn filtered_count(&self) -> usize {
        self.filtered_count
    }

    /// Number of records before filtering.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Sort applied to this page, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Iterate pager entries as `(index, is_current)`.
    pub fn pages(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.page_count).map(|index| (index, index == self.page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[derive(Debug, Clone, PartialEq)]
    struct Service {
        name: String,
        price: String,
        duration: u32,
    }

    fn service(name: &str, price: &str, duration: u32) -> Service {
        Service {
            name: name.to_owned(),
            price: price.to_owned(),
            duration,
        }
    }

    #[fixture]
    fn services() -> Vec<Service> {
        vec![
            service("Oil change", "45.00", 30),
            service("Brake pads", "120.50", 90),
            service("Tyre rotation", "30.00", 45),
            service("Battery test", "15.00", 15),
            service("Wheel alignment", "80.00", 60),
            service("Brake fluid flush", "60.00", 40),
            service("AC recharge", "95.00", 50),
        ]
    }

    fn spec() -> ListSpec<Service> {
        ListSpec::new()
            .text_field("name", |s: &Service| s.name.as_str())
            .text_field("price", |s: &Service| s.price.as_str())
            .sort_by_text("name", |s: &Service| s.name.as_str())
            .sort_by_number("price", |s: &Service| s.price.parse().unwrap_or(f64::NAN))
            .sort_by_number("duration", |s: &Service| f64::from(s.duration))
    }

    fn names<'r>(page: &PageView<'r, Service>) -> Vec<&'r str> {
        page.rows().iter().copied().map(|s| s.name.as_str()).collect()
    }

    #[rstest]
    fn first_page_shows_fetch_order_without_sort(services: Vec<Service>) {
        let view = ListView::new(spec());
        let page = view.render(&services);
        assert_eq!(page.page(), 0);
        assert_eq!(page.page_count(), 2);
        assert_eq!(page.filtered_count(), 7);
        assert_eq!(
            names(&page),
            ["Oil change", "Brake pads", "Tyre rotation", "Battery test", "Wheel alignment"]
        );
    }

    #[rstest]
    fn filter_sort_and_page_compose(services: Vec<Service>) {
        let mut view = ListView::new(spec());
        view.set_query("brake");
        view.set_sort("price").expect("price is sortable");
        let page = view.render(&services);
        assert_eq!(names(&page), ["Brake fluid flush", "Brake pads"]);
        assert_eq!(page.total_count(), 7);
        assert_eq!(page.page_count(), 1);
    }

    #[rstest]
    fn selecting_active_column_toggles_direction(services: Vec<Service>) {
        let mut view = ListView::new(spec());
        view.set_sort("duration").expect("duration is sortable");
        view.set_sort("duration").expect("duration is sortable");
        let sort = view.sort().expect("sort active");
        assert_eq!(sort.direction(), SortDirection::Descending);
        let page = view.render(&services);
        assert_eq!(names(&page).first(), Some(&"Brake pads"));
    }

    #[rstest]
    fn selecting_another_column_replaces_the_sort(services: Vec<Service>) {
        let mut view = ListView::new(spec());
        view.set_sort_direction("price", SortDirection::Descending)
            .expect("price is sortable");
        view.set_sort("name").expect("name is sortable");
        let sort = view.sort().expect("sort active");
        assert_eq!(sort.column(), "name");
        assert_eq!(sort.direction(), SortDirection::Ascending);
        assert_eq!(names(&view.render(&services)).first(), Some(&"AC recharge"));
    }

    #[rstest]
    fn clearing_the_sort_restores_fetch_order(services: Vec<Service>) {
        let mut view = ListView::new(spec());
        let unsorted = names(&view.render(&services));
        view.set_sort_direction("name", SortDirection::Descending)
            .expect("name is sortable");
        assert_ne!(names(&view.render(&services)), unsorted);

        view.clear_sort();
        assert!(view.sort().is_none());
        let page = view.render(&services);
        assert!(page.sort().is_none());
        assert_eq!(names(&page), unsorted);
    }

    #[test]
    fn unknown_sort_column_is_rejected_and_keeps_previous_sort() {
        let mut view = ListView::new(spec());
        view.set_sort("name").expect("name is sortable");
        let err = view.set_sort("location").expect_err("location is not sortable");
        assert_eq!(
            err,
            ListViewError::UnknownSortColumn {
                column: "location".to_owned()
            }
        );
        assert_eq!(view.sort().map(SortState::column), Some("name"));
    }

    #[rstest]
    fn page_past_the_end_clamps_after_filter_shrinks(services: Vec<Service>) {
        let mut view = ListView::new(spec());
        view.set_page(1);
        assert_eq!(view.render(&services).page(), 1);

        view.set_query("oil");
        let page = view.render(&services);
        assert_eq!(page.page(), 0);
        assert_eq!(names(&page), ["Oil change"]);
        assert_eq!(view.requested_page(), 1);
    }

    #[rstest]
    fn empty_result_renders_no_pages(services: Vec<Service>) {
        let mut view = ListView::new(spec());
        view.set_query("transmission");
        let page = view.render(&services);
        assert!(page.rows().is_empty());
        assert_eq!(page.page_count(), 0);
        assert_eq!(page.pages().count(), 0);
    }

    #[rstest]
    fn pager_marks_current_page(services: Vec<Service>) {
        let mut view = ListView::new(spec());
        view.set_page(1);
        let page = view.render(&services);
        let pager: Vec<(usize, bool)> = page.pages().collect();
        assert_eq!(pager, [(0, false), (1, true)]);
    }

    #[test]
    fn custom_page_size_is_applied() {
        let sized = spec().with_page_size(3).expect("non-zero size");
        assert_eq!(sized.pagination().page_size(), 3);
        assert!(spec().with_page_size(0).is_err());
    }

    #[test]
    fn spec_lists_fields_and_columns() {
        let configured = spec();
        assert_eq!(configured.field_names().collect::<Vec<_>>(), ["name", "price"]);
        assert_eq!(
            configured.sortable_columns().collect::<Vec<_>>(),
            ["name", "price", "duration"]
        );
    }
}
