//! Fixed-size pagination arithmetic.

use crate::ListViewError;

/// Page size used by every admin table.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Fixed page size pagination over a filtered row count.
///
/// ## Invariants
/// - `page_size` is never zero.
/// - A request past the last page clamps to the last page; an empty set
///   renders page 0 with no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Build pagination with an explicit page size.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::ZeroPageSize`] when `page_size` is zero.
    pub const fn new(page_size: usize) -> Result<Self, ListViewError> {
        if page_size == 0 {
            return Err(ListViewError::ZeroPageSize);
        }
        Ok(Self { page_size })
    }

    /// Rows shown per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages needed for `row_count` rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_view::Pagination;
    ///
    /// let pagination = Pagination::new(5).expect("non-zero size");
    /// assert_eq!(pagination.page_count(0), 0);
    /// assert_eq!(pagination.page_count(5), 1);
    /// assert_eq!(pagination.page_count(6), 2);
    /// ```
    #[must_use]
    pub const fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size)
    }

    /// Resolve a requested page index against `row_count` rows.
    #[must_use]
    pub const fn clamp_page(&self, requested: usize, row_count: usize) -> usize {
        let count = self.page_count(row_count);
        if count == 0 {
            0
        } else if requested >= count {
            count - 1
        } else {
            requested
        }
    }

    /// Index of the first row on `page`.
    pub(crate) const fn offset(&self, page: usize) -> usize {
        page.saturating_mul(self.page_size)
    }
}
