//! Client-side list view primitives for admin tables.
//!
//! A list view composes three steps over an already-fetched collection:
//!
//! - a free-text filter matching a fixed set of per-entity fields as
//!   case-insensitive substrings
//! - a single active sort column backed by a per-column comparator
//! - fixed-size pagination over the filtered set
//!
//! Nothing here performs I/O. Callers fetch records elsewhere and hand the
//! slice to [`ListView::render`] each time the query, sort, or page changes.
//!
//! # Example
//!
//! ```
//! use list_view::{ListSpec, ListView};
//!
//! struct Mechanic {
//!     name: String,
//!     rating: u8,
//! }
//!
//! let spec = ListSpec::new()
//!     .text_field("name", |m: &Mechanic| m.name.as_str())
//!     .rendered_field("rating", |m: &Mechanic| m.rating.to_string())
//!     .sort_by_text("name", |m: &Mechanic| m.name.as_str());
//!
//! let records = vec![
//!     Mechanic { name: "Wanjiru".to_owned(), rating: 4 },
//!     Mechanic { name: "Abebe".to_owned(), rating: 5 },
//! ];
//!
//! let mut view = ListView::new(spec);
//! view.set_sort("name").expect("name is sortable");
//! let page = view.render(&records);
//!
//! assert_eq!(page.page_count(), 1);
//! assert_eq!(page.rows().first().map(|m| m.name.as_str()), Some("Abebe"));
//! ```

mod error;
mod filter;
mod paging;
mod sort;
mod view;

pub use error::ListViewError;
pub use filter::FieldMatcher;
pub use paging::{DEFAULT_PAGE_SIZE, Pagination};
pub use sort::{SortDirection, SortState, compare_numbers, compare_text, compare_timestamps};
pub use view::{ListSpec, ListView, PageView};
