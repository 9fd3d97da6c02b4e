//! Searchable fields and sortable columns of each admin table.

use list_view::{ListSpec, ListViewError};

use super::timestamp::timestamp_key;
use super::{Feedback, Mechanic, Service, ServiceRequest, User};

/// Mechanic table: searchable by contact and trade fields.
///
/// # Errors
///
/// Returns [`ListViewError::ZeroPageSize`] when `page_size` is zero.
pub fn mechanics(page_size: usize) -> Result<ListSpec<Mechanic>, ListViewError> {
    ListSpec::new()
        .with_page_size(page_size)
        .map(|spec| {
            spec.text_field("name", |m: &Mechanic| m.name.as_str())
                .text_field("email", |m: &Mechanic| m.email.as_str())
                .text_field("phone", |m: &Mechanic| m.phone.as_str())
                .text_field("location", |m: &Mechanic| m.location.as_str())
                .text_field("status", |m: &Mechanic| m.status.as_str())
                .text_field("specialization", |m: &Mechanic| m.specialization.as_str())
                .sort_by_text("name", |m: &Mechanic| m.name.as_str())
                .sort_by_text("email", |m: &Mechanic| m.email.as_str())
                .sort_by_text("location", |m: &Mechanic| m.location.as_str())
                .sort_by_text("status", |m: &Mechanic| m.status.as_str())
                .sort_by_text("specialization", |m: &Mechanic| m.specialization.as_str())
        })
}

/// Service table: searchable by name, description, and price.
///
/// # Errors
///
/// Returns [`ListViewError::ZeroPageSize`] when `page_size` is zero.
pub fn services(page_size: usize) -> Result<ListSpec<Service>, ListViewError> {
    ListSpec::new().with_page_size(page_size).map(|spec| {
        spec.text_field("name", |s: &Service| s.name.as_str())
            .text_field("description", |s: &Service| s.description.as_str())
            .text_field("price", |s: &Service| s.price.as_str())
            .sort_by_text("name", |s: &Service| s.name.as_str())
            .sort_by_number("price", |s: &Service| s.price.amount())
            .sort_by_number("duration", |s: &Service| f64::from(s.duration))
    })
}

/// Service-request table: searchable by job details and related names.
///
/// # Errors
///
/// Returns [`ListViewError::ZeroPageSize`] when `page_size` is zero.
pub fn service_requests(page_size: usize) -> Result<ListSpec<ServiceRequest>, ListViewError> {
    ListSpec::new().with_page_size(page_size).map(|spec| {
        spec.text_field("description", |r: &ServiceRequest| r.description.as_str())
            .text_field("location", |r: &ServiceRequest| r.location.as_str())
            .text_field("status", |r: &ServiceRequest| r.status.as_str())
            .text_field("price", |r: &ServiceRequest| r.price.as_str())
            .text_field("user", |r: &ServiceRequest| {
                ServiceRequest::related_name(r.user.as_ref())
            })
            .text_field("mechanic", |r: &ServiceRequest| {
                ServiceRequest::related_name(r.mechanic.as_ref())
            })
            .text_field("service", |r: &ServiceRequest| {
                ServiceRequest::related_name(r.service.as_ref())
            })
            .sort_by_text("status", |r: &ServiceRequest| r.status.as_str())
            .sort_by_text("mechanic", |r: &ServiceRequest| {
                ServiceRequest::related_name(r.mechanic.as_ref())
            })
            .sort_by_text("service", |r: &ServiceRequest| {
                ServiceRequest::related_name(r.service.as_ref())
            })
            .sort_by_number("price", |r: &ServiceRequest| r.price.amount())
            .sort_by_timestamp("scheduledDate", |r: &ServiceRequest| {
                timestamp_key(r.scheduled_date.as_ref())
            })
    })
}

/// Feedback table: searchable by comment and rating.
///
/// # Errors
///
/// Returns [`ListViewError::ZeroPageSize`] when `page_size` is zero.
pub fn feedback(page_size: usize) -> Result<ListSpec<Feedback>, ListViewError> {
    ListSpec::new().with_page_size(page_size).map(|spec| {
        spec.text_field("comment", |f: &Feedback| f.comment.as_str())
            .rendered_field("rating", |f: &Feedback| f.rating.to_string())
            .sort_by_number("rating", |f: &Feedback| f64::from(f.rating))
            .sort_by_timestamp("createdAt", |f: &Feedback| {
                timestamp_key(f.created_at.as_ref())
            })
    })
}

/// User table: searchable by name, email, and role.
///
/// # Errors
///
/// Returns [`ListViewError::ZeroPageSize`] when `page_size` is zero.
pub fn users(page_size: usize) -> Result<ListSpec<User>, ListViewError> {
    ListSpec::new().with_page_size(page_size).map(|spec| {
        spec.text_field("name", |u: &User| u.name.as_str())
            .text_field("email", |u: &User| u.email.as_str())
            .text_field("role", |u: &User| u.role.as_str())
            .sort_by_text("name", |u: &User| u.name.as_str())
            .sort_by_text("email", |u: &User| u.email.as_str())
            .sort_by_text("role", |u: &User| u.role.as_str())
    })
}
