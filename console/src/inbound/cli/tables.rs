//! Admin tables: column layouts and the search/table/pager rendering.

use std::io::{self, Write};

use list_view::{ListView, PageView, SortDirection};

use crate::domain::{Feedback, Mechanic, RecordId, Service, ServiceRequest, User};

const MAX_CELL: usize = 28;

/// One rendered column.
pub(super) struct Column<T> {
    header: &'static str,
    sort_key: Option<&'static str>,
    cell: fn(&T) -> String,
}

impl<T> Column<T> {
    const fn plain(header: &'static str, cell: fn(&T) -> String) -> Self {
        Self {
            header,
            sort_key: None,
            cell,
        }
    }

    const fn sortable(header: &'static str, key: &'static str, cell: fn(&T) -> String) -> Self {
        Self {
            header,
            sort_key: Some(key),
            cell,
        }
    }
}

/// How one entity is laid out as a table.
pub(super) struct TableLayout<T> {
    /// Plural label used in the footer, e.g. `mechanics`.
    pub(super) plural: &'static str,
    /// Subcommand that edits and deletes rows.
    pub(super) command: &'static str,
    search_hint: &'static str,
    id: fn(&T) -> &RecordId,
    columns: Vec<Column<T>>,
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_owned(),
        _ => "-".to_owned(),
    }
}

pub(super) fn mechanics() -> TableLayout<Mechanic> {
    TableLayout {
        plural: "mechanics",
        command: "mechanic",
        search_hint: "Search by name, email, status, etc...",
        id: |m: &Mechanic| &m.id,
        columns: vec![
            Column::sortable("Name", "name", |m: &Mechanic| m.name.clone()),
            Column::sortable("Email", "email", |m: &Mechanic| m.email.clone()),
            Column::plain("Phone", |m: &Mechanic| m.phone.clone()),
            Column::sortable("Location", "location", |m: &Mechanic| m.location.clone()),
            Column::sortable("Status", "status", |m: &Mechanic| m.status.clone()),
            Column::sortable("Specialization", "specialization", |m: &Mechanic| {
                m.specialization.clone()
            }),
            Column::plain("Notes", |m: &Mechanic| or_dash(m.notes.as_deref())),
        ],
    }
}

pub(super) fn services() -> TableLayout<Service> {
    TableLayout {
        plural: "services",
        command: "service",
        search_hint: "Search by name, description, or price...",
        id: |s: &Service| &s.id,
        columns: vec![
            Column::sortable("Name", "name", |s: &Service| s.name.clone()),
            Column::plain("Description", |s: &Service| s.description.clone()),
            Column::sortable("Price", "price", |s: &Service| format!("KSh {}", s.price)),
            Column::sortable("Duration (min)", "duration", |s: &Service| {
                s.duration.to_string()
            }),
            Column::plain("Available", |s: &Service| {
                (if s.is_available { "Yes" } else { "No" }).to_owned()
            }),
            Column::plain("Created", |s: &Service| {
                s.created_at
                    .as_ref()
                    .map_or_else(|| "-".to_owned(), ToString::to_string)
            }),
        ],
    }
}

pub(super) fn service_requests() -> TableLayout<ServiceRequest> {
    TableLayout {
        plural: "requests",
        command: "service-request",
        search_hint: "Search by mechanic, service, price, location...",
        id: |r: &ServiceRequest| &r.id,
        columns: vec![
            Column::plain("User", |r: &ServiceRequest| {
                ServiceRequest::related_name(r.user.as_ref()).to_owned()
            }),
            Column::sortable("Mechanic", "mechanic", |r: &ServiceRequest| {
                ServiceRequest::related_name(r.mechanic.as_ref()).to_owned()
            }),
            Column::sortable("Service", "service", |r: &ServiceRequest| {
                ServiceRequest::related_name(r.service.as_ref()).to_owned()
            }),
            Column::sortable("Status", "status", |r: &ServiceRequest| r.status.clone()),
            Column::sortable("Price", "price", |r: &ServiceRequest| r.price.to_string()),
            Column::sortable("Scheduled Date", "scheduledDate", |r: &ServiceRequest| {
                r.scheduled_date
                    .as_ref()
                    .map_or_else(|| "-".to_owned(), ToString::to_string)
            }),
            Column::plain("Location", |r: &ServiceRequest| r.location.clone()),
        ],
    }
}

pub(super) fn feedback() -> TableLayout<Feedback> {
    TableLayout {
        plural: "feedbacks",
        command: "feedback",
        search_hint: "Search by comment or rating...",
        id: |f: &Feedback| &f.id,
        columns: vec![
            Column::plain("Mechanic ID", |f: &Feedback| f.mechanic_id.to_string()),
            Column::plain("User ID", |f: &Feedback| f.user_id.to_string()),
            Column::sortable("Rating", "rating", |f: &Feedback| f.rating.to_string()),
            Column::plain("Comment", |f: &Feedback| f.comment.clone()),
            Column::sortable("Created At", "createdAt", |f: &Feedback| {
                f.created_at
                    .as_ref()
                    .map_or_else(|| "-".to_owned(), ToString::to_string)
            }),
            Column::plain("Updated At", |f: &Feedback| {
                f.updated_at
                    .as_ref()
                    .map_or_else(|| "-".to_owned(), ToString::to_string)
            }),
        ],
    }
}

pub(super) fn users() -> TableLayout<User> {
    TableLayout {
        plural: "users",
        command: "user",
        search_hint: "Search by name, email, or role...",
        id: |u: &User| &u.id,
        columns: vec![
            Column::sortable("Name", "name", |u: &User| u.name.clone()),
            Column::sortable("Email", "email", |u: &User| u.email.clone()),
            Column::sortable("Role", "role", |u: &User| u.role.to_string()),
        ],
    }
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL {
        return text.to_owned();
    }
    let mut clipped: String = text.chars().take(MAX_CELL.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}

fn header_label<T>(column: &Column<T>, page: &PageView<'_, T>) -> String {
    let active = page
        .sort()
        .filter(|state| column.sort_key == Some(state.column()));
    match active.map(list_view::SortState::direction) {
        Some(SortDirection::Ascending) => format!("{} ^", column.header),
        Some(SortDirection::Descending) => format!("{} v", column.header),
        None => column.header.to_owned(),
    }
}

fn write_row(out: &mut dyn Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "| {} |", line.join(" | "))
}

/// Render the search line, the visible rows, and the pager.
pub(super) fn write_table<T>(
    out: &mut dyn Write,
    layout: &TableLayout<T>,
    view: &ListView<T>,
    records: &[T],
) -> io::Result<()> {
    let page = view.render(records);

    if view.query().is_empty() {
        writeln!(out, "Search: ({})", layout.search_hint)?;
    } else {
        writeln!(out, "Search: {}", view.query())?;
    }

    let mut header = vec!["ID".to_owned()];
    header.extend(layout.columns.iter().map(|column| header_label(column, &page)));
    let rows: Vec<Vec<String>> = page
        .rows()
        .iter()
        .map(|record| {
            let mut cells = vec![(layout.id)(record).to_string()];
            cells.extend(layout.columns.iter().map(|column| clip(&(column.cell)(record))));
            cells
        })
        .collect();
    let widths: Vec<usize> = (0..header.len())
        .map(|index| {
            std::iter::once(&header)
                .chain(&rows)
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(out, &header, &widths)?;
    if rows.is_empty() {
        writeln!(out, "  No {} found.", layout.plural)?;
    }
    for row in &rows {
        write_row(out, row, &widths)?;
    }

    let pages: Vec<String> = page
        .pages()
        .map(|(index, current)| {
            let number = index.saturating_add(1);
            if current {
                format!("[{number}]")
            } else {
                number.to_string()
            }
        })
        .collect();
    if pages.is_empty() {
        writeln!(out, "Page: -")?;
    } else {
        writeln!(out, "Page: {}", pages.join(" "))?;
    }
    writeln!(
        out,
        "Total Pages: {} | Showing {} of {} {}",
        page.page_count(),
        page.filtered_count(),
        page.total_count(),
        layout.plural
    )?;
    writeln!(
        out,
        "Actions: crm {cmd} edit <id> --set field=value | crm {cmd} delete <id> --yes",
        cmd = layout.command
    )
}
