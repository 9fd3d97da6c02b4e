//! Plain-text rendering of shells, notices, and dashboards.
//!
//! Everything writes to a caller-supplied [`Write`] so commands stay
//! testable against an in-memory buffer.

use std::fmt;
use std::io::{self, Write};

use crate::domain::{MonitoringSnapshot, Route, SessionUser};

const RULE_WIDTH: usize = 72;
const BAR_WIDTH: u64 = 40;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The action succeeded.
    Success,
    /// The action failed.
    Error,
    /// Neutral information such as a redirect.
    Info,
}

/// One transient status line, the console's stand-in for a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// A failure notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// An informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    /// Severity.
    #[must_use]
    pub const fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// Text shown to the operator.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Write `notice` on its own line.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_notice(out: &mut dyn Write, notice: &Notice) -> io::Result<()> {
    writeln!(out, "{notice}")
}

/// Frame `outlet` with the header, sidebar, and footer of `route`'s area.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_shell(
    out: &mut dyn Write,
    route: Route,
    user: Option<&SessionUser>,
    year: i32,
    outlet: &str,
) -> io::Result<()> {
    let shell = route.area().shell();
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    match user {
        Some(user) => writeln!(out, "{} | {} ({})", shell.title, user.name, user.role)?,
        None => writeln!(out, "{}", shell.title)?,
    }
    if !shell.nav.is_empty() {
        let links: Vec<String> = shell
            .nav
            .iter()
            .map(|item| {
                if item.route == route {
                    format!("[{}]", item.label)
                } else {
                    item.label.to_owned()
                }
            })
            .collect();
        writeln!(out, "{}", links.join(" | "))?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    out.write_all(outlet.as_bytes())?;
    if !outlet.ends_with('\n') {
        writeln!(out)?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(out, "(c) {year} CRM System. All rights reserved. | Support")?;
    writeln!(out, "{rule}")
}

/// Admin landing page: metric cards plus a bar chart.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_admin_dashboard(out: &mut dyn Write, snapshot: &MonitoringSnapshot) -> io::Result<()> {
    writeln!(out, "Welcome to the Admin Dashboard")?;
    writeln!(out, "Start managing your system from here.")?;
    writeln!(out)?;
    let metrics = snapshot.metrics();
    for (label, value) in &metrics {
        let shown = value.map_or_else(|| "-".to_owned(), |v| v.to_string());
        writeln!(out, "  {label:<18} {shown:>8}")?;
    }
    writeln!(out)?;
    writeln!(out, "System Metrics Bar Chart")?;
    let peak = metrics
        .iter()
        .filter_map(|(_, value)| *value)
        .max()
        .unwrap_or(0);
    for (label, value) in &metrics {
        let count = value.unwrap_or(0);
        writeln!(out, "  {label:<18} {} {count}", bar(count, peak))?;
    }
    Ok(())
}

fn bar(value: u64, peak: u64) -> String {
    let scaled = value
        .saturating_mul(BAR_WIDTH)
        .checked_div(peak)
        .unwrap_or(0);
    "#".repeat(usize::try_from(scaled).unwrap_or(0))
}

/// Mechanic landing page.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_mechanic_dashboard(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Welcome, Mechanic!")?;
    writeln!(
        out,
        "Track your jobs, manage your vehicles, and stay on top of your mechanic profile."
    )?;
    writeln!(out)?;
    write_stats(
        out,
        &[
            ("Jobs Completed", "12"),
            ("Vehicles Serviced", "8"),
            ("Verified", "Yes"),
        ],
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Create Service: crm service create --set name=.. --set description=.. --set price=.. --set duration=.."
    )
}

/// User landing page.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_user_dashboard(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Welcome to Your Dashboard")?;
    writeln!(
        out,
        "Manage your profile, view your services, and keep your information up to date."
    )?;
    writeln!(out)?;
    write_stats(
        out,
        &[
            ("Profile Complete", "80%"),
            ("My Services", "3"),
            ("Settings Updated", "Yes"),
        ],
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Create Service Request: crm service-request create --set mechanicId=.. --set serviceId=.. \
         --set description=.. --set price=.. --set location=.."
    )
}

fn write_stats(out: &mut dyn Write, stats: &[(&str, &str)]) -> io::Result<()> {
    for (label, value) in stats {
        writeln!(out, "  {value:>6}  {label}")?;
    }
    Ok(())
}

/// Public landing page.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_landing(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "The Modern CRM for Your Business")?;
    writeln!(
        out,
        "Manage customers, services, feedback, and your team in one place."
    )?;
    writeln!(out)?;
    for (title, description) in [
        (
            "User Management",
            "Easily manage users, roles, and permissions.",
        ),
        ("Analytics", "Real-time metrics on the admin dashboard."),
        ("Secure & Reliable", "Sessions stay on this machine only."),
        ("Feedback & Support", "Review and moderate customer feedback."),
    ] {
        writeln!(out, "  * {title}: {description}")?;
    }
    writeln!(out)?;
    writeln!(out, "Get Started: crm login --email <email>")?;
    writeln!(out, "Create Account: crm register --email <email> --first-name <name>")
}

/// Sign-in prompt shown for the login route.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_login_prompt(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Login to Your Account")?;
    writeln!(out, "  crm login --email <email>  (password from CRM_PASSWORD or --password)")
}
