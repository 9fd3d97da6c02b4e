//! Command-line surface of the `crm` binary.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::SettingsOverrides;
use crate::telemetry::LogFormat;

/// `crm` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "crm",
    about = "Role-based console for the garage CRM backend",
    version
)]
pub struct Cli {
    /// Options shared by every command.
    #[command(flatten)]
    pub globals: GlobalArgs,
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Options accepted before or after any subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Backend base URL. Overrides `CRM_BASE_URL`.
    #[arg(long, global = true, value_name = "url")]
    pub base_url: Option<String>,
    /// Directory holding the session entry. Overrides `CRM_STATE_DIR`.
    #[arg(long, global = true, value_name = "path")]
    pub state_dir: Option<PathBuf>,
    /// Rows per table page. Overrides `CRM_PAGE_SIZE`.
    #[arg(long, global = true, value_name = "rows")]
    pub page_size: Option<usize>,
    /// Emit logs as JSON on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl GlobalArgs {
    /// Settings supplied on the command line.
    #[must_use]
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            base_url: self.base_url.clone(),
            state_dir: self.state_dir.clone(),
            page_size: self.page_size,
        }
    }

    /// Requested log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login(LoginArgs),
    /// Create an account.
    Register(RegisterArgs),
    /// Forget the stored session.
    Logout,
    /// Show the signed-in account.
    Whoami,
    /// Render a route inside its role shell.
    Open(OpenArgs),
    /// Manage mechanics.
    #[command(subcommand)]
    Mechanic(MechanicCommand),
    /// Manage the service catalogue.
    #[command(subcommand)]
    Service(ServiceCommand),
    /// Manage service requests.
    #[command(subcommand)]
    ServiceRequest(ServiceRequestCommand),
    /// Moderate feedback.
    #[command(subcommand)]
    Feedback(FeedbackCommand),
    /// Manage user accounts.
    #[command(subcommand)]
    User(UserCommand),
}

/// `crm login`.
#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long)]
    pub email: String,
    /// Account password.
    #[arg(long, env = "CRM_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// `crm register`.
#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    /// Account email.
    #[arg(long)]
    pub email: String,
    /// Given name.
    #[arg(long)]
    pub first_name: String,
    /// Family name.
    #[arg(long)]
    pub last_name: Option<String>,
    /// Contact phone.
    #[arg(long)]
    pub phone: Option<String>,
    /// Requested role (`user`, `mechanic`, `admin`).
    #[arg(long)]
    pub role: Option<String>,
    /// Chosen password.
    #[arg(long, env = "CRM_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// `crm open`.
#[derive(Debug, Clone, Args)]
pub struct OpenArgs {
    /// Route path such as `/admin/mechanic`.
    pub route: String,
    /// Free-text table filter.
    #[arg(long)]
    pub search: Option<String>,
    /// Column to sort by.
    #[arg(long, value_name = "column")]
    pub sort: Option<String>,
    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// One-based page number.
    #[arg(long, default_value = "1")]
    pub page: NonZeroUsize,
}

/// A record identifier.
#[derive(Debug, Clone, Args)]
pub struct IdArgs {
    /// Record identifier.
    pub id: String,
}

/// Field assignments for a new record.
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// `field=value` assignment; repeat for each field.
    #[arg(long = "set", value_name = "field=value")]
    pub assignments: Vec<String>,
}

/// Field assignments applied on top of an existing record.
#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// Record identifier.
    pub id: String,
    /// `field=value` assignment; repeat for each field.
    #[arg(long = "set", value_name = "field=value")]
    pub assignments: Vec<String>,
}

/// Deletion of one record.
#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Record identifier.
    pub id: String,
    /// Confirm the deletion.
    #[arg(long)]
    pub yes: bool,
}

/// `crm mechanic`.
#[derive(Debug, Clone, Subcommand)]
pub enum MechanicCommand {
    /// Accept a pending application.
    Approve(IdArgs),
    /// Decline a pending application.
    Reject(IdArgs),
    /// Suspend an active mechanic.
    Suspend(IdArgs),
    /// Register a mechanic.
    Create(CreateArgs),
    /// Edit a mechanic.
    Edit(EditArgs),
    /// Delete a mechanic.
    Delete(DeleteArgs),
}

/// `crm service`.
#[derive(Debug, Clone, Subcommand)]
pub enum ServiceCommand {
    /// Add a service.
    Create(CreateArgs),
    /// Edit a service.
    Edit(EditArgs),
    /// Remove a service.
    Delete(DeleteArgs),
}

/// `crm service-request`.
#[derive(Debug, Clone, Subcommand)]
pub enum ServiceRequestCommand {
    /// Book a service.
    Create(CreateArgs),
    /// Edit a booking.
    Edit(EditArgs),
    /// Remove a booking.
    Delete(DeleteArgs),
}

/// `crm feedback`.
#[derive(Debug, Clone, Subcommand)]
pub enum FeedbackCommand {
    /// Edit a review.
    Edit(EditArgs),
    /// Remove a review.
    Delete(DeleteArgs),
}

/// `crm user`.
#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// Edit an account.
    Edit(EditArgs),
    /// Remove an account.
    Delete(DeleteArgs),
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument parsing.

    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("crm").chain(args.iter().copied()))
    }

    #[rstest]
    fn global_options_follow_subcommands() {
        let cli = parse(&["open", "/admin", "--base-url", "http://crm.test", "--log-json"])
            .expect("arguments parse");
        assert_eq!(cli.globals.base_url.as_deref(), Some("http://crm.test"));
        assert_eq!(cli.globals.log_format(), LogFormat::Json);
    }

    #[rstest]
    fn open_defaults_to_the_first_page() {
        let cli = parse(&["open", "/admin/mechanic", "--sort", "name"]).expect("arguments parse");
        let Command::Open(open) = cli.command else {
            panic!("expected open command");
        };
        assert_eq!(open.page.get(), 1);
        assert!(!open.desc);
    }

    #[rstest]
    #[case(&["open", "/admin", "--page", "0"])]
    #[case(&["open", "/admin", "--desc"])]
    #[case(&["feedback", "approve", "1"])]
    fn invalid_invocations_are_rejected(#[case] args: &[&str]) {
        assert!(parse(args).is_err(), "{args:?}");
    }

    #[rstest]
    fn repeated_assignments_are_collected() {
        let cli = parse(&[
            "service-request",
            "edit",
            "7",
            "--set",
            "status=completed",
            "--set",
            "price=45",
        ])
        .expect("arguments parse");
        let Command::ServiceRequest(ServiceRequestCommand::Edit(edit)) = cli.command else {
            panic!("expected service-request edit");
        };
        assert_eq!(edit.id, "7");
        assert_eq!(edit.assignments, ["status=completed", "price=45"]);
    }
}
