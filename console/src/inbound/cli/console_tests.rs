//! Tests for command dispatch against mocked ports.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    ApiError, InMemorySessionStorage, MockAuthGateway, MockFeedbackInbox, MockMechanicDirectory,
    MockMonitoringFeed, MockServiceCatalogue, MockServiceRequestBook, MockUserDirectory,
};
use crate::domain::{
    CrmPorts, Mechanic, MonitoringSnapshot, QueryCache, SESSION_KEY, SessionContext,
};
use crate::inbound::cli::args::Cli;
use clap::Parser;

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

fn mechanic(id: i64, name: &str) -> Mechanic {
    Mechanic {
        id: RecordId::Numeric(id),
        name: name.to_owned(),
        email: format!("{}@garage.test", name.to_lowercase()),
        phone: "0711000000".to_owned(),
        location: "Nakuru".to_owned(),
        notes: None,
        status: "pending".to_owned(),
        specialization: "Brakes".to_owned(),
        rejection_reason: None,
        is_verified: None,
        experience: None,
        certifications: None,
    }
}

fn persisted(role: &str) -> String {
    format!(
        r#"{{"user":{{"id":9,"email":"op@garage.test","name":"Operator","role":"{role}"}},"token":"tok"}}"#
    )
}

#[derive(Default)]
struct Harness {
    auth: MockAuthGateway,
    mechanics: MockMechanicDirectory,
    services: MockServiceCatalogue,
    service_requests: MockServiceRequestBook,
    feedback: MockFeedbackInbox,
    users: MockUserDirectory,
    monitoring: MockMonitoringFeed,
    stored_role: Option<&'static str>,
}

impl Harness {
    fn signed_in_as(mut self, role: &'static str) -> Self {
        self.stored_role = Some(role);
        self
    }

    fn into_console(self) -> Console {
        let storage = match self.stored_role {
            Some(role) => InMemorySessionStorage::with_entry(SESSION_KEY, &persisted(role)),
            None => InMemorySessionStorage::default(),
        };
        let ports = CrmPorts {
            mechanics: Arc::new(self.mechanics),
            services: Arc::new(self.services),
            service_requests: Arc::new(self.service_requests),
            feedback: Arc::new(self.feedback),
            users: Arc::new(self.users),
            monitoring: Arc::new(self.monitoring),
        };
        let clock: Arc<dyn Clock> = Arc::new(FixtureClock);
        Console::new(
            CrmService::new(ports, QueryCache::new(Arc::clone(&clock))),
            AuthService::new(Arc::new(self.auth)),
            SessionContext::initialize(Arc::new(storage)),
            clock,
            5,
        )
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::default()
}

fn command(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("crm").chain(args.iter().copied()))
        .expect("arguments parse")
        .command
}

async fn run(console: &mut Console, args: &[&str]) -> (Result<(), ConsoleError>, String) {
    let mut buffer = Vec::new();
    let result = console.run(command(args), &mut buffer).await;
    (result, String::from_utf8(buffer).expect("utf-8 output"))
}

#[rstest]
#[tokio::test]
async fn anonymous_admin_routes_redirect_to_login(harness: Harness) {
    let mut console = harness.into_console();
    let (result, text) = run(&mut console, &["open", "/admin/mechanic"]).await;

    result.expect("redirect renders the login screen");
    assert!(text.starts_with("[info] Redirected to /auth/login"));
    assert!(text.contains("Login to Your Account"));
}

#[rstest]
#[tokio::test]
async fn users_opening_admin_routes_land_on_their_dashboard(harness: Harness) {
    let mut console = harness.signed_in_as("user").into_console();
    let (result, text) = run(&mut console, &["open", "/admin"]).await;

    result.expect("redirect renders");
    assert!(text.contains("Redirected to /user"));
    assert!(text.contains("User Dashboard | Operator (user)"));
    assert!(text.contains("Profile Complete"));
}

#[rstest]
#[tokio::test]
async fn admin_dashboard_renders_monitoring_counters(mut harness: Harness) {
    harness.monitoring.expect_snapshot().times(1).returning(|| {
        Ok(MonitoringSnapshot {
            active_users: Some(4),
            active_mechanics: Some(2),
            total_services: Some(7),
            total_feedbacks: None,
        })
    });
    let mut console = harness.signed_in_as("admin").into_console();
    let (result, text) = run(&mut console, &["open", "/admin"]).await;

    result.expect("dashboard renders");
    assert!(text.contains("[Dashboard] | Users"));
    assert!(text.contains("Welcome to the Admin Dashboard"));
    assert!(text.contains("Total Services"));
    assert!(text.contains("(c) 2026 CRM System"));
}

#[rstest]
#[tokio::test]
async fn mechanic_table_applies_search_sort_and_page(mut harness: Harness) {
    harness.mechanics.expect_list_mechanics().times(1).returning(|| {
        Ok(vec![
            mechanic(1, "Baraka"),
            mechanic(2, "Amina"),
            mechanic(3, "Juma"),
        ])
    });
    let mut console = harness.signed_in_as("superadmin").into_console();
    let (result, text) = run(
        &mut console,
        &["open", "/admin/mechanic", "--search", "a", "--sort", "name", "--desc", "--page", "9"],
    )
    .await;

    result.expect("table renders");
    let baraka = text.find("Baraka").expect("Baraka listed");
    let amina = text.find("Amina").expect("Amina listed");
    assert!(baraka < amina, "descending order expected:\n{text}");
    assert!(text.contains("Name v"));
    assert!(text.contains("Total Pages: 1 | Showing 3 of 3 mechanics"));
}

#[rstest]
#[tokio::test]
async fn unknown_sort_columns_are_reported(mut harness: Harness) {
    harness
        .mechanics
        .expect_list_mechanics()
        .returning(|| Ok(vec![mechanic(1, "Baraka")]));
    let mut console = harness.signed_in_as("admin").into_console();
    let (result, _) = run(&mut console, &["open", "/admin/mechanic", "--sort", "phone"]).await;

    let err = result.expect_err("phone is not sortable");
    assert_eq!(err.to_string(), "column 'phone' is not sortable");
}

#[rstest]
#[tokio::test]
async fn approving_a_mechanic_reports_the_transition(mut harness: Harness) {
    harness
        .mechanics
        .expect_approve_mechanic()
        .withf(|id| *id == RecordId::Numeric(3))
        .times(1)
        .returning(|_| Ok(mechanic(3, "Juma")));
    let mut console = harness.signed_in_as("admin").into_console();
    let (result, text) = run(&mut console, &["mechanic", "approve", "3"]).await;

    result.expect("approval succeeds");
    assert_eq!(text, "[ok] Mechanic approved!\n");
}

#[rstest]
#[tokio::test]
async fn mechanics_cannot_run_admin_commands(harness: Harness) {
    let mut console = harness.signed_in_as("mechanic").into_console();
    let (result, _) = run(&mut console, &["mechanic", "suspend", "3"]).await;

    assert!(matches!(
        result,
        Err(ConsoleError::Forbidden {
            route: Route::MechanicDashboard
        })
    ));
}

#[rstest]
#[tokio::test]
async fn mechanics_may_create_services(mut harness: Harness) {
    harness
        .services
        .expect_create_service()
        .withf(|form| form.name == "Brake bleed" && form.duration == 45)
        .times(1)
        .returning(|_| Err(ApiError::status(409_u16, "Service already exists")));
    let mut console = harness.signed_in_as("mechanic").into_console();
    let (result, _) = run(
        &mut console,
        &[
            "service",
            "create",
            "--set",
            "name=Brake bleed",
            "--set",
            "description=Flush and bleed",
            "--set",
            "price=1500",
            "--set",
            "duration=45",
        ],
    )
    .await;

    let err = result.expect_err("backend refuses");
    assert_eq!(err.to_string(), "Service already exists");
}

#[rstest]
#[tokio::test]
async fn edits_are_seeded_from_the_fetched_record(mut harness: Harness) {
    harness
        .mechanics
        .expect_list_mechanics()
        .returning(|| Ok(vec![mechanic(1, "Baraka"), mechanic(2, "Amina")]));
    harness
        .mechanics
        .expect_update_mechanic()
        .withf(|id, form| {
            *id == RecordId::Numeric(2)
                && form.name == "Amina"
                && form.location == "Eldoret"
                && form.status == "pending"
        })
        .times(1)
        .returning(|_, _| Ok(mechanic(2, "Amina")));
    let mut console = harness.signed_in_as("admin").into_console();
    let (result, text) = run(
        &mut console,
        &["mechanic", "edit", "2", "--set", "location=Eldoret"],
    )
    .await;

    result.expect("update succeeds");
    assert_eq!(text, "[ok] Mechanic updated!\n");
}

#[rstest]
#[tokio::test]
async fn editing_a_missing_record_fails_before_any_update(mut harness: Harness) {
    harness
        .feedback
        .expect_list_feedback()
        .returning(|| Ok(Vec::new()));
    harness.feedback.expect_update_feedback().never();
    let mut console = harness.signed_in_as("admin").into_console();
    let (result, _) = run(&mut console, &["feedback", "edit", "44", "--set", "rating=4"]).await;

    let err = result.expect_err("record is absent");
    assert_eq!(err.to_string(), "No feedback with id 44");
}

#[rstest]
#[tokio::test]
async fn deletes_require_confirmation(mut harness: Harness) {
    harness.users.expect_delete_user().never();
    let mut console = harness.signed_in_as("admin").into_console();
    let (result, _) = run(&mut console, &["user", "delete", "5"]).await;

    assert!(matches!(
        result,
        Err(ConsoleError::ConfirmationRequired { entity: "user" })
    ));
}

#[rstest]
#[tokio::test]
async fn confirmed_deletes_reach_the_backend(mut harness: Harness) {
    harness
        .service_requests
        .expect_delete_service_request()
        .withf(|id| *id == RecordId::Text("req-7".to_owned()))
        .times(1)
        .returning(|_| Ok(()));
    let mut console = harness.signed_in_as("admin").into_console();
    let (result, text) = run(
        &mut console,
        &["service-request", "delete", "req-7", "--yes"],
    )
    .await;

    result.expect("delete succeeds");
    assert_eq!(text, "[ok] Service request deleted!\n");
}

#[rstest]
#[tokio::test]
async fn logout_clears_the_session(harness: Harness) {
    let mut console = harness.signed_in_as("admin").into_console();
    let (result, text) = run(&mut console, &["logout"]).await;

    result.expect("logout succeeds");
    assert_eq!(text, "[ok] Logged out.\n");
    assert!(!console.session().is_authenticated());

    let (_, whoami) = run(&mut console, &["whoami"]).await;
    assert_eq!(whoami, "Not signed in.\n");
}
