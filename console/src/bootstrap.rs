//! Wiring from settings to a ready [`Console`].

use std::io::{self, Write};
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::debug;

use crate::config::{ConfigError, ConsoleSettings};
use crate::domain::ports::{SessionStorage, SessionStorageError};
use crate::domain::{AuthService, CrmPorts, CrmService, QueryCache, SessionContext};
use crate::inbound::cli::{Cli, Console, ConsoleError};
use crate::outbound::http::BackendApi;
use crate::outbound::storage::FileSessionStorage;

/// Failures before or while running a command.
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings could not be loaded or interpreted.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The state directory could not be opened.
    #[error(transparent)]
    Storage(#[from] SessionStorageError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The async runtime could not start.
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] io::Error),
    /// The command itself failed.
    #[error(transparent)]
    Command(#[from] ConsoleError),
}

/// Build a console from fully merged settings.
///
/// The stored session, if any, supplies the bearer token for every request.
///
/// # Errors
///
/// Returns [`AppError`] when settings are invalid, the state directory
/// cannot be opened, or the HTTP client cannot be built.
pub fn build_console(settings: &ConsoleSettings) -> Result<Console, AppError> {
    let state_dir = settings.state_dir()?;
    let storage: Arc<dyn SessionStorage> = Arc::new(FileSessionStorage::open(&state_dir)?);
    let session = SessionContext::initialize(storage);

    let base_url = settings.base_url()?;
    let api = Arc::new(
        BackendApi::new(base_url, settings.request_timeout())?
            .with_token(session.token().map(str::to_owned)),
    );
    debug!(
        base_url = %api.base_url(),
        state_dir = %state_dir,
        signed_in = session.is_authenticated(),
        "console wired"
    );

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = CrmPorts {
        mechanics: api.clone(),
        services: api.clone(),
        service_requests: api.clone(),
        feedback: api.clone(),
        users: api.clone(),
        monitoring: api.clone(),
    };
    let crm = CrmService::new(ports, QueryCache::new(Arc::clone(&clock)));
    let auth = AuthService::new(api);
    Ok(Console::new(crm, auth, session, clock, settings.page_size()))
}

/// Load settings, wire the console, and run `cli` on a current-thread
/// runtime.
///
/// # Errors
///
/// Returns the first [`AppError`] raised.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<(), AppError> {
    let settings = ConsoleSettings::from_environment()?.with_overrides(cli.globals.overrides());
    let mut console = build_console(&settings)?;
    let runtime = Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(console.run(cli.command, out))?;
    Ok(())
}
