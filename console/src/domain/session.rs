//! Client session state.
//!
//! [`SessionContext`] is created once at startup from persisted storage and
//! passed to whatever needs the signed-in account. State changes only through
//! [`SessionContext::login`] and [`SessionContext::logout`], and both keep the
//! persisted entry in step.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ports::{SessionStorage, SessionStorageError};
use super::{RecordId, Role};

/// Storage key holding the persisted session.
pub const SESSION_KEY: &str = "user";

/// The signed-in account as the console remembers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Backend identifier.
    pub id: RecordId,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    user: SessionUser,
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct SessionState {
    user: Option<SessionUser>,
    token: Option<String>,
}

/// Current session plus the storage it is persisted to.
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
    state: SessionState,
}

impl SessionContext {
    /// Restore the session persisted in `storage`.
    ///
    /// A missing entry yields a signed-out session. An entry that does not
    /// parse is removed, logged, and also yields a signed-out session.
    pub fn initialize(storage: Arc<dyn SessionStorage>) -> Self {
        let state = match storage.read(SESSION_KEY) {
            Ok(Some(raw)) => Self::restore(storage.as_ref(), &raw),
            Ok(None) => SessionState::default(),
            Err(error) => {
                warn!(%error, "could not read persisted session; starting signed out");
                SessionState::default()
            }
        };
        Self { storage, state }
    }

    fn restore(storage: &dyn SessionStorage, raw: &str) -> SessionState {
        match serde_json::from_str::<PersistedSession>(raw) {
            Ok(persisted) => {
                debug!(email = %persisted.user.email, "restored persisted session");
                SessionState {
                    user: Some(persisted.user),
                    token: Some(persisted.token),
                }
            }
            Err(error) => {
                warn!(%error, "discarding corrupt persisted session");
                if let Err(remove_error) = storage.remove(SESSION_KEY) {
                    warn!(error = %remove_error, "could not remove corrupt session entry");
                }
                SessionState::default()
            }
        }
    }

    /// Mark `user` as signed in with `token` and persist both.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError`] when persisting fails; the in-memory
    /// session is still updated.
    pub fn login(&mut self, user: SessionUser, token: String) -> Result<(), SessionStorageError> {
        let persisted = PersistedSession { user, token };
        let encoded = serde_json::to_string(&persisted)
            .map_err(|error| SessionStorageError::io(error.to_string()))?;
        self.state = SessionState {
            user: Some(persisted.user),
            token: Some(persisted.token),
        };
        self.storage.write(SESSION_KEY, &encoded)
    }

    /// Forget the signed-in account and remove the persisted entry.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError`] when the entry cannot be removed; the
    /// in-memory session is cleared regardless.
    pub fn logout(&mut self) -> Result<(), SessionStorageError> {
        self.state = SessionState::default();
        self.storage.remove(SESSION_KEY)
    }

    /// Signed-in account, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        self.state.user.as_ref()
    }

    /// Bearer token of the signed-in account.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    /// Role of the signed-in account.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.user().map(|user| &user.role)
    }

    /// Whether an account is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{InMemorySessionStorage, MockSessionStorage};
    use rstest::{fixture, rstest};

    #[fixture]
    fn mechanic() -> SessionUser {
        SessionUser {
            id: RecordId::Numeric(7),
            email: "juma@garage.test".to_owned(),
            name: "Juma".to_owned(),
            role: Role::Mechanic,
        }
    }

    #[rstest]
    fn login_persists_user_and_token(mechanic: SessionUser) {
        let storage = Arc::new(InMemorySessionStorage::default());
        let mut session = SessionContext::initialize(storage.clone());
        session
            .login(mechanic.clone(), "tok-1".to_owned())
            .expect("login persists");

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-1"));
        let raw = storage
            .read(SESSION_KEY)
            .expect("read succeeds")
            .expect("entry exists");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(
            value,
            serde_json::json!({
                "user": {"id": 7, "email": "juma@garage.test", "name": "Juma", "role": "mechanic"},
                "token": "tok-1"
            })
        );
    }

    #[rstest]
    fn persisted_sessions_survive_restart(mechanic: SessionUser) {
        let storage = Arc::new(InMemorySessionStorage::default());
        SessionContext::initialize(storage.clone())
            .login(mechanic.clone(), "tok-2".to_owned())
            .expect("login persists");

        let restored = SessionContext::initialize(storage);
        assert_eq!(restored.user(), Some(&mechanic));
        assert_eq!(restored.role(), Some(&Role::Mechanic));
    }

    #[rstest]
    fn logout_clears_state_and_storage(mechanic: SessionUser) {
        let storage = Arc::new(InMemorySessionStorage::default());
        let mut session = SessionContext::initialize(storage.clone());
        session
            .login(mechanic, "tok-3".to_owned())
            .expect("login persists");
        session.logout().expect("logout succeeds");

        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(storage.read(SESSION_KEY), Ok(None));
    }

    #[test]
    fn corrupt_entries_are_removed() {
        let mut storage = MockSessionStorage::new();
        storage
            .expect_read()
            .withf(|key| key == SESSION_KEY)
            .return_once(|_| Ok(Some("{not json".to_owned())));
        storage
            .expect_remove()
            .withf(|key| key == SESSION_KEY)
            .times(1)
            .return_once(|_| Ok(()));

        let session = SessionContext::initialize(Arc::new(storage));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn unreadable_storage_starts_signed_out() {
        let mut storage = MockSessionStorage::new();
        storage
            .expect_read()
            .return_once(|_| Err(SessionStorageError::io("disk gone")));

        let session = SessionContext::initialize(Arc::new(storage));
        assert_eq!(session.user(), None);
    }
}
