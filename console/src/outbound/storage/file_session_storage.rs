//! Session storage persisted as one JSON file per key in a state directory.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_io::write_atomic;
use crate::domain::ports::{SessionStorage, SessionStorageError};

/// File-backed [`SessionStorage`] rooted at a capability directory.
///
/// Keys map to `<key>.json` inside the directory. Only ASCII alphanumerics,
/// `-` and `_` are accepted so a key can never escape the root.
#[derive(Debug)]
pub struct FileSessionStorage {
    dir: Dir,
    root: Utf8PathBuf,
}

impl FileSessionStorage {
    /// Open `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Utf8Path) -> Result<Self, SessionStorageError> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(root, ambient_authority()))
            .map(|dir| Self {
                dir,
                root: root.to_owned(),
            })
            .map_err(|err| io_error(root.as_str(), &err))
    }

    /// Directory the entries live in.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: &str) -> Result<Utf8PathBuf, SessionStorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Utf8PathBuf::from(format!("{key}.json")))
        } else {
            Err(SessionStorageError::invalid_key(key))
        }
    }
}

fn io_error(subject: &str, err: &io::Error) -> SessionStorageError {
    SessionStorageError::io(format!("{subject}: {err}"))
}

impl SessionStorage for FileSessionStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        let name = Self::file_name(key)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(name.as_str(), &err)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        let name = Self::file_name(key)?;
        write_atomic(&self.dir, &name, value.as_bytes())
            .map_err(|err| io_error(name.as_str(), &err))?;
        debug!(root = %self.root, entry = %name, "session entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        let name = Self::file_name(key)?;
        match self.dir.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(name.as_str(), &err)),
        }
    }
}
