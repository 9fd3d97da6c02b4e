//! Filesystem adapters.

mod atomic_io;
mod file_session_storage;

pub use file_session_storage::FileSessionStorage;
