//! Atomic replacement of small files inside a capability directory.
//!
//! Contents go to a hidden sibling first, are synced, then renamed over the
//! target, so a crash never leaves a half-written session entry behind.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` in `dir` with `contents`.
///
/// # Errors
///
/// Returns [`io::ErrorKind::InvalidInput`] when `file_name` is not a single
/// normal path component, or the I/O error of the failed step. The temporary
/// file is removed on failure.
pub(crate) fn write_atomic(dir: &Dir, file_name: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let target = single_component(file_name)?;
    let temp_name = format!(
        ".{target}.{}.{}.tmp",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );

    let written = write_synced(dir, &temp_name, contents)
        .and_then(|()| replace(dir, &temp_name, target));
    if written.is_err() {
        drop(dir.remove_file(&temp_name));
        return written;
    }

    // Directory sync is best-effort; the rename has already landed.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
    Ok(())
}

fn single_component(path: &Utf8Path) -> io::Result<&str> {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(name)), None) => Ok(name),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{path}' is not a plain file name"),
        )),
    }
}

fn write_synced(dir: &Dir, name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn replace(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    match dir.remove_file(to) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err),
        _ => {}
    }
    dir.rename(from, dir, to)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    dir.rename(from, dir, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_std::ambient_authority;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> (TempDir, Dir) {
        let temp = TempDir::new().expect("temp dir");
        let dir = Dir::open_ambient_dir(temp.path(), ambient_authority()).expect("open temp dir");
        (temp, dir)
    }

    #[rstest]
    fn replaces_existing_contents(scratch: (TempDir, Dir)) {
        let (_temp, dir) = scratch;
        let name = Utf8Path::new("user.json");
        write_atomic(&dir, name, b"first").expect("first write");
        write_atomic(&dir, name, b"second").expect("second write");

        assert_eq!(dir.read_to_string(name).expect("read back"), "second");
        let leftovers = dir
            .entries()
            .expect("list dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[rstest]
    #[case("nested/user.json")]
    #[case("../user.json")]
    #[case("")]
    fn rejects_paths_that_are_not_plain_names(scratch: (TempDir, Dir), #[case] name: &str) {
        let (_temp, dir) = scratch;
        let err = write_atomic(&dir, Utf8Path::new(name), b"x").expect_err("must reject");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
