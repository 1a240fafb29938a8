//! Fixtures shared by the unit tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Serializes tests that change the process working directory or spawn children.
///
/// Writing a script while another thread forks can leave the script open in the
/// child long enough for `exec` to fail with `ETXTBSY`.
pub(crate) fn lock_process() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_file(dir: &Path, name: &str, content: &str, mode: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("chmod fixture");
    path
}

/// An executable `/bin/sh` script with the given body.
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    write_file(dir, name, &format!("#!/bin/sh\n{}\n", body), 0o755)
}
