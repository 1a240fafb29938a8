//! Process-count cap installed once at startup.
//!
//! The limit is enforced by the kernel for the whole process tree, so a runaway
//! chain of shells spawning shells ends in an ordinary spawn failure.

use nix::sys::resource::{Resource, getrlimit, rlim_t, setrlimit};

/// Set both the soft and hard `RLIMIT_NPROC` to `max_processes`.
///
/// The value is clamped to the current hard limit, since an unprivileged process
/// may only lower it. Returns the limit actually installed.
pub fn install_process_limit(max_processes: u64) -> nix::Result<rlim_t> {
    let (_, hard) = getrlimit(Resource::RLIMIT_NPROC)?;
    let cap = rlim_t::from(max_processes).min(hard);
    setrlimit(Resource::RLIMIT_NPROC, cap, cap)?;
    Ok(cap)
}
