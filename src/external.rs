use crate::command::{ExecutableCommand, ExitCode, Stdout};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::lexer;
use nix::errno::Errno;
use nix::unistd::{AccessFlags, access};
use std::ffi::OsString;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Command that is not a builtin: a program on disk plus its argument vector.
///
/// `argv[0]` is what the program sees as its own name; the remaining elements are
/// passed verbatim, without globbing or further splitting.
#[derive(Debug)]
pub struct ExternalCommand {
    program: PathBuf,
    argv: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<PathBuf>, argv: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            argv,
        }
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        stdout: Box<dyn Stdout>,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let program = self.program.display().to_string();

        let mut cmd = std::process::Command::new(&self.program);
        if let Some((arg0, args)) = self.argv.split_first() {
            cmd.arg0(arg0).args(args);
        }
        cmd.stdin(Stdio::inherit())
            .stdout(stdout.stdio())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(&env.vars)
            .current_dir(&env.current_dir);

        let mut child = cmd
            .spawn()
            .map_err(|source| launch_error(program.clone(), source))?;
        tracing::debug!(pid = child.id(), program = %program, "spawned child");

        let exit_status = child.wait()?;
        let code = match exit_status.code() {
            Some(x) => x,
            None => terminated_by_signal(exit_status),
        };
        tracing::debug!(program = %program, code, "child exited");
        Ok(code)
    }
}

/// Tell "could not create a process" apart from "could not load the program".
fn launch_error(program: String, source: io::Error) -> ShellError {
    match source.raw_os_error().map(Errno::from_raw) {
        Some(Errno::EAGAIN | Errno::ENOMEM) => ShellError::Spawn { program, source },
        _ => ShellError::Exec { program, source },
    }
}

fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

/// Whether `path` exists and the current user may execute it.
///
/// Uses the real user id, like `access(2)` with `F_OK | X_OK`. Any failure,
/// including a path too long to be valid, counts as "no".
pub fn is_executable(path: &Path) -> bool {
    access(path, AccessFlags::F_OK | AccessFlags::X_OK).is_ok()
}

/// Find the first directory in a colon-separated `search_paths` list that holds
/// an executable called `name`.
///
/// Directories are tried in listed order and the first hit wins. Empty entries
/// are skipped; entries that cannot form a valid path simply don't match.
pub fn find_in_path(search_paths: &str, name: &str) -> Option<PathBuf> {
    lexer::split(search_paths, &[':'], usize::MAX)
        .into_iter()
        .map(Path::new)
        .find(|dir| is_executable(&dir.join(name)))
        .map(Path::to_path_buf)
}

/// Resolve an absolute-path command line to the program it names.
///
/// The whole line is tried first so that paths containing spaces work. Failing
/// that, the first word is tried and everything after it is returned as ignored
/// text: absolute-path commands take no arguments.
pub fn find_absolute(line: &str) -> Option<(&str, &str)> {
    if is_executable(Path::new(line)) {
        return Some((line, ""));
    }

    let (program, rest) = line.split_once(lexer::WHITESPACE)?;
    if is_executable(Path::new(program)) {
        Some((program, lexer::trim(rest)))
    } else {
        None
    }
}
