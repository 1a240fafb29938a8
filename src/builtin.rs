use crate::command::{ExecutableCommand, ExitCode, Stdout};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use anyhow::{Context, anyhow};
use argh::{EarlyExit, FromArgs};
use std::env as stdenv;
use std::fs;
use std::io::Write;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "pwd" or "cd".
    fn name() -> &'static str;

    /// Executes the command, writing any output to `stdout`.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> anyhow::Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        mut stdout: Box<dyn Stdout>,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let code = BuiltinCommand::execute(*self, &mut stdout, env).map_err(ShellError::Builtin)?;
        stdout.flush()?;
        Ok(code)
    }
}

/// Result of argument parsing that did not produce a command: `--help` or a usage error.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        mut stdout: Box<dyn Stdout>,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        if self.is_error {
            return Err(ShellError::Builtin(anyhow!("{}", self.output.trim_end())));
        }
        stdout.write_all(self.output.as_bytes())?;
        stdout.flush()?;
        Ok(0)
    }
}

/// Parse `args` for builtin `T`.
pub(crate) fn create<T: BuiltinCommand + 'static>(args: &[&str]) -> Box<dyn ExecutableCommand> {
    match T::from_args(&[T::name()], args) {
        Ok(cmd) => Box::new(cmd),
        Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
            output,
            is_error: status.is_err(),
        }),
    }
}

#[derive(FromArgs)]
/// Print the current working directory to standard output.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(self, stdout: &mut dyn Write, _env: &mut Environment) -> anyhow::Result<ExitCode> {
        let cwd = stdenv::current_dir().context("pwd")?;
        writeln!(stdout, "{}", cwd.display())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
/// If no target is provided, changes to the directory specified by the HOME environment variable.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory. Defaults to $HOME when omitted.
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> anyhow::Result<ExitCode> {
        let target = match self.target {
            Some(t) if !t.is_empty() => t,
            _ => env
                .home()
                .map(str::to_owned)
                .ok_or_else(|| anyhow!("cd: HOME not set"))?,
        };

        // `join` keeps absolute targets as they are.
        let new_dir = env.current_dir.join(&target);

        let canonical = fs::canonicalize(&new_dir).with_context(|| format!("cd: {}", target))?;
        stdenv::set_current_dir(&canonical).with_context(|| format!("cd: {}", target))?;
        tracing::debug!(dir = %canonical.display(), "changed directory");
        env.current_dir = canonical;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Exit the shell with status 0.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> anyhow::Result<ExitCode> {
        env.should_exit = true;
        Ok(0)
    }
}
