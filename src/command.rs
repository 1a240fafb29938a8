use crate::env::Environment;
use crate::error::Result;
use crate::lexer;
use std::io::Write;
use std::process::Stdio;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Children killed by a signal report `128 + signal`, as POSIX shells do.
pub type ExitCode = i32;

/// Abstraction over a writable output stream that can also be converted into
/// a [`Stdio`] handle for spawning external processes.
///
/// A blanket implementation exists for any type that implements `Write` and `Into<Stdio>`
/// (e.g. `std::io::Stdout` or `std::fs::File`).
pub trait Stdout: Write {
    /// Convert this output into a [`Stdio`] handle suitable for `std::process::Command`.
    fn stdio(self: Box<Self>) -> Stdio;
}

impl<T: Write + Into<Stdio>> Stdout for T {
    fn stdio(self: Box<Self>) -> Stdio {
        (*self).into()
    }
}

/// Object-safe trait for anything the router can run to completion.
///
/// Implemented by built-ins via a blanket impl and by external commands.
pub trait ExecutableCommand {
    /// Executes the command, blocking until it is done.
    fn execute(self: Box<Self>, stdout: Box<dyn Stdout>, env: &mut Environment)
    -> Result<ExitCode>;
}

/// What a normalized command line asks the shell to do.
///
/// Produced by [`classify`]; borrows from the line and lives for one iteration only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified<'a> {
    /// Nothing to do.
    Empty,
    /// The `exit` built-in.
    Exit,
    /// The `pwd` built-in.
    Pwd,
    /// The `cd` built-in with its trimmed argument, `None` meaning `$HOME`.
    Cd(Option<&'a str>),
    /// A line starting with `/`: run the program at that path.
    Absolute(&'a str),
    /// Anything else: look the first word up in PATH.
    Search(&'a str),
}

/// Classify an already normalized line.
///
/// Rules are applied in priority order: empty, exact `exit`, exact `pwd`,
/// anything starting with `cd`, anything starting with `/`, and finally PATH search.
/// The `cd` rule is a plain prefix test, so `cdrom` reads as `cd rom`.
pub fn classify(line: &str) -> Classified<'_> {
    if line.is_empty() {
        Classified::Empty
    } else if line == "exit" {
        Classified::Exit
    } else if line == "pwd" {
        Classified::Pwd
    } else if let Some(rest) = line.strip_prefix("cd") {
        match lexer::trim(rest) {
            "" => Classified::Cd(None),
            path => Classified::Cd(Some(path)),
        }
    } else if line.starts_with('/') {
        Classified::Absolute(line)
    } else {
        Classified::Search(line)
    }
}
