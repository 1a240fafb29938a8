//! `dsh`: a tiny interactive command interpreter.
//!
//! Every input line is normalized, classified and run to completion before the
//! next prompt. A line is one of:
//! - empty, which does nothing;
//! - a built-in (`exit`, `pwd`, `cd [dir]`) executed in-process;
//! - an absolute path (`/usr/bin/true`), executed with no extra arguments;
//! - anything else, whose first word is looked up in `PATH` and executed with the
//!   remaining words as arguments.
//!
//! The main entry point is [`Interpreter`]. The public modules [`command`],
//! [`env`] and [`lexer`] expose the classification, environment and word
//! splitting used by it, and [`limits`] installs the process-count cap the
//! binary sets up at startup.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod external;
mod interpreter;
pub mod lexer;
pub mod limits;

#[cfg(test)]
mod test_util;

pub use config::ShellConfig;
pub use error::ShellError;
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::Interpreter;
