use std::io;
use thiserror::Error;

/// Everything that can go wrong while running one command line.
///
/// None of these are fatal to the shell: the REPL reports them and prompts again.
#[derive(Debug, Error)]
pub enum ShellError {
    /// An absolute path that does not exist or is not executable.
    #[error("{path}: file not found or not executable")]
    FileNotFound { path: String },

    /// A bare name that no PATH directory provides.
    #[error("{name}: command not found")]
    CommandNotFound { name: String },

    /// The child process could not be created (e.g. the process limit was hit).
    #[error("{program}: cannot create process: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The child was created but the program image could not be loaded.
    #[error("{program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A built-in failed; the message carries the built-in's own context.
    #[error("{0:#}")]
    Builtin(anyhow::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ShellError>;
