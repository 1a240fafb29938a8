use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Mutable, shell-level view of the process environment.
///
/// The environment contains:
/// - `vars`: variables handed to every child process; `HOME` and `PATH` are read from here.
///   Stored as raw OS strings so variables that are not valid UTF-8 still reach children.
/// - `current_dir`: the working directory children are started in; kept in sync with
///   the process working directory by `cd`.
/// - `should_exit`: set by `exit`, checked by the read loop after every line.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, HOME).
    pub vars: HashMap<OsString, OsString>,
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// When set to true, the read loop stops before reading another line.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    pub fn new() -> Self {
        let vars = stdenv::vars_os().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            vars,
            current_dir,
            should_exit: false,
        }
    }

    /// An environment with no variables at all, rooted at `current_dir`.
    pub fn empty(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            current_dir: current_dir.into(),
            should_exit: false,
        }
    }

    /// Get the value of an environment variable.
    ///
    /// Values that are not valid UTF-8 read as unset.
    pub fn get_var(&self, key: &str) -> Option<&str> {
        self.vars.get(OsStr::new(key)).and_then(|val| val.to_str())
    }

    /// Set or override an environment variable.
    pub fn set_var(&mut self, key: impl Into<OsString>, val: impl Into<OsString>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Remove an environment variable, returning its previous value.
    pub fn remove_var(&mut self, key: &str) -> Option<OsString> {
        self.vars.remove(OsStr::new(key))
    }

    /// Colon-separated directory list used for bare-name lookup. Unset means empty.
    pub fn search_paths(&self) -> &str {
        self.get_var("PATH").unwrap_or_default()
    }

    /// Target of a bare `cd`.
    pub fn home(&self) -> Option<&str> {
        self.get_var("HOME")
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
