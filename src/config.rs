/// Default prompt printed before every read.
pub const DEFAULT_PROMPT: &str = "dsh> ";

/// Default cap on simultaneously live processes owned by the user.
pub const DEFAULT_MAX_PROCESSES: u64 = 250;

/// Default number of words kept from a PATH-search command line.
pub const DEFAULT_MAX_TOKENS: usize = 10;

/// Tunables of an interactive session.
///
/// There are no config files; callers start from [`Default`] and override fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Text printed before each line is read.
    pub prompt: String,
    /// Value installed as `RLIMIT_NPROC` at startup (clamped to the current hard limit).
    pub max_processes: u64,
    /// Words beyond this count are silently dropped in PATH-search mode.
    pub max_tokens: usize,
    /// Whether accepted lines are added to the line editor's history.
    pub history: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            max_processes: DEFAULT_MAX_PROCESSES,
            max_tokens: DEFAULT_MAX_TOKENS,
            history: true,
        }
    }
}
