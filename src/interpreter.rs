use crate::builtin::{self, Cd, Exit, Pwd};
use crate::command::{self, Classified, ExecutableCommand, ExitCode, Stdout};
use crate::config::ShellConfig;
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::external::{self, ExternalCommand};
use crate::lexer;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::ffi::OsString;

/// A minimal interactive interpreter: built-ins plus external programs, one at a time.
///
/// Every line goes through the same pipeline: normalize, [`classify`](command::classify),
/// resolve to an [`ExecutableCommand`], run it to completion.
///
/// Example
/// ```no_run
/// use dsh::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut line = String::from("ls -l");
/// let code = sh.execute_line(&mut line).unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    env: Environment,
    config: ShellConfig,
}

impl Interpreter {
    /// Create a new interpreter over an explicit environment and configuration.
    pub fn with_config(env: Environment, config: ShellConfig) -> Self {
        Self { env, config }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// True once `exit` has run.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Run one command line with output going to the shell's own standard output.
    ///
    /// The line is normalized in place. Returns the command's exit code; an empty
    /// line is a successful no-op.
    pub fn execute_line(&mut self, line: &mut String) -> Result<ExitCode> {
        self.execute_line_with_output(line, Box::new(std::io::stdout()))
    }

    /// Same as [`execute_line`](Self::execute_line), with standard output redirected to `stdout`.
    pub fn execute_line_with_output(
        &mut self,
        line: &mut String,
        stdout: Box<dyn Stdout>,
    ) -> Result<ExitCode> {
        lexer::normalize(line);
        match self.resolve(line)? {
            Some(cmd) => cmd.execute(stdout, &mut self.env),
            None => Ok(0),
        }
    }

    fn resolve(&self, line: &str) -> Result<Option<Box<dyn ExecutableCommand>>> {
        let classified = command::classify(line);
        tracing::debug!(?classified, "classified line");

        let cmd: Box<dyn ExecutableCommand> = match classified {
            Classified::Empty => return Ok(None),
            Classified::Exit => builtin::create::<Exit>(&[]),
            Classified::Pwd => builtin::create::<Pwd>(&[]),
            Classified::Cd(None) => builtin::create::<Cd>(&[]),
            Classified::Cd(Some("--help")) => builtin::create::<Cd>(&["--help"]),
            Classified::Cd(Some(path)) => builtin::create::<Cd>(&["--", path]),
            Classified::Absolute(line) => {
                let (program, ignored) =
                    external::find_absolute(line).ok_or_else(|| ShellError::FileNotFound {
                        path: line.to_string(),
                    })?;
                if !ignored.is_empty() {
                    tracing::warn!(program, ignored, "arguments to absolute-path commands are ignored");
                }
                Box::new(ExternalCommand::new(program, vec![OsString::from(program)]))
            }
            Classified::Search(line) => {
                let argv = lexer::split_words(line, self.config.max_tokens);
                let Some(&name) = argv.first() else {
                    return Ok(None);
                };
                let dir = external::find_in_path(self.env.search_paths(), name).ok_or_else(
                    || ShellError::CommandNotFound {
                        name: name.to_string(),
                    },
                )?;
                let program = dir.join(name);
                tracing::debug!(program = %program.display(), "resolved via PATH");
                Box::new(ExternalCommand::new(
                    program,
                    argv.into_iter().map(OsString::from).collect(),
                ))
            }
        };
        Ok(Some(cmd))
    }

    /// Read-eval-print loop over the terminal.
    ///
    /// Returns after `exit` or at end of input. Errors from individual commands are
    /// printed to standard error and never end the loop.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new()?;

        while !self.env.should_exit {
            match rl.readline(&self.config.prompt) {
                Ok(mut line) => {
                    if self.config.history && !lexer::trim(&line).is_empty() {
                        if let Err(err) = rl.add_history_entry(line.as_str()) {
                            tracing::warn!(%err, "could not record history entry");
                        }
                    }
                    match self.execute_line(&mut line) {
                        Ok(code) => tracing::debug!(code, "command finished"),
                        Err(err) => eprintln!("dsh: {}", err),
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// Interpreter over the current process environment with default settings.
    fn default() -> Self {
        Self::with_config(Environment::new(), ShellConfig::default())
    }
}
