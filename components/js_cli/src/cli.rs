//! Command-line arguments

use clap::Parser as ClapParser;

/// Run a script file, evaluate inline code or start the REPL
#[derive(ClapParser, Debug, Clone, PartialEq, Eq)]
#[command(name = "hostjs", version, about = "Embedded JavaScript host with an event loop and REPL")]
pub struct Cli {
    /// Script to execute
    #[arg(value_name = "FILE", conflicts_with = "file")]
    pub script: Option<String>,

    /// Script to execute (same as the positional FILE)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<String>,

    /// Evaluate inline code and print its result
    #[arg(short, long, value_name = "CODE")]
    pub eval: Option<String>,

    /// Start the interactive REPL
    #[arg(short, long)]
    pub repl: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Start without the built-in modules
    #[arg(long)]
    pub no_modules: bool,
}

/// What the process should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Execute a file
    File(String),
    /// Evaluate inline code
    Eval(String),
    /// Interactive session
    Repl,
}

impl Cli {
    /// Arguments that execute `file`
    pub fn with_file(file: impl Into<String>) -> Self {
        Self {
            script: None,
            file: Some(file.into()),
            eval: None,
            repl: false,
            verbose: false,
            no_modules: false,
        }
    }

    /// The script path, from either spelling
    pub fn script_path(&self) -> Option<&str> {
        self.file.as_deref().or(self.script.as_deref())
    }

    /// Pick the mode: `--repl` wins, then a file, then inline code
    pub fn mode(&self) -> Mode {
        if self.repl {
            Mode::Repl
        } else if let Some(path) = self.script_path() {
            Mode::File(path.to_string())
        } else if let Some(code) = &self.eval {
            Mode::Eval(code.clone())
        } else {
            Mode::Repl
        }
    }

    /// Default log filter when RUST_LOG is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
