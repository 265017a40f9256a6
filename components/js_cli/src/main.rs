//! hostjs
//!
//! Entry point for the JavaScript host. Parses CLI arguments and
//! delegates to the Runtime for execution.

use clap::Parser as ClapParser;
use js_cli::repl::format_value;
use js_cli::{Cli, CliResult, Mode, Runtime};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter())),
        )
        .init();

    if let Err(error) = run(&cli) {
        tracing::debug!(?error, "exiting with failure");
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let mut builder = Runtime::builder();
    if cli.no_modules {
        builder = builder.without_default_modules();
    }
    let mut runtime = builder.build()?;

    match cli.mode() {
        Mode::File(path) => {
            runtime.execute_file(&path)?;
        }
        Mode::Eval(code) => {
            let result = runtime.execute(&code)?;
            if !result.is_undefined() {
                println!("{}", format_value(&result));
            }
        }
        Mode::Repl => runtime.repl()?,
    }

    Ok(())
}
