use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use egg_config::{Config, ConfigLoader};
use egg_runtime::EggError;
use std::process::ExitCode;

mod commands;
mod logging;

/// Egg language interpreter.
///
/// Runs Egg programs from files or the command line, dumps their syntax
/// trees, and provides an interactive REPL.
///
/// EXAMPLES:
///     egg run main.egg             Run a program
///     egg eval "+(1, 2)"           Evaluate an inline program
///     egg ast main.egg             Print the syntax tree as JSON
///     egg repl                     Start interactive REPL
///
/// ENVIRONMENT VARIABLES:
///     EGG_LOG           Log filter (e.g. debug, egg_runtime=trace)
///     EGG_MAX_DEPTH     Maximum evaluation depth
///     EGG_NO_HISTORY    Set to '1' to disable REPL history
#[derive(Parser)]
#[command(name = "egg")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run Egg source files
    ///
    /// The files are joined with newlines and evaluated as one program.
    /// The program's final value is printed after any output it produced.
    ///
    /// EXAMPLES:
    ///     egg run main.egg                Run a program
    ///     egg run prelude.egg main.egg    Run two files as one program
    ///     egg run main.egg --quiet        Only show printed output
    #[command(visible_alias = "r")]
    Run {
        /// Source files, concatenated in order
        #[arg(required = true)]
        files: Vec<String>,
        #[command(flatten)]
        options: RunArgs,
    },

    /// Evaluate inline program fragments
    ///
    /// EXAMPLES:
    ///     egg eval "print(sum(array(1, 2, 3)))"
    ///     egg eval "do(define(x, 2)," "*(x, x))"
    #[command(visible_alias = "e")]
    Eval {
        /// Program text, one argument per fragment
        #[arg(required = true)]
        fragments: Vec<String>,
        #[command(flatten)]
        options: RunArgs,
    },

    /// Print the syntax tree of a file as JSON
    Ast {
        /// Path to the Egg source file
        file: String,
    },

    /// Start an interactive REPL
    ///
    /// Definitions persist between lines until :reset.
    ///
    /// REPL COMMANDS:
    ///     :help, :h      Show help
    ///     :quit, :q      Exit REPL
    ///     :reset         Clear all definitions
    ///     :vars          List defined names
    Repl {
        /// Disable history persistence
        #[arg(long, env = "EGG_NO_HISTORY")]
        no_history: bool,
        /// Override the evaluation depth limit
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Don't print the program's final value
    #[arg(long, short = 'q')]
    quiet: bool,
    /// Override the evaluation depth limit
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> ExitCode {
    logging::init();

    match run_cli(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = ConfigLoader::new()
        .load_from_directory(&cwd)
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Run { files, options } => {
            let settings = commands::runtime_settings(&config, options.max_depth)?;
            commands::run::run_files(&files, settings, options.quiet)
        }
        Commands::Eval { fragments, options } => {
            let settings = commands::runtime_settings(&config, options.max_depth)?;
            commands::run::run_fragments(&fragments, settings, options.quiet)
        }
        Commands::Ast { file } => commands::ast::run(&file),
        Commands::Repl {
            no_history,
            max_depth,
        } => {
            let settings = commands::runtime_settings(&config, max_depth)?;
            let options = commands::repl::ReplOptions {
                prompt: config.prompt().to_string(),
                history: history_enabled(&config, no_history),
            };
            commands::repl::run(settings, options)
        }
    }
}

/// Command-line flag overrides configuration
fn history_enabled(config: &Config, no_history: bool) -> bool {
    !no_history && config.history_enabled()
}

/// `error[EGxxxx]: ...` for language errors, `error: ...` otherwise
fn render_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<EggError>() {
        Some(egg_err) => format!("error[{}]: {}", egg_err.code(), egg_err),
        None => format!("error: {:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use egg_runtime::RuntimeError;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_language_error() {
        let err = anyhow::Error::new(EggError::from(RuntimeError::UndefinedVariable {
            name: "x".to_string(),
        }));
        assert_eq!(
            render_error(&err),
            "error[EG0201]: ReferenceError: Undefined variable: x"
        );
    }

    #[test]
    fn test_render_other_error() {
        let err = anyhow::anyhow!("disk on fire").context("Failed to read source file: a.egg");
        assert_eq!(
            render_error(&err),
            "error: Failed to read source file: a.egg: disk on fire"
        );
    }

    #[test]
    fn test_no_history_flag_wins() {
        let config = Config::default();
        assert!(history_enabled(&config, false));
        assert!(!history_enabled(&config, true));
    }
}
