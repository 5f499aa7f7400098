//! REPL command implementation

use anyhow::Result;
use egg_config::ConfigLoader;
use egg_runtime::{Egg, EggError, RuntimeSettings, Session, Value};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::warn;

/// REPL presentation options
#[derive(Debug, Clone)]
pub struct ReplOptions {
    pub prompt: String,
    /// Persist line history to ~/.egg/history
    pub history: bool,
}

/// What a line of input asks the REPL to do
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Quit,
    Help,
    Reset,
    Vars,
    Unknown(&'a str),
    Empty,
    Program(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    match trimmed {
        "" => Input::Empty,
        ":quit" | ":q" => Input::Quit,
        ":help" | ":h" => Input::Help,
        ":reset" => Input::Reset,
        ":vars" | ":v" => Input::Vars,
        cmd if cmd.starts_with(':') => Input::Unknown(cmd),
        program => Input::Program(program),
    }
}

/// Run the interactive REPL
pub fn run(settings: RuntimeSettings, options: ReplOptions) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let egg = Egg::with_settings(settings);
    let mut session = egg.session();

    let history_path = if options.history { history_path() } else { None };
    if let Some(path) = &history_path {
        let _ = rl.load_history(path); // Missing history file is fine
    }

    println!("Egg v{} REPL", egg_runtime::VERSION);
    println!("Type expressions, or :quit to exit");
    println!("Commands: :quit (or :q), :reset, :help, :vars");
    println!();

    loop {
        match rl.readline(&options.prompt) {
            Ok(line) => {
                let input = classify(&line);
                if input != Input::Empty {
                    let _ = rl.add_history_entry(line.as_str());
                }
                match input {
                    Input::Quit => {
                        println!("Goodbye!");
                        break;
                    }
                    Input::Help => print_help(),
                    Input::Reset => {
                        session.reset();
                        println!("REPL state reset");
                    }
                    Input::Vars => print_vars(&session),
                    Input::Unknown(cmd) => {
                        println!("Unknown command: {} (try :help)", cmd);
                    }
                    Input::Empty => {}
                    Input::Program(source) => println!("{}", eval_line(&session, source)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Err(err) = rl.save_history(path) {
            warn!(error = %err, path = %path.display(), "failed to save REPL history");
        }
    }

    Ok(())
}

/// Evaluate one line in the session and format the outcome
fn eval_line(session: &Session<'_>, source: &str) -> String {
    format_result(session.eval(source))
}

fn format_result(result: Result<Value, EggError>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(err) => format!("error[{}]: {}", err.code(), err),
    }
}

fn history_path() -> Option<PathBuf> {
    ConfigLoader::global_config_dir()
        .ok()
        .or_else(|| dirs::home_dir().map(|home| home.join(".egg")))
        .map(|dir| dir.join("history"))
}

fn print_help() {
    println!("Egg REPL Commands:");
    println!("  :quit, :q      Exit the REPL");
    println!("  :reset         Clear all definitions and restore built-ins");
    println!("  :vars, :v      List names defined in this session");
    println!("  :help, :h      Show this help message");
    println!();
    println!("Each line is one program; definitions persist until :reset.");
    println!("Example: define(square, fun(x, *(x, x)))");
}

fn print_vars(session: &Session<'_>) {
    let names = session.names();
    if names.is_empty() {
        println!("No definitions");
    } else {
        println!("{}", names.join(", "));
    }
}
