//! CursorDB - interactive shell

use anyhow::{bail, Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};
use rustyline::Editor;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cursordb::catalog::Catalog;
use cursordb::executor::{ExecutionEngine, QueryResult};
use cursordb::EngineConfig;

const HISTORY_FILE: &str = ".cursordb_history";

/// Command line options
struct Options {
    config: EngineConfig,
    json: bool,
}

impl Options {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = Options {
            config: EngineConfig::default(),
            json: false,
        };

        let mut args = args.skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => options.json = true,
                "--log" => {
                    let filter = args.next().context("--log expects a filter directive")?;
                    options.config = options.config.log_filter(filter);
                }
                other => bail!("unknown argument: {}", other),
            }
        }

        Ok(options)
    }
}

/// Print welcome banner
fn print_banner() {
    println!(
        r#"
 CursorDB - an in-memory SQL engine on pull-based cursors
 Type '.help' for help, '.quit' to exit
"#
    );
}

/// Print help message
fn print_help() {
    println!(
        r#"
Commands:
  .help                Show this help message
  .quit                Exit CursorDB
  .tables              List all relations
  .schema <relation>   Show a relation's schema

SQL (terminate with ';'):
  SELECT <cols> [FROM <relation> [AS alias], ...]
  SHOW TABLES

Examples:
  SELECT 1 + 2;
  SELECT * FROM tables AS t1, tables AS t2;
"#
    );
}

/// Format query results as a table
fn format_results(result: &QueryResult) -> String {
    let columns = result.column_names();
    if columns.is_empty() {
        return format!("{} row(s) returned\n", result.rows.len());
    }

    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(c).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let separator: String = widths
        .iter()
        .map(|w| "-".repeat(*w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{}+\n", separator);

    let mut output = String::new();

    output.push_str(&separator);
    let header: String = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!(" {:^width$} ", c, width = *w))
        .collect::<Vec<_>>()
        .join("|");
    output.push_str(&format!("|{}|\n", header));
    output.push_str(&separator);

    for row in &cells {
        let line: String = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!(" {:>width$} ", v, width = *w))
            .collect::<Vec<_>>()
            .join("|");
        output.push_str(&format!("|{}|\n", line));
    }

    if !cells.is_empty() {
        output.push_str(&separator);
    }

    output.push_str(&format!("{} row(s) returned\n", cells.len()));
    output
}

/// Execute a SQL statement and print its result
fn execute_sql(sql: &str, engine: &ExecutionEngine, json: bool) {
    let sql = sql.trim();
    if sql.is_empty() {
        return;
    }

    let result = match engine.collect(sql) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    if json {
        for row in &result.rows {
            match serde_json::to_string(row) {
                Ok(line) => println!("{}", line),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    } else {
        print!("{}", format_results(&result));
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Handle dot commands
fn handle_special_command(cmd: &str, catalog: &Catalog) -> Flow {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    match parts.first().copied() {
        Some(".help") => print_help(),
        Some(".quit") | Some(".exit") => return Flow::Quit,
        Some(".tables") => {
            println!("  {}", catalog.relation_name());
            for name in catalog.list_relations() {
                println!("  {}", name);
            }
        }
        Some(".schema") => match parts.get(1) {
            Some(name) => match catalog.relation_info(name) {
                Ok(info) => println!("{}", info),
                Err(e) => eprintln!("Error: {}", e),
            },
            None => eprintln!("Usage: .schema <relation>"),
        },
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Type '.help' for available commands.");
        }
        None => {}
    }

    Flow::Continue
}

/// Load saved history, reporting whether anything was read
fn load_history(history: &mut impl History, path: &Path) -> bool {
    match history.load(path) {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, path = %path.display(), "history not loaded");
            false
        }
    }
}

fn record_history(history: &mut impl History, line: &str) {
    if let Err(err) = history.add(line) {
        debug!(%err, "history entry dropped");
    }
}

/// Main REPL loop
fn run_repl(engine: &ExecutionEngine, json: bool) -> Result<()> {
    let mut rl = Editor::<(), DefaultHistory>::new()?;
    load_history(rl.history_mut(), Path::new(HISTORY_FILE));

    print_banner();

    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() { "cursordb> " } else { "     ...> " };

        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        record_history(rl.history_mut(), trimmed);

        if buffer.is_empty() && trimmed.starts_with('.') {
            match handle_special_command(trimmed, engine.catalog()) {
                Flow::Continue => continue,
                Flow::Quit => break,
            }
        }

        buffer.push_str(trimmed);
        buffer.push('\n');

        if trimmed.ends_with(';') {
            execute_sql(&buffer, engine, json);
            buffer.clear();
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        eprintln!("Error saving history: {}", err);
    }
    println!("Goodbye!");
    Ok(())
}

fn main() -> Result<()> {
    let options = Options::parse(std::env::args())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.config.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let engine = ExecutionEngine::with_config(options.config);
    run_repl(&engine, options.json)
}
