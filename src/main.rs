use std::fs;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use env_logger::Builder;
use log::{debug, info};

use lox_expr as lox;

use lox::ast_printer::AstPrinter;
use lox::diagnostics::Diagnostics;
use lox::interpreter::Interpreter;
use lox::parser::Parser;
use lox::scanner::Scanner;
use lox::token::Token;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox expression interpreter", long_about = None)]
struct Cli {
    /// Source file to run. Reads expressions interactively when absent.
    script: Vec<PathBuf>,

    /// Enable logging to app.log
    #[arg(long)]
    log: bool,
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // Compact [module:line] format, with the crate prefix stripped
    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("lox_expr::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));

            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .init();

    info!("Logger initialized, writing to app.log");

    Ok(())
}

fn main() -> Result<ExitCode> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        // Minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.script.as_slice() {
        [] => run_prompt(),

        [path] => run_file(path),

        _ => {
            eprintln!("Usage: lox-expr [script]");

            Ok(ExitCode::from(64))
        }
    }
}

/// Batch mode: run the whole file once, then map the sticky flags to the
/// conventional exit codes (65 for reported errors, 70 for runtime errors).
fn run_file(path: &Path) -> Result<ExitCode> {
    info!("Running file: {:?}", path);

    let source: String =
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))?;

    let mut diagnostics = Diagnostics::new();
    let mut interpreter = Interpreter::new();

    run(&source, &mut interpreter, &mut diagnostics);

    if diagnostics.had_error() {
        return Ok(ExitCode::from(65));
    }

    if diagnostics.had_runtime_error() {
        return Ok(ExitCode::from(70));
    }

    Ok(ExitCode::SUCCESS)
}

/// Interactive mode: one expression per line until input ends. A syntax
/// error must not poison the next line, so `had_error` resets each
/// iteration; runtime errors stay sticky but never end the session.
fn run_prompt() -> Result<ExitCode> {
    info!("Entering interactive prompt");

    let stdin = io::stdin();
    let mut diagnostics = Diagnostics::new();
    let mut interpreter = Interpreter::new();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();

        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        diagnostics.reset_error();

        run(&line, &mut interpreter, &mut diagnostics);
    }

    Ok(ExitCode::SUCCESS)
}

/// One run: scan, parse, evaluate, print. Every failure out of the core
/// goes through the diagnostic sink exactly once; a reported error skips
/// the later stages for this source only.
fn run(source: &str, interpreter: &mut Interpreter, diagnostics: &mut Diagnostics) {
    let mut tokens: Vec<Token<'_>> = Vec::new();

    // Lexical errors don't stop the scan; the parse still runs over the
    // tokens that did come out, as the reference runner does.
    for result in Scanner::new(source) {
        match result {
            Ok(token) => {
                debug!("Scanned: {}", token);

                tokens.push(token);
            }

            Err(e) => diagnostics.report(&e),
        }
    }

    let mut parser = Parser::new(&tokens);

    match parser.parse() {
        Ok(expr) => {
            debug!("ast: {}", AstPrinter.print(&expr));

            match interpreter.evaluate(&expr) {
                Ok(value) => println!("{}", value),

                Err(e) => diagnostics.report(&e),
            }
        }

        Err(e) => diagnostics.report(&e),
    }
}
