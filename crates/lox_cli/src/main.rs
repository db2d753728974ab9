//! lox: Scan Lox source files and print their tokens.
//!
//! Usage:
//!   lox [options] [file...]
//!
//! With no files, starts an interactive prompt that scans each line.
//! Unreadable files are reported and skipped. Exits with 74 if any read
//! failed, otherwise 65 when a file has lexical errors.
//!
//! Logging goes to stderr and is off unless `RUST_LOG` is set
//! (e.g. `RUST_LOG=lox_scanner=trace`) or `--verbose` is passed.

use clap::Parser as ClapParser;
use lox_diagnostics::{Diagnostic, DiagnosticCollection};
use lox_scanner::{scan_with_diagnostics, Token};
use rayon::prelude::*;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use thiserror::Error;

#[derive(ClapParser, Debug)]
#[command(name = "lox", about = "Scan Lox source files and print their tokens", version)]
struct Cli {
    /// Lox files to scan. Starts an interactive prompt when omitted.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print only token kinds, one per line.
    #[arg(long = "tokens-only")]
    tokens_only: bool,

    /// Always color diagnostics.
    #[arg(long, overrides_with = "no_pretty")]
    pretty: bool,

    /// Never color diagnostics.
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Log scanner activity at debug level.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn use_color(&self) -> bool {
        if self.no_pretty {
            false
        } else {
            self.pretty || io::stderr().is_terminal()
        }
    }
}

#[derive(Error, miette::Diagnostic, Debug)]
enum CliError {
    #[error("could not read '{}'", .path.display())]
    #[diagnostic(code(lox::read_file), help("check that the file exists and is readable UTF-8"))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(lox::io_error))]
    Io(#[from] io::Error),
}

// sysexits(3) codes used by Lox drivers.
const EX_OK: u8 = 0;
const EX_DATAERR: u8 = 65;
const EX_IOERR: u8 = 74;

// ANSI color codes
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

static TRACING_INIT: Once = Once::new();

/// Install the stderr subscriber when `RUST_LOG` is set or `verbose` is on.
fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if verbose {
            EnvFilter::new("lox_scanner=debug,lox=debug")
        } else {
            return;
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
            .with(filter)
            .init();
    });
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = if cli.files.is_empty() {
        run_prompt(&cli)
    } else {
        run_files(&cli)
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(EX_IOERR)
        }
    }
}

/// The outcome of scanning one file.
struct ScannedFile<'a> {
    path: &'a Path,
    tokens: Vec<Token>,
    diagnostics: DiagnosticCollection,
}

fn scan_file(path: &Path) -> Result<ScannedFile<'_>, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "scanning file");
    let (tokens, diagnostics) = scan_with_diagnostics(&source);
    Ok(ScannedFile {
        path,
        tokens,
        diagnostics,
    })
}

fn run_files(cli: &Cli) -> Result<ExitCode, CliError> {
    let stdout = io::stdout();
    let status = report_files(cli, &mut stdout.lock())?;
    Ok(ExitCode::from(status))
}

/// Scan every file and dump it to `out`. An unreadable file is reported
/// and skipped; the status is `EX_IOERR` if any read failed, otherwise
/// `EX_DATAERR` if any file had lexical errors.
fn report_files(cli: &Cli, out: &mut impl Write) -> Result<u8, CliError> {
    // Files are independent, so they scan in parallel and print in order.
    let scanned: Vec<Result<ScannedFile<'_>, CliError>> =
        cli.files.par_iter().map(|path| scan_file(path)).collect();

    let use_color = cli.use_color();
    let show_headers = cli.files.len() > 1;
    let mut error_count = 0;
    let mut read_failures = 0;

    for (index, result) in scanned.into_iter().enumerate() {
        let file = match result {
            Ok(file) => file,
            Err(err) => {
                out.flush()?;
                eprintln!("{:?}", miette::Report::new(err));
                read_failures += 1;
                continue;
            }
        };
        if show_headers {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "==> {} <==", file.path.display())?;
        }
        print_tokens(out, &file.tokens, cli.tokens_only)?;
        out.flush()?;

        let name = file.path.display().to_string();
        for diag in file.diagnostics.diagnostics() {
            print_diagnostic(Some(&name), diag, use_color);
        }
        error_count += file.diagnostics.error_count();
    }

    if error_count > 0 {
        print_error_summary(error_count, use_color);
    }
    tracing::debug!(files = cli.files.len(), read_failures, error_count, "scanned files");

    if read_failures > 0 {
        Ok(EX_IOERR)
    } else if error_count > 0 {
        Ok(EX_DATAERR)
    } else {
        Ok(EX_OK)
    }
}

fn run_prompt(cli: &Cli) -> Result<ExitCode, CliError> {
    let use_color = cli.use_color();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        {
            let mut out = io::stdout().lock();
            write!(out, "> ")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let (tokens, diagnostics) = scan_with_diagnostics(line.trim_end_matches(['\n', '\r']));
        print_tokens(&mut io::stdout().lock(), &tokens, cli.tokens_only)?;
        for diag in diagnostics.diagnostics() {
            print_diagnostic(None, diag, use_color);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_tokens(out: &mut impl Write, tokens: &[Token], tokens_only: bool) -> io::Result<()> {
    for token in tokens {
        if tokens_only {
            writeln!(out, "{}", token.kind())?;
        } else {
            writeln!(out, "{}", token)?;
        }
    }
    Ok(())
}

fn print_diagnostic(file: Option<&str>, diag: &Diagnostic, use_color: bool) {
    if use_color {
        if let Some(file) = file {
            eprint!("{}{}{}: ", CYAN, file, RESET);
        }
        eprintln!(
            "[line {}] {}{}{}{} {}{}{}: {}",
            diag.line,
            BOLD,
            RED,
            diag.category,
            RESET,
            CYAN,
            diag.code_name(),
            RESET,
            diag.message_text
        );
    } else {
        match file {
            Some(file) => eprintln!("{}: {}", file, diag),
            None => eprintln!("{}", diag),
        }
    }
}

fn print_error_summary(count: usize, use_color: bool) {
    let plural = if count == 1 { "" } else { "s" };
    if use_color {
        eprintln!("\n{}Found {} lexical error{}.{}", RED, count, plural, RESET);
    } else {
        eprintln!("\nFound {} lexical error{}.", count, plural);
    }
}
