mod output;
mod schema;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use plusopt::{Parser, render_help, render_version};
use plusopt_metadata::DEFAULT_PROGRAM_VERSION;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{EnvFilter, fmt};

use crate::output::CheckOutput;
use crate::schema::load_schema;

#[derive(ClapParser)]
#[command(name = "plusopt-check")]
#[command(
    version,
    about = "Classify command-line tokens against a plusopt option schema",
    long_about = None
)]
struct Cli {
    /// Path to the option schema (default: $PLUSOPT_SCHEMA, then ./plusopt.json)
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print the help text rendered from the schema and exit
    #[arg(long, conflicts_with = "version_text")]
    help_text: bool,

    /// Print the version line rendered from the schema and exit
    #[arg(long)]
    version_text: bool,

    /// Tokens to classify (everything after `--`)
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    check(cli)
}

fn check(cli: Cli) -> Result<()> {
    let loaded = load_schema(cli.schema.as_deref())?;
    tracing::debug!(schema = ?loaded.path, "executing check");

    let mut program = loaded.schema.program.clone();
    if program.name.is_empty() {
        program.name = env!("CARGO_BIN_NAME").to_string();
    }
    if program.version.is_empty() {
        program.version = DEFAULT_PROGRAM_VERSION.to_string();
    }

    let mut parser = Parser::from_schema(&loaded.schema);

    if cli.help_text {
        print!("{}", render_help(&program, parser.registry()));
        return Ok(());
    }
    if cli.version_text {
        print!("{}", render_version(&program));
        return Ok(());
    }

    let stdin_reads = Rc::new(Cell::new(0u32));
    let reads = Rc::clone(&stdin_reads);
    parser.set_stdin_handler(move || {
        reads.set(reads.get() + 1);
        Ok(())
    });

    parser
        .parse_argv(&cli.tokens)
        .context("failed to parse tokens")?;

    let out = CheckOutput {
        program: &program,
        report: parser.report(),
        stdin_reads: stdin_reads.get(),
    };

    if cli.json {
        println!("{}", out.to_json().context("failed to serialize report")?);
    } else {
        print!("{}", out.to_text());
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
