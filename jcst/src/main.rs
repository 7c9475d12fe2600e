#![forbid(unsafe_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use miette::{Diagnostic, IntoDiagnostic, NamedSource};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use jcst_parse::ParseConfig;
use jcst_syntax::dump;

#[derive(Parser, Debug)]
#[command(name = "jcst", version, about = "Java 8 concrete syntax tree parser")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a source file and print its syntax tree
    Parse {
        /// Input .java file
        path: PathBuf,

        /// Stop at the first syntax error instead of recovering
        #[arg(long)]
        strict: bool,

        /// Nesting depth at which the parse is abandoned
        #[arg(long, default_value_t = ParseConfig::default().max_depth)]
        max_depth: usize,

        /// Only report errors
        #[arg(long, short)]
        quiet: bool,
    },
    /// Print the token stream, one token per line
    Tokens {
        /// Input .java file
        path: PathBuf,
    },
}

#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("{count} syntax error(s) in {path}")]
    #[diagnostic(code(jcst::syntax), help("run with --quiet to see only the diagnostics"))]
    SyntaxErrors { path: String, count: usize },
}

/// `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> miette::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Parse {
            path,
            strict,
            max_depth,
            quiet,
        } => {
            let config = ParseConfig {
                max_depth,
                recovery: !strict,
            };
            parse_file(&path, &config, quiet)
        }
        Cmd::Tokens { path } => print_tokens(&path),
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn parse_file(path: &Path, config: &ParseConfig, quiet: bool) -> miette::Result<()> {
    let src = fs::read_to_string(path).into_diagnostic()?;
    let source = NamedSource::new(display_path(path), src.clone());

    let parse = jcst_parse::parse_source_with_config(&src, config).map_err(|e| e.with_source_code(source.clone()))?;
    info!(path = %path.display(), errors = parse.errors.len(), "parsed");

    if !quiet {
        println!("{}", dump(&parse.root));
    }
    if parse.errors.is_empty() {
        return Ok(());
    }

    let count = parse.errors.len();
    for err in parse.errors {
        let report = miette::Report::new(err).with_source_code(source.clone());
        eprintln!("{report:?}");
    }
    Err(CliError::SyntaxErrors {
        path: display_path(path),
        count,
    }
    .into())
}

fn print_tokens(path: &Path) -> miette::Result<()> {
    let src = fs::read_to_string(path).into_diagnostic()?;
    let tokens = jcst_lex::lex(&src)
        .map_err(|e| miette::Report::new(e).with_source_code(NamedSource::new(display_path(path), src.clone())))?;
    debug!(count = tokens.len(), "lexed");

    for tok in &tokens {
        println!("{:>6} {:<22} {}", tok.start(), format!("{:?}", tok.kind), tok.text);
    }
    Ok(())
}
