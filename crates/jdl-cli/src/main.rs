//! Command-line interface for `json-diff-lite`.
//!
//! Compares two JSON (or YAML) documents and prints one line per change:
//! `+` for additions, `-` for removals and `~` for modifications. The exit
//! status is 0 when the documents are equal, 1 when they differ and 2 when an
//! input cannot be read or parsed.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use jdl_core::{CompareOptions, Node, OptionsError, ParseError, RenderConfig};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const VERSION_BANNER: &str = concat!("json-diff-lite ", env!("CARGO_PKG_VERSION"));
const LOG_ENV: &str = "JSON_DIFF_LITE_LOG";
const NO_DIFFERENCES: &str = "No differences found.";

const EXIT_SAME: i32 = 0;
const EXIT_DIFFERENT: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    /// One human-readable line per change.
    #[default]
    Text,
    /// The change records as a JSON array.
    Json,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    /// Color when writing to a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    fn parse(self, text: &str) -> Result<Node, ParseError> {
        match self {
            Self::Json => Node::from_json_str(text),
            Self::Yaml => Node::from_yaml_str(text),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "json-diff-lite",
    about = "Compare two JSON files and show differences",
    disable_version_flag = true
)]
struct Cli {
    /// Print the version and exit.
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    version: bool,

    /// Exit with code 1 if differences are found, without output.
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Fields used to match array elements by identity, tried in order.
    #[arg(short = 'k', long = "list-key", value_name = "KEYS", value_delimiter = ',')]
    list_keys: Vec<String>,

    /// JSON config file, e.g. `{"list_key": ["id"]}`.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// When to color the output.
    #[arg(long = "color", value_enum, default_value = "auto")]
    color: ColorChoice,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write output to FILE instead of STDOUT.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Parse both inputs as YAML instead of JSON.
    #[arg(long = "yaml", action = ArgAction::SetTrue)]
    yaml: bool,

    /// Log debug details to STDERR.
    #[arg(long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Original and new documents.
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Error)]
enum InputError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("could not read {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {error}", path.display())]
    Malformed { path: PathBuf, error: ParseError },
    #[error("invalid config {}: {error}", path.display())]
    Config { path: PathBuf, error: OptionsError },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = writeln!(io::stderr(), "Error: {err:#}");
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<i32> {
    if cli.version {
        println!("{VERSION_BANNER}");
        return Ok(EXIT_SAME);
    }

    let [original, new] = cli.inputs.as_slice() else {
        bail!("expected two input files (original, new)\n\n{}", Cli::command().render_usage());
    };

    let options = build_options(cli)?;
    let format = if cli.yaml { InputFormat::Yaml } else { InputFormat::Json };
    let lhs = load_document(original, format)?;
    let rhs = load_document(new, format)?;

    let diff = lhs.compare(&rhs, &options);
    tracing::debug!(changes = diff.len(), "comparison finished");
    let code = if diff.is_empty() { EXIT_SAME } else { EXIT_DIFFERENT };

    if cli.quiet {
        return Ok(code);
    }

    let rendered = match cli.format {
        OutputFormat::Text if diff.is_empty() => format!("{NO_DIFFERENCES}\n"),
        OutputFormat::Text => diff.render(&RenderConfig::color(use_color(cli))),
        OutputFormat::Json => {
            let mut json = diff.render_json().context("failed to render changes as JSON")?;
            json.push('\n');
            json
        }
    };
    write_output(cli.output.as_deref(), &rendered)?;

    Ok(code)
}

fn build_options(cli: &Cli) -> Result<CompareOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = read_source(path)?;
            CompareOptions::from_json_str(&text)
                .map_err(|error| InputError::Config { path: path.clone(), error })?
        }
        None => CompareOptions::default(),
    };

    if !cli.list_keys.is_empty() {
        options = options.with_list_keys(cli.list_keys.iter().cloned()).context("invalid --list-key")?;
    }

    tracing::debug!(list_keys = ?options.list_keys(), "comparison options");
    Ok(options)
}

fn read_source(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::NotFound { path: path.to_path_buf() },
        _ => InputError::Unreadable { path: path.to_path_buf(), source },
    })
}

fn load_document(path: &Path, format: InputFormat) -> Result<Node, InputError> {
    let text = read_source(path)?;
    tracing::debug!(path = %path.display(), format = format.name(), "parsing input");
    format.parse(&text).map_err(|error| InputError::Malformed { path: path.to_path_buf(), error })
}

fn use_color(cli: &Cli) -> bool {
    match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            cli.output.is_none()
                && std::env::var_os("NO_COLOR").is_none()
                && io::stdout().is_terminal()
        }
    }
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("failed to write output to {}", path.display()))?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.as_bytes()).context("failed to write to stdout")?;
        stdout.flush().ok();
    }
    Ok(())
}
