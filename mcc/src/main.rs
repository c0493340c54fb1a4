use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use ctl::{AtomPolicy, Dialect, PropositionTable};
use mcc::{extract_properties, parse_properties, TranslatedProperty};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Translate MCC CTL property files into textual CTL dialects.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// MCC property files (XML).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output grammars; may be repeated.
    #[arg(
        short,
        long = "dialect",
        value_enum,
        default_values_t = [DialectArg::Symbolic, DialectArg::Lola]
    )]
    dialects: Vec<DialectArg>,

    /// Rendering of atomic propositions.
    #[arg(short, long, value_enum, default_value_t = PolicyArg::Opaque)]
    policy: PolicyArg,

    /// Lifetime of the proposition numbering.
    #[arg(long, value_enum, default_value_t = Scope::Document)]
    scope: Scope,

    /// Directory receiving `<stem>.txt` / `<stem>.ctl` files. Prints to stdout if absent.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the proposition tables into the output directory.
    #[arg(long, requires = "output")]
    table: bool,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    /// `&`, `|`, `!`, next written as weak until
    Symbolic,
    /// LoLA keywords, `:` between statements
    Lola,
}

impl DialectArg {
    fn dialect(self) -> &'static Dialect {
        match self {
            DialectArg::Symbolic => &Dialect::SYMBOLIC,
            DialectArg::Lola => &Dialect::LOLA,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Atomic predicates become p0, p1, ...
    Opaque,
    /// Atomic predicates are written with place and transition names
    Structural,
}

impl From<PolicyArg> for AtomPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Opaque => AtomPolicy::Opaque,
            PolicyArg::Structural => AtomPolicy::Structural,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scope {
    /// Numbering restarts with every input file
    Document,
    /// One numbering for the whole run
    Global,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)?;

    if let Some(output) = &cli.output {
        fs::create_dir_all(output)
            .with_context(|| format!("Failed to create output directory {}", output.display()))?;
    }

    let policy = AtomPolicy::from(cli.policy);
    let mut global_table = PropositionTable::new();
    let mut translated = 0;

    for input in &cli.inputs {
        log::info!("Processing {}", input.display());

        let source = fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let entries = match parse_properties(&source) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Skipping {}: {err}", input.display());
                continue;
            }
        };

        let mut document_table = PropositionTable::new();
        let table = match cli.scope {
            Scope::Document => &mut document_table,
            Scope::Global => &mut global_table,
        };

        for dialect in cli.dialects.iter().map(|d| d.dialect()) {
            let props = extract_properties(&entries, dialect, policy, table);
            translated += props.len();
            emit(cli.output.as_deref(), input, dialect, &props)?;
        }

        if let (true, Some(output), Scope::Document) = (cli.table, &cli.output, cli.scope) {
            write_table(&output_path(output, input, "props"), table)?;
        }
    }

    if let (true, Some(output), Scope::Global) = (cli.table, &cli.output, cli.scope) {
        write_table(&output.join("propositions.props"), &global_table)?;
    }

    log::info!("Translated {translated} properties from {} files", cli.inputs.len());

    Ok(())
}

fn output_path(dir: &Path, input: &Path, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str()).to_string_lossy();
    dir.join(format!("{stem}.{extension}"))
}

fn emit(
    output: Option<&Path>,
    input: &Path,
    dialect: &Dialect,
    props: &[TranslatedProperty],
) -> Result<()> {
    match output {
        Some(dir) => {
            let path = output_path(dir, input, dialect.extension);
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_formulas(BufWriter::new(file), props)
                .with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "# {} [{}]", input.display(), dialect.name)?;
            write_formulas(out, props).context("Failed to write to stdout")
        }
    }
}

fn write_formulas(mut out: impl Write, props: &[TranslatedProperty]) -> io::Result<()> {
    for prop in props {
        writeln!(out, "{}", prop.formula)?;
    }
    out.flush()
}

fn write_table(path: &Path, table: &PropositionTable) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    table
        .write_to(&mut out)
        .and_then(|()| out.flush())
        .with_context(|| format!("Failed to write {}", path.display()))
}
