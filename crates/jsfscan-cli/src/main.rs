use std::fmt::Display;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use jsfscan_core::sniff::{self, Sniff};
use jsfscan_core::{DecodeOptions, DecodeReport, MarkerPolicy, analyze_jsf_file};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("JSFSCAN_BUILD_COMMIT"),
    " ",
    env!("JSFSCAN_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "jsfscan")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Offline decoder for EdgeTech JSF sonar captures.",
    long_about = None,
    after_help = "Examples:\n  jsfscan decode survey.jsf -o report.json\n  jsfscan decode survey.jsf --stdout --messages --type 2020\n  jsfscan sniff unknown.bin --width 16 --limit 32"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a .jsf file and write a versioned JSON report.
    Decode(DecodeArgs),
    /// Dump raw 8/16/32-bit projections of any file.
    Sniff(SniffArgs),
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Path to a .jsf file (a glob matching exactly one file is accepted)
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if the walk stopped early or produced warnings
    #[arg(long)]
    strict: bool,

    /// What to do with a frame whose start marker is not 0x1601
    #[arg(long, default_value = "warn", value_name = "ignore|warn|reject")]
    marker_policy: MarkerPolicy,

    /// Include every decoded message in the report
    #[arg(long)]
    messages: bool,

    /// Only include messages of this type (repeatable; implies --messages)
    #[arg(long = "type", value_name = "CODE")]
    types: Vec<u16>,
}

#[derive(Args, Debug)]
struct SniffArgs {
    /// Any file; no framing is assumed
    input: PathBuf,

    /// Word width to print
    #[arg(long, value_enum, default_value = "8")]
    width: WordWidth,

    /// Maximum number of words to print
    #[arg(long, default_value_t = 64)]
    limit: usize,

    /// Print segments split on the leading 8-byte block instead of words
    #[arg(long)]
    segments: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WordWidth {
    #[value(name = "8")]
    Bits8,
    #[value(name = "16")]
    Bits16,
    #[value(name = "32")]
    Bits32,
}

impl WordWidth {
    fn bytes(self) -> usize {
        match self {
            WordWidth::Bits8 => 1,
            WordWidth::Bits16 => 2,
            WordWidth::Bits32 => 4,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode(args),
        Commands::Sniff(args) => cmd_sniff(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input)?;
    validate_jsf_input(&input)?;
    if args.pretty && args.compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }

    let report_path = if args.stdout {
        None
    } else {
        let path = args.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&input, &path)?;
        Some(path)
    };

    let options = DecodeOptions::default().with_marker_policy(args.marker_policy);
    let include_messages = args.messages || !args.types.is_empty();
    tracing::debug!(input = %input.display(), ?options, "decoding");
    let mut rep = analyze_jsf_file(&input, &options, include_messages)
        .with_context(|| format!("JSF decode failed: {}", input.display()))?;
    if !args.types.is_empty() {
        if let Some(messages) = rep.messages.as_mut() {
            messages.retain(|msg| args.types.contains(&msg.msg_type()));
        }
    }
    let json = serialize_report(&rep, args.pretty)?;

    match report_path {
        None => println!("{}", json),
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&path, json)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            if !args.quiet {
                eprintln!(
                    "OK: {} frames decoded -> {}",
                    rep.summary.frames_total,
                    path.display()
                );
            }
        }
    }

    if args.strict {
        check_strict(&rep)?;
    }
    Ok(())
}

fn check_strict(rep: &DecodeReport) -> Result<(), CliError> {
    if rep.termination.is_error() {
        return Err(CliError::new(
            format!("decode stopped early: {:?}", rep.termination),
            Some("inspect 'termination' in the report".to_string()),
        ));
    }
    if !rep.warnings.is_empty() {
        return Err(CliError::new(
            format!("{} frame warnings", rep.warnings.len()),
            Some("inspect 'warnings' in the report".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &DecodeReport, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(rep)
    } else {
        serde_json::to_string(rep)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn cmd_sniff(args: SniffArgs) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input)?;
    if !input.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            None,
        ));
    }
    let open = || {
        File::open(&input)
            .with_context(|| format!("Failed to read input file: {}", input.display()))
    };

    if args.segments {
        let head = sniff::read_prefix(open()?, sniff::DELIMITER_LEN)
            .with_context(|| format!("Failed to read input file: {}", input.display()))?;
        let parts = sniff::read_segments(BufReader::new(open()?), args.limit)
            .with_context(|| format!("Failed to read input file: {}", input.display()))?;
        let delimiter = sniff::delimiter_text(&head);
        if args.json {
            let value = serde_json::json!({ "delimiter": delimiter, "segments": parts });
            println!("{value}");
        } else {
            println!("delimiter: {delimiter}");
            for (idx, segment) in parts.iter().enumerate() {
                println!("[{idx}] {segment}");
            }
        }
        return Ok(());
    }

    // only the bytes behind the first `limit` words are ever read
    let prefix_len = args.limit.saturating_mul(args.width.bytes());
    let raw = sniff::read_prefix(open()?, prefix_len)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let out = sniff::sniff(&raw);

    if args.json {
        let json = match args.width {
            WordWidth::Bits8 => serde_json::to_string(&out.bytes),
            WordWidth::Bits16 => serde_json::to_string(&out.words16),
            WordWidth::Bits32 => serde_json::to_string(&out.words32),
        }
        .context("JSON serialization failed")?;
        println!("{json}");
        return Ok(());
    }
    for line in sniff_lines(&out, args.width) {
        println!("{line}");
    }
    Ok(())
}

fn sniff_lines(out: &Sniff, width: WordWidth) -> Vec<String> {
    fn render<T: Display, C: Display>(words: &[sniff::Word<T, C>], step: usize) -> Vec<String> {
        words
            .iter()
            .enumerate()
            .map(|(idx, w)| format!("{:>8}  {:>11}  {}", idx * step, w.value, w.chars))
            .collect()
    }
    let step = width.bytes();
    match width {
        WordWidth::Bits8 => render(&out.bytes, step),
        WordWidth::Bits16 => render(&out.words16, step),
        WordWidth::Bits32 => render(&out.words32, step),
    }
}

fn ensure_distinct_output(input: &Path, report: &Path) -> Result<()> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let parent = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // the output directory may not exist yet
    let Ok(dir) = fs::canonicalize(parent) else {
        return Ok(());
    };
    let name = report
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report.display()))?;
    if dir.join(name) == input_abs {
        anyhow::bail!("report path must differ from input: {}", report.display());
    }
    Ok(())
}

fn validate_jsf_input(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .jsf file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .jsf file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "jsf" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .jsf file; use `jsfscan sniff` for unknown formats".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        n => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if n > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!("multiple files match pattern '{pattern}' ({n} matches); matches: {listed}"),
                Some("pass a single capture file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
