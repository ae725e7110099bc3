mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use schemars::schema_for;
use thiserror::Error;
use tracing::{error, info};

use sampleforge_core::{CategoryTag, Diagnostic, Manifest};
use sampleforge_generate::{
    EvaluationError, ExpansionEngine, ExpansionReport, GenerationError, RenderOptions,
    SampleStore, load_manifest, render_report,
};

use logging::init_logging;
use output::emit;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "sampleforge", version, about = "Sample data accessors from type declarations")]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand every declaration of a manifest into sample accessors.
    Expand(ExpandArgs),
    /// Evaluate the samples of a manifest into JSON fixtures.
    Fixtures(FixturesArgs),
    /// Print the JSON Schema of the manifest format.
    Schema(SchemaArgs),
    /// List the supported category tags.
    Categories,
}

#[derive(Args, Debug)]
struct ExpandArgs {
    /// Manifest file (.toml or .json).
    manifest: PathBuf,
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Name of the generated accessor function.
    #[arg(long, default_value = "sample")]
    accessor: String,
    /// Path of the data generator type called by the accessors.
    #[arg(long, default_value = "DataGenerator")]
    generator: String,
    /// `cfg` predicate gating the accessors.
    #[arg(long, default_value = "debug_assertions", conflicts_with = "no_cfg")]
    cfg: String,
    /// Emit accessors without a `cfg` gate.
    #[arg(long, default_value_t = false)]
    no_cfg: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ExpandFormat::Rust)]
    format: ExpandFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExpandFormat {
    /// Rendered Rust source.
    Rust,
    /// The structural expansion report.
    Json,
}

#[derive(Args, Debug)]
struct FixturesArgs {
    /// Manifest file (.toml or .json).
    manifest: PathBuf,
    /// Seed for random-mode values; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_json) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::Expand(args) => run_expand(args),
        Command::Fixtures(args) => run_fixtures(args),
        Command::Schema(args) => run_schema(args),
        Command::Categories => run_categories(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_expand(args: ExpandArgs) -> Result<(), CliError> {
    let manifest = load_manifest(&args.manifest)?;
    let report = ExpansionEngine::new().expand_all(&manifest);
    print_diagnostics(&report);

    let options = RenderOptions {
        accessor_name: args.accessor,
        generator_path: args.generator,
        cfg_gate: (!args.no_cfg).then_some(args.cfg),
    };
    let data = match args.format {
        ExpandFormat::Rust => render_report(&report, &options).into_bytes(),
        ExpandFormat::Json => serde_json::to_vec_pretty(&report)?,
    };
    emit(args.out.as_deref(), &data)?;

    info!(
        manifest = %args.manifest.display(),
        accessors = report.accessors.len(),
        "accessors written"
    );
    report.into_result()?;
    Ok(())
}

fn run_fixtures(args: FixturesArgs) -> Result<(), CliError> {
    let manifest = load_manifest(&args.manifest)?;
    let report = ExpansionEngine::new().expand_all(&manifest);
    print_diagnostics(&report);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "materializing fixtures");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let store = SampleStore::materialize(&report.accessors, &mut rng)?;

    let mut data = serde_json::to_vec_pretty(&store.to_json())?;
    data.push(b'\n');
    emit(args.out.as_deref(), &data)?;

    info!(declarations = store.len(), "fixtures written");
    report.into_result()?;
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), CliError> {
    let schema = schema_for!(Manifest);
    let mut data = serde_json::to_vec_pretty(&schema)?;
    data.push(b'\n');
    emit(args.out.as_deref(), &data)
}

fn run_categories() -> Result<(), CliError> {
    let mut listing = CategoryTag::NAMES.join("\n");
    listing.push('\n');
    emit(None, listing.as_bytes())
}

fn print_diagnostics(report: &ExpansionReport) {
    for diagnostic in report.diagnostics.iter().chain(&report.notes) {
        eprintln!("{}", format_diagnostic(diagnostic));
    }
}

fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let mut text = format!(
        "{}[{}]: {}: {}",
        diagnostic.severity,
        diagnostic.code(),
        diagnostic.declaration,
        diagnostic.error
    );
    if let Some(fix_it) = &diagnostic.fix_it {
        text.push_str("\n  = help: ");
        text.push_str(fix_it);
    }
    text
}
