// crates/perf-pipeline-cli/src/main.rs
// ============================================================================
// Module: Pipeline CLI Entry Point
// Description: Command dispatcher for the employee performance pipeline.
// Purpose: Provide a localized CLI for full runs, offline stats, and config.
// Dependencies: clap, perf-pipeline-*, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `perf-pipeline` loads employee records from JSON, reloads them into a
//! relational table, prints descriptive statistics, and renders charts. All
//! user-facing strings are routed through the i18n catalog. Every fatal error
//! prints one line to stderr and exits with status 1.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use perf_pipeline_charts::SvgChartRenderer;
use perf_pipeline_cli::console::ConsoleObserver;
use perf_pipeline_cli::console::localized_chart_labels;
use perf_pipeline_cli::console::render_report_lines;
use perf_pipeline_cli::i18n::Locale;
use perf_pipeline_cli::i18n::set_locale;
use perf_pipeline_cli::t;
use perf_pipeline_config::PipelineConfig;
use perf_pipeline_config::StoreTarget;
use perf_pipeline_core::ChartSink;
use perf_pipeline_core::LoadError;
use perf_pipeline_core::MAX_INPUT_BYTES;
use perf_pipeline_core::PerformanceStore;
use perf_pipeline_core::Pipeline;
use perf_pipeline_core::PipelineError;
use perf_pipeline_core::PipelineSummary;
use perf_pipeline_core::StatisticsReport;
use perf_pipeline_core::StoreError;
use perf_pipeline_core::TableName;
use perf_pipeline_core::load_table_with_limit;
use perf_pipeline_store_postgres::PostgresPerformanceStore;
use perf_pipeline_store_sqlite::SqlitePerformanceStore;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "PERF_PIPELINE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "perf-pipeline", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `PERF_PIPELINE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load, reload into the database, report, and chart.
    Run(RunCommand),
    /// Load the input and print statistics without touching the database.
    Stats(StatsCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Optional config file path (defaults to perf-pipeline.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Input JSON file (overrides `input.path`).
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Department for the histogram (overrides `charts.department`).
    #[arg(long, value_name = "NAME")]
    department: Option<String>,
    /// Skip chart rendering.
    #[arg(long, action = ArgAction::SetTrue)]
    no_charts: bool,
    /// Output format for the statistics report.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Arguments for `stats`.
#[derive(Args, Debug)]
struct StatsCommand {
    /// Input JSON file.
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Output format for the statistics report.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate the configuration.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to perf-pipeline.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output formats for the statistics report.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output (NaN rendered as null).
    Json,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Spanish.
    Es,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Es => Self::Es,
        }
    }
}

/// JSON document printed by `run --format json`.
#[derive(Debug, Serialize)]
struct RunOutput<'a> {
    /// Target table.
    table: &'a TableName,
    /// Records loaded from the input file.
    rows_loaded: usize,
    /// Rows committed to the store.
    rows_inserted: usize,
    /// Statistics report.
    statistics: &'a StatisticsReport,
    /// Chart files written, in render order.
    charts: Vec<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Run(command) => command_run(&command),
        Commands::Stats(command) => command_stats(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the full pipeline.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let mut config = PipelineConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    apply_run_overrides(&mut config, command);
    config.validate().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;

    let pipeline = Pipeline::new(config.pipeline_options());
    let target = config.database.store_target();
    let mut renderer = config.charts.enabled.then(|| {
        SvgChartRenderer::new(config.charts.output_dir.clone())
            .with_size(config.charts.width, config.charts.height)
            .with_labels(localized_chart_labels())
    });
    let charts = renderer.as_mut().map(|renderer| renderer as &mut dyn ChartSink);

    let summary = if command.format == OutputFormat::Json {
        let mut observer = ConsoleObserver::status_only(std::io::stderr());
        pipeline.run(&config.input.path, || connect_store(&target), charts, &mut observer)
    } else {
        let mut observer = ConsoleObserver::new(std::io::stdout());
        pipeline.run(&config.input.path, || connect_store(&target), charts, &mut observer)
    }
    .map_err(|err| CliError::new(pipeline_error_message(&err)))?;

    if command.format == OutputFormat::Json {
        write_json(&run_output(&summary, &pipeline.options().table_name))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Applies command-line overrides on top of the loaded config.
fn apply_run_overrides(config: &mut PipelineConfig, command: &RunCommand) {
    if let Some(input) = &command.input {
        config.input.path.clone_from(input);
    }
    if let Some(department) = &command.department {
        config.charts.department.clone_from(department);
    }
    if command.no_charts {
        config.charts.enabled = false;
    }
}

/// Opens the configured store.
fn connect_store(target: &StoreTarget) -> Result<Box<dyn PerformanceStore>, StoreError> {
    match target {
        StoreTarget::Sqlite(config) => {
            let store = SqlitePerformanceStore::connect(config.clone())?;
            Ok(Box::new(store))
        }
        StoreTarget::Postgres(config) => {
            let store = PostgresPerformanceStore::connect(config)?;
            Ok(Box::new(store))
        }
    }
}

/// Builds the JSON run document.
fn run_output<'a>(summary: &'a PipelineSummary, table: &'a TableName) -> RunOutput<'a> {
    RunOutput {
        table,
        rows_loaded: summary.rows_loaded,
        rows_inserted: summary.rows_inserted,
        statistics: &summary.statistics,
        charts: summary.charts.iter().map(|chart| chart.path.display().to_string()).collect(),
    }
}

/// Maps a pipeline failure to a localized message.
fn pipeline_error_message(error: &PipelineError) -> String {
    match error {
        PipelineError::Load(LoadError::NotFound(path)) => {
            t!("input.not_found", path = path.display())
        }
        PipelineError::Load(err) => t!("input.load_failed", error = err),
        PipelineError::Store(err @ StoreError::Connection(_)) => {
            t!("db.connect_failed", error = err)
        }
        PipelineError::Store(err) => t!("db.query_failed", error = err),
        PipelineError::Chart(err) => t!("chart.render_failed", error = err),
        PipelineError::Output(err) => t!("pipeline.output_failed", error = err),
    }
}

// ============================================================================
// SECTION: Stats Command
// ============================================================================

/// Loads the input and prints the statistics report.
fn command_stats(command: &StatsCommand) -> CliResult<ExitCode> {
    let table = load_table_with_limit(&command.input, MAX_INPUT_BYTES)
        .map_err(|err| CliError::new(pipeline_error_message(&PipelineError::Load(err))))?;
    let report = StatisticsReport::compute(&table);
    match command.format {
        OutputFormat::Text => {
            for line in render_report_lines(&report) {
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
        OutputFormat::Json => write_json(&report)?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = PipelineConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!(
        "config.validate.ok",
        backend = config.database.backend,
        table = config.pipeline.table_name
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("pipeline.json_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
