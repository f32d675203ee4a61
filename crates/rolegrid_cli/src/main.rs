//! Command-line driver for the role/section grid.
//!
//! # Responsibility
//! - Replay position-addressed edit scripts against a fresh grid.
//! - Print the submission record, a text table or a placeholder audit.
//! - Decode a stored submission record back into a table.

mod script;

use clap::{Args, Parser, Subcommand};
use log::info;
use rolegrid_core::{
    audit_placeholders, decode_submission, default_log_level, init_logging,
    missing_required_fields, render_text, ConfigError, DecodeError, ExperimentDetails, GridLimits,
    GridService, GridView, LoggingError, MissingField, SubmitError, DEFAULT_MAX_ROLES,
    DEFAULT_MAX_SECTIONS,
};
use script::{load_json, load_script, run_script, ScriptError};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "rolegrid", about = "Build and serialize role/section experiment grids")]
struct Cli {
    /// Directory for rolling log files; logging stays off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check core crate linkage.
    Ping,
    /// Run an edit script and print the submission record.
    Run(RunArgs),
    /// Run an edit script and print the grid as a text table.
    Render(GridArgs),
    /// Run an edit script and report known and unknown placeholders.
    Placeholders(GridArgs),
    /// Decode a submission record and print it as a text table.
    Decode {
        /// Path to a submission JSON file.
        payload: PathBuf,
    },
}

#[derive(Args, Debug)]
struct GridArgs {
    /// JSON array of edit steps.
    #[arg(long)]
    script: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MAX_ROLES)]
    max_roles: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_SECTIONS)]
    max_sections: usize,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    grid: GridArgs,

    /// JSON file with creator, starting_message, llms, note, favourite.
    #[arg(long)]
    details: Option<PathBuf>,

    /// Refuse to print a record while role names or section titles are blank.
    #[arg(long)]
    strict: bool,

    #[arg(long)]
    pretty: bool,
}

#[derive(Debug)]
enum CliError {
    Script(ScriptError),
    Config(ConfigError),
    Logging(LoggingError),
    Submit(SubmitError),
    Decode(DecodeError),
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingFields(Vec<MissingField>),
    WorkingDir(std::io::Error),
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Script(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "logging: {err}"),
            Self::Submit(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "decode failed: {err}"),
            Self::Read { path, source } => {
                write!(f, "cannot read payload `{}`: {source}", path.display())
            }
            Self::MissingFields(fields) => {
                let joined = fields
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "required fields are blank: {joined}")
            }
            Self::WorkingDir(err) => write!(f, "cannot resolve working directory: {err}"),
            Self::Json(err) => write!(f, "json output failed: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Script(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Submit(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Read { source, .. } => Some(source),
            Self::WorkingDir(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::MissingFields(_) => None,
        }
    }
}

impl From<ScriptError> for CliError {
    fn from(value: ScriptError) -> Self {
        Self::Script(value)
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<SubmitError> for CliError {
    fn from(value: SubmitError) -> Self {
        Self::Submit(value)
    }
}

impl From<DecodeError> for CliError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    if let Some(dir) = cli.log_dir.as_deref() {
        start_logging(dir, cli.log_level.as_deref())?;
    }

    match cli.command {
        Command::Ping => Ok(format!(
            "rolegrid_core ping={} version={}",
            rolegrid_core::ping(),
            rolegrid_core::core_version()
        )),
        Command::Run(args) => {
            let service = build_grid(&args.grid)?;
            let missing = missing_required_fields(service.grid());
            if args.strict && !missing.is_empty() {
                return Err(CliError::MissingFields(missing));
            }
            for field in &missing {
                eprintln!("warning: {field}");
            }

            let details = match args.details.as_deref() {
                Some(path) => load_json::<ExperimentDetails>(path)?,
                None => ExperimentDetails::default(),
            };
            let payload = service.submit(&details);
            if args.pretty {
                Ok(serde_json::to_string_pretty(&payload)?)
            } else {
                Ok(rolegrid_core::to_json(&payload)?)
            }
        }
        Command::Render(args) => {
            let service = build_grid(&args)?;
            Ok(render_text(&GridView::project(service.grid())))
        }
        Command::Placeholders(args) => {
            let service = build_grid(&args)?;
            Ok(serde_json::to_string_pretty(&audit_placeholders(
                service.grid(),
            ))?)
        }
        Command::Decode { payload } => {
            let raw = read_payload(&payload)?;
            let (details, grid) = decode_submission(&raw)?;
            info!(
                "event=decode module=cli status=ok roles={} sections={}",
                grid.role_count(),
                grid.section_count()
            );
            let header = if details.creator.is_empty() {
                String::new()
            } else {
                format!("creator: {}\n", details.creator)
            };
            Ok(format!("{header}{}", render_text(&GridView::project(&grid))))
        }
    }
}

fn read_payload(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn build_grid(args: &GridArgs) -> Result<GridService, CliError> {
    let limits = GridLimits::new(args.max_roles, args.max_sections)?;
    let steps = load_script(&args.script)?;
    let mut service = GridService::new(limits);
    run_script(&mut service, &steps)?;
    info!(
        "event=script_run module=cli status=ok steps={} roles={} sections={}",
        steps.len(),
        service.grid().role_count(),
        service.grid().section_count()
    );
    Ok(service)
}

fn start_logging(dir: &Path, level: Option<&str>) -> Result<(), CliError> {
    let dir = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(CliError::WorkingDir)?
            .join(dir)
    };
    let level = level.unwrap_or_else(|| default_log_level());
    init_logging(level, &dir.to_string_lossy())?;
    Ok(())
}
