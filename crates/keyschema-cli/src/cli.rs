//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use keyschema_core::ValidatorRegistry;
use keyschema_telemetry::{LogFormat, LoggingConfig, init_logging};

use crate::catalog::Catalog;
use crate::commands::{
    handle_binary_decode, handle_binary_encode, handle_check, handle_cidr_contains,
    handle_cidr_range, handle_cidr_scope, handle_compliance, handle_validate,
};
use crate::error::{CliError, CliResult};

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command, and reports failures.
/// Returns the process exit code.
#[must_use]
pub fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: option_env!("KEYSCHEMA_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    match execute(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

/// Run a parsed command; handlers print their own output.
pub(crate) fn execute(cli: Cli) -> CliResult<()> {
    let ctx = AppContext {
        registry: ValidatorRegistry::new(),
        catalog: cli.catalog,
        output: cli.output,
    };
    tracing::debug!(command = command_label(&cli.command), "dispatching command");

    match cli.command {
        Command::Validate(args) => handle_validate(&ctx, &args),
        Command::Check => handle_check(&ctx),
        Command::Compliance(args) => handle_compliance(&ctx, &args),
        Command::Binary(binary) => match binary {
            BinaryCommand::Encode(args) => handle_binary_encode(&ctx, args),
            BinaryCommand::Decode(args) => handle_binary_decode(&ctx, &args),
        },
        Command::Cidr(cidr) => match cidr {
            CidrCommand::Range(args) => handle_cidr_range(&ctx, &args),
            CidrCommand::Contains(args) => handle_cidr_contains(&ctx, &args),
            CidrCommand::Scope(args) => handle_cidr_scope(&ctx, &args),
        },
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Validate(_) => "validate",
        Command::Check => "check",
        Command::Compliance(_) => "compliance",
        Command::Binary(BinaryCommand::Encode(_)) => "binary encode",
        Command::Binary(BinaryCommand::Decode(_)) => "binary decode",
        Command::Cidr(CidrCommand::Range(_)) => "cidr range",
        Command::Cidr(CidrCommand::Contains(_)) => "cidr contains",
        Command::Cidr(CidrCommand::Scope(_)) => "cidr scope",
    }
}

/// Shared state handed to command handlers.
pub(crate) struct AppContext {
    pub(crate) registry: ValidatorRegistry,
    pub(crate) catalog: Option<PathBuf>,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Load the catalog named by `--catalog` or `KEYSCHEMA_CATALOG`.
    pub(crate) fn catalog(&self) -> CliResult<Catalog> {
        let path = self.catalog.as_deref().ok_or_else(|| {
            CliError::validation("catalog is required (pass --catalog or set KEYSCHEMA_CATALOG)")
        })?;
        Catalog::load(path).map_err(CliError::failure)
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "keyschema",
    about = "Validate configuration values against a schema catalog"
)]
pub(crate) struct Cli {
    #[arg(long, global = true, env = "KEYSCHEMA_CATALOG")]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "KEYSCHEMA_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[arg(long, global = true, env = "KEYSCHEMA_LOG_FORMAT")]
    pub(crate) log_format: Option<LogFormat>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Validate a value for a catalog key.
    Validate(ValidateArgs),
    /// Check every catalog entry for structural problems.
    Check,
    /// Compare two catalogs for backward compatibility.
    Compliance(ComplianceArgs),
    /// Encode or decode compact binary-object literals.
    #[command(subcommand)]
    Binary(BinaryCommand),
    /// Inspect CIDR ranges.
    #[command(subcommand)]
    Cidr(CidrCommand),
}

#[derive(Debug, Args)]
pub(crate) struct ValidateArgs {
    #[arg(long, help = "Catalog key to validate against")]
    pub(crate) key: String,
    #[arg(long, help = "Raw value; the entry's default is used when omitted")]
    pub(crate) value: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ComplianceArgs {
    #[arg(long, help = "Catalog currently in force")]
    pub(crate) current: PathBuf,
    #[arg(long, help = "Catalog proposed to replace it")]
    pub(crate) candidate: PathBuf,
}

#[derive(Debug, Subcommand)]
pub(crate) enum BinaryCommand {
    /// Render a binary object in its fully-qualified form.
    Encode(BinaryEncodeArgs),
    /// Parse a compact binary-object literal.
    Decode(BinaryDecodeArgs),
}

#[derive(Debug, Args)]
pub(crate) struct BinaryEncodeArgs {
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long, help = "RFC-3339 timestamp; the current time is used when omitted")]
    pub(crate) timestamp: Option<String>,
    #[arg(long)]
    pub(crate) mimetype: Option<String>,
    #[arg(long, help = "Base64 payload")]
    pub(crate) data: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct BinaryDecodeArgs {
    #[arg(help = "Compact literal (name|timestamp|{mimetype}data)")]
    pub(crate) literal: String,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CidrCommand {
    /// Show the network and broadcast addresses of a range.
    Range(CidrRangeArgs),
    /// Test whether an address lies inside a range.
    Contains(CidrContainsArgs),
    /// Test an address against a range, address or host name.
    Scope(CidrScopeArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CidrRangeArgs {
    #[arg(help = "CIDR literal (address/prefixLength)")]
    pub(crate) range: String,
}

#[derive(Debug, Args)]
pub(crate) struct CidrContainsArgs {
    #[arg(help = "CIDR literal (address/prefixLength)")]
    pub(crate) range: String,
    #[arg(help = "IPv4 or IPv6 address")]
    pub(crate) address: String,
}

#[derive(Debug, Args)]
pub(crate) struct CidrScopeArgs {
    #[arg(help = "IPv4 or IPv6 address")]
    pub(crate) address: String,
    #[arg(help = "CIDR range, address or host name")]
    pub(crate) scope: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
