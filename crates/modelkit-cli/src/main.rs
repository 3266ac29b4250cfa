mod commands;
mod logging;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use modelkit_config::ConfigError;
use modelkit_core::{ArtifactKind, Error as CoreError, RecordFamily};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("check failed with {0} error(s)")]
    CheckFailed(usize),
}

#[derive(Parser, Debug)]
#[command(name = "modelkit", version, about = "Modelkit CLI")]
struct Cli {
    /// Also write JSON logs to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show attributes and defaults of record types.
    Inspect(InspectArgs),
    /// Validate a config document and dry-run every artifact.
    Check(CheckArgs),
    /// Print one generated artifact as JSON.
    Generate(GenerateArgs),
    /// Print the JSON Schema of config documents.
    ConfigSchema(ConfigSchemaArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Schema catalog (`schema.json`), or an ORM snapshot with `--snapshot`.
    #[arg(long, value_name = "PATH")]
    schema: PathBuf,
    /// Treat `--schema` as an ORM model snapshot.
    #[arg(long, default_value_t = false)]
    snapshot: bool,
    /// Extra attribute names that are always technical-internal.
    #[arg(long, value_name = "NAME")]
    technical: Vec<String>,
}

#[derive(Args, Debug)]
struct RegistryArgs {
    /// Record families that may be registered (default: model, proxy).
    #[arg(long = "allow-family", value_name = "FAMILY", value_parser = parse_family)]
    allow_family: Vec<RecordFamily>,
    /// Cap on smart-default table columns.
    #[arg(long, default_value_t = modelkit_generate::DEFAULT_TABLE_CAP)]
    table_cap: usize,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Only show this record type.
    #[arg(long, value_name = "NAME")]
    record_type: Option<String>,
    /// Print the canonical catalog as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,
    #[command(flatten)]
    registry: RegistryArgs,
    /// Config document (`.toml` or `.json`).
    #[arg(long, value_name = "PATH")]
    config: PathBuf,
    /// Print the report as JSON instead of markdown.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,
    #[command(flatten)]
    registry: RegistryArgs,
    /// Config document (`.toml` or `.json`); defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "NAME")]
    record_type: String,
    /// form, table, filter, serializer, resource, or admin.
    #[arg(long, value_name = "KIND")]
    artifact: ArtifactKind,
    /// Write the artifact here instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConfigSchemaArgs {
    /// Write the schema here instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

fn parse_family(value: &str) -> Result<RecordFamily, String> {
    match value.to_ascii_lowercase().as_str() {
        "model" => Ok(RecordFamily::Model),
        "proxy" => Ok(RecordFamily::Proxy),
        "abstract" => Ok(RecordFamily::Abstract),
        "view" => Ok(RecordFamily::View),
        other => Err(format!(
            "unknown record family '{other}' (expected model, proxy, abstract, or view)"
        )),
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Command::Inspect(args) => commands::run_inspect(args),
        Command::Check(args) => commands::run_check(args),
        Command::Generate(args) => commands::run_generate(args),
        Command::ConfigSchema(args) => commands::run_config_schema(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::try_parse_from([
            "modelkit",
            "generate",
            "--schema",
            "schema.json",
            "--record-type",
            "Sample",
            "--artifact",
            "table",
            "--allow-family",
            "view",
        ])
        .expect("parse");

        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.artifact, ArtifactKind::Table);
                assert_eq!(args.registry.allow_family, vec![RecordFamily::View]);
                assert_eq!(args.registry.table_cap, 5);
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_family() {
        assert!(parse_family("table").is_err());
        assert_eq!(parse_family("Proxy"), Ok(RecordFamily::Proxy));
    }
}
