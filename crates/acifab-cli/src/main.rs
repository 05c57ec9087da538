//! # acifab CLI entry point
//!
//! Parses command-line arguments, wires up tracing, runs the
//! load-validate-flatten pipeline, and maps the outcome to the process
//! contract: flattened collections on stdout and exit 0 on success, a
//! single `ERROR:` diagnostic on stderr and exit 1 on any failure —
//! including bad invocation, so clap's usage errors are mapped away from
//! its default exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use acifab_cli::render::{render, OutputFormat};

/// Validate a tenancy intent file and emit flat provisioning collections.
///
/// Walks the tenant tree once, enforcing field presence, vocabulary
/// membership, name uniqueness, and declaration-before-use references;
/// on success prints one record collection per entity kind.
#[derive(Parser, Debug)]
#[command(name = "acifab", version, about, long_about = None)]
struct Cli {
    /// Path to the tenancy intent configuration to validate.
    config: PathBuf,

    /// Output format for the flattened collections.
    #[arg(long, value_enum, default_value = "yaml")]
    format: OutputFormat,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version arrive here too; only real usage
            // errors take the failure exit.
            let failed = err.use_stderr();
            let _ = err.print();
            return if failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = acifab_cli::flatten_file(&cli.config)
        .and_then(|model| render(&model, cli.format));

    match outcome {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_config_path() {
        let cli = Cli::try_parse_from(["acifab", "tenancy.yaml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("tenancy.yaml"));
        assert_eq!(cli.format, OutputFormat::Yaml);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parse_requires_exactly_one_path() {
        assert!(Cli::try_parse_from(["acifab"]).is_err());
        assert!(Cli::try_parse_from(["acifab", "a.yaml", "b.yaml"]).is_err());
    }

    #[test]
    fn cli_parse_json_format() {
        let cli = Cli::try_parse_from(["acifab", "--format", "json", "tenancy.yaml"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn cli_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["acifab", "--format", "toml", "tenancy.yaml"]).is_err());
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli1 = Cli::try_parse_from(["acifab", "-v", "tenancy.yaml"]).unwrap();
        assert_eq!(cli1.verbose, 1);
        let cli3 = Cli::try_parse_from(["acifab", "-vvv", "tenancy.yaml"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn usage_errors_are_flagged_for_stderr() {
        let err = Cli::try_parse_from(["acifab"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn help_is_not_a_usage_error() {
        let err = Cli::try_parse_from(["acifab", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }
}
