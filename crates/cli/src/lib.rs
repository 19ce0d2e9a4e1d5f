//! Command-line driver for `svcgen`.
//!
//! Loads an API description from disk, runs the generator and writes the
//! resulting TypeScript modules.

#![forbid(unsafe_code)]

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod generate;

/// Crates whose events a plain `SVCGEN_LOG` level applies to.
const LOG_TARGETS: [&str; 2] = ["svcgen_core", "svcgen_cli"];

#[derive(Parser)]
#[command(
    name = "svcgen",
    version,
    about = "Generate typed TypeScript service clients from OpenAPI descriptions"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate service modules from an API description
    Generate(generate::GenerateArgs),
}

/// Parse `args` (including the program name) and run the selected command.
///
/// Returns the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => {
                init_tracing(args.verbose);
                generate::run(args)
            }
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            // --help and --version land here too; only real usage errors fail.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            code
        }
    }
}

fn init_tracing(verbose: bool) {
    // SVCGEN_LOG takes a plain level ("debug") or a full filter spec
    // ("svcgen_core=trace,svcgen_cli=info"); --verbose wins over both.
    let filter = if verbose {
        level_filter("debug")
    } else {
        match std::env::var("SVCGEN_LOG") {
            Ok(level) if is_plain_level(&level) => level_filter(&level),
            Ok(spec) => spec,
            Err(_) => level_filter("info"),
        }
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn level_filter(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_levels() {
        assert!(is_plain_level("debug"));
        assert!(is_plain_level("WARN"));
        assert!(!is_plain_level("svcgen_core=debug"));
    }

    #[test]
    fn test_level_filter_covers_both_crates() {
        assert_eq!(level_filter("trace"), "svcgen_core=trace,svcgen_cli=trace");
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "svcgen",
            "generate",
            "openapi.yaml",
            "--out",
            "src/api",
            "--services-dir",
            "clients",
            "--check",
        ])
        .unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(args.spec.to_str(), Some("openapi.yaml"));
        assert_eq!(args.out.to_str(), Some("src/api"));
        assert_eq!(args.services_dir.as_deref(), Some("clients"));
        assert!(args.check);
        assert!(!args.verbose);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_generate_requires_out() {
        assert!(Cli::try_parse_from(["svcgen", "generate", "openapi.json"]).is_err());
    }
}
