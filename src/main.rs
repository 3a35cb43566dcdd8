// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use regver::packages::read_attribute;
use regver::{RealFileSystem, Registry, Version, VersionSpec};
use std::cmp::Ordering;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Default registry root, overridable with --registry or REGVER_REGISTRY
const DEFAULT_REGISTRY: &str = "/var/lib/regver/registry";

#[derive(Parser)]
#[command(name = "regver")]
#[command(author, version, about = "Resolve installed package versions from a registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the highest installed version matching a specifier
    Resolve {
        /// Package name
        name: String,
        /// Package architecture (e.g. amd64, x86_64)
        arch: String,
        /// Version specifier, e.g. ">=2.0.0,!=4.0.0"
        #[arg(default_value = "*")]
        spec: String,
        /// Registry root directory
        #[arg(short, long, env = "REGVER_REGISTRY", default_value = DEFAULT_REGISTRY)]
        registry: PathBuf,
        /// Print a JSON report including every matching version
        #[arg(long)]
        json: bool,
    },
    /// List installed versions matching a specifier, lowest first
    List {
        /// Package name
        name: String,
        /// Package architecture
        arch: String,
        /// Version specifier
        #[arg(default_value = "*")]
        spec: String,
        /// Registry root directory
        #[arg(short, long, env = "REGVER_REGISTRY", default_value = DEFAULT_REGISTRY)]
        registry: PathBuf,
    },
    /// Extract the highest value of a `Label: value` attribute from a file
    Attribute {
        /// File containing `Label: value` lines
        file: PathBuf,
        /// Attribute label, e.g. Version
        label: String,
        /// Print an empty line instead of failing when the attribute is missing
        #[arg(long)]
        optional: bool,
    },
    /// Compare two versions and print <, = or >
    Compare {
        left: String,
        right: String,
    },
    /// Exit successfully if a version satisfies a specifier
    Satisfies {
        version: String,
        spec: String,
    },
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout stays scriptable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Resolve {
            name,
            arch,
            spec,
            registry,
            json,
        }) => {
            info!("Resolving {}/{} {} in {}", name, arch, spec, registry.display());
            let registry = Registry::open(registry);

            if json {
                let report = registry
                    .report(&name, &arch, &spec)
                    .with_context(|| format!("Failed to resolve {}/{}", name, arch))?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let version = registry
                    .resolve(&name, &arch, &spec)
                    .with_context(|| format!("Failed to resolve {}/{}", name, arch))?;
                println!("{}", version);
            }

            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::List {
            name,
            arch,
            spec,
            registry,
        }) => {
            let versions = Registry::open(registry)
                .list(&name, &arch, &spec)
                .with_context(|| format!("Failed to list {}/{}", name, arch))?;

            for version in &versions {
                println!("{}", version);
            }

            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Attribute {
            file,
            label,
            optional,
        }) => {
            let value = read_attribute(&RealFileSystem, &file, &label, !optional)
                .with_context(|| format!("Failed to read '{}' from {}", label, file.display()))?;
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Compare { left, right }) => {
            println!("{}", compare_symbol(&left, &right)?);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Satisfies { version, spec }) => {
            if satisfies(&version, &spec)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        None => {
            // No command provided, show help
            println!("regver v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'regver --help' for usage information");
            println!("Default registry: {}", DEFAULT_REGISTRY);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn compare_symbol(left: &str, right: &str) -> Result<&'static str> {
    let left: Version = left.parse()?;
    let right: Version = right.parse()?;

    Ok(match left.cmp(&right) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    })
}

fn satisfies(version: &str, spec: &str) -> Result<bool> {
    let version: Version = version.parse()?;
    let spec: VersionSpec = spec.parse()?;
    Ok(spec.matches(&version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compare_symbol() {
        assert_eq!(compare_symbol("1.0", "1.0").unwrap(), "=");
        assert_eq!(compare_symbol("1:1.0", "2.0").unwrap(), "<");
        assert_eq!(compare_symbol("1:2.0", "2.0").unwrap(), ">");
        assert_eq!(compare_symbol("2.0.0-1", "2.0.0-1ubuntu1").unwrap(), "<");
        assert!(compare_symbol("", "1.0").is_err());
    }

    #[test]
    fn test_satisfies() {
        assert!(satisfies("3.0.0", ">=2.0.0,!=4.0.0").unwrap());
        assert!(!satisfies("4.0.0", ">=2.0.0,!=4.0.0").unwrap());
        assert!(satisfies("4.0.0", ">=2.0.0,=>").is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let cli = Cli::try_parse_from(["regver", "resolve", "foo", "amd64", "--registry", "/tmp/reg"]).unwrap();
        match cli.command {
            Some(Commands::Resolve {
                spec,
                registry,
                json,
                ..
            }) => {
                assert_eq!(spec, "*");
                assert_eq!(registry, PathBuf::from("/tmp/reg"));
                assert!(!json);
            }
            _ => panic!("expected resolve command"),
        }
    }
}
