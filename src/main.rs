use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use protodeps::config::Config;
use protodeps::render::render_manifest;
use protodeps::{FsReader, Manifest, ManifestParser};

#[derive(Parser)]
#[command(name = "protodeps")]
#[command(about = "Validate .proto dependency manifests", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a manifest and list its dependencies, exit with code 1 if it is invalid
    Check {
        /// Path to the manifest
        #[arg(short, long)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
    /// Print the manifest in normalized form
    Fmt {
        /// Path to the manifest
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Profile manifest parsing (for use with cargo-flamegraph)
    ProfileParse {
        /// Path to the manifest
        #[arg(short, long)]
        file: PathBuf,

        /// Number of iterations (for meaningful profiling)
        #[arg(short, long, default_value = "1000")]
        iterations: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(&FsReader, path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e:#}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Check { file, output } => run_check(&config, &file, output),
        Commands::Fmt { file } => run_fmt(&file),
        Commands::ProfileParse { file, iterations } => run_profile_parse(&file, iterations),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_manifest(file: &Path) -> anyhow::Result<Manifest> {
    ManifestParser::new(FsReader)
        .parse(file)
        .with_context(|| format!("Invalid manifest {}", file.display()))
}

fn run_check(config: &Config, file: &Path, output: OutputFormat) -> anyhow::Result<()> {
    let manifest = load_manifest(file)?;

    match output {
        OutputFormat::Json => {
            let deps: Vec<serde_json::Value> = manifest
                .dependencies
                .iter()
                .map(|dep| {
                    serde_json::json!({
                        "dependency": dep,
                        "resolved_destination": dep.resolve_destination(&config.root_path),
                    })
                })
                .collect();
            let report = serde_json::json!({
                "file": file.display().to_string(),
                "version": manifest.version,
                "root_path": config.root_path,
                "dependencies": deps,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Summary => {
            println!("Dependencies in {} ({})\n", file.display(), manifest.version);
            for dep in &manifest.dependencies {
                println!(
                    "  {:<5} {} @ {} -> {}",
                    dep.kind,
                    dep.source,
                    dep.version.tag,
                    dep.resolve_destination(&config.root_path).display()
                );
            }
            println!("\n[OK] {} dependencies", manifest.dependencies.len());
        }
    }

    Ok(())
}

fn run_fmt(file: &Path) -> anyhow::Result<()> {
    let manifest = load_manifest(file)?;
    print!("{}", render_manifest(&manifest)?);
    Ok(())
}

fn run_profile_parse(file: &Path, iterations: usize) -> anyhow::Result<()> {
    let content = std::fs::read(file)
        .with_context(|| format!("Error reading file {}", file.display()))?;

    eprintln!("Profiling parse operations for: {}", file.display());
    eprintln!("Iterations: {iterations}");
    eprintln!("File size: {} bytes", content.len());

    let start = Instant::now();
    let mut dependency_count = 0;

    for _ in 0..iterations {
        let manifest = std::hint::black_box(protodeps::parse_bytes(content.clone()))?;
        dependency_count = manifest.dependencies.len();
    }

    let elapsed = start.elapsed();
    eprintln!("\nProfiling complete!");
    eprintln!("Dependencies per parse: {dependency_count}");
    eprintln!("Total time: {elapsed:?}");
    if let Some(average) = average_per_iteration(elapsed, iterations) {
        eprintln!("Average per iteration: {average:?}");
    }

    Ok(())
}

fn average_per_iteration(elapsed: Duration, iterations: usize) -> Option<Duration> {
    if iterations == 0 {
        return None;
    }
    Some(Duration::from_secs_f64(
        elapsed.as_secs_f64() / iterations as f64,
    ))
}
