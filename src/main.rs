use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gradecalc::model::Dataset;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_STORAGE: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute averages and validation for the stored dataset (default)
    Compute {
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate the stored dataset without computing
    Check,
    /// Create a new dataset from a structure file
    Init {
        /// Structure file (YAML or JSON) with the grouping configuration
        #[arg(short, long)]
        structure: PathBuf,

        /// Number of placeholder subjects to create
        #[arg(short = 'n', long, default_value_t = 1)]
        subjects: usize,

        /// Overwrite an existing dataset
        #[arg(long)]
        force: bool,
    },
    /// Reshape the stored dataset to a new grouping configuration
    Convert {
        /// Structure file (YAML or JSON) with the new configuration
        #[arg(short, long)]
        structure: PathBuf,

        /// Print the converted dataset instead of saving it
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete the stored dataset
    Reset,
}

#[derive(Parser, Debug)]
#[command(name = "gradecalc")]
#[command(about = "Weighted grade averages with block and semester validation", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the dataset file (defaults to ~/.config/gradecalc/data.json)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Load the dataset or exit with a storage error
fn load_or_exit(path: &Path) -> Option<Dataset> {
    match gradecalc::storage::load_dataset(path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Storage error: {:#}", e);
            std::process::exit(EXIT_STORAGE);
        }
    }
}

fn require_dataset(path: &Path) -> Dataset {
    match load_or_exit(path) {
        Some(d) => d,
        None => {
            eprintln!("No dataset found at {}.", path.display());
            eprintln!("Create one with:");
            eprintln!("  gradecalc init --structure structure.yaml --subjects 5");
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn save_or_exit(path: &Path, dataset: &Dataset) {
    if let Err(e) = gradecalc::storage::save_dataset(path, dataset) {
        eprintln!("Storage error: {:#}", e);
        std::process::exit(EXIT_STORAGE);
    }
}

/// Print validation errors and exit if the dataset is not computable
fn validate_or_exit(dataset: &Dataset) {
    if let Err(errors) = gradecalc::validation::validate_dataset(dataset) {
        eprintln!("Dataset errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
}

fn print_warnings(warnings: &[gradecalc::diagnostics::Warning]) {
    if !warnings.is_empty() {
        let use_colors = std::io::IsTerminal::is_terminal(&std::io::stderr());
        eprintln!("{}", gradecalc::output::format_warnings(warnings, use_colors));
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Compute { json: false });
    let data_path = cli.data.unwrap_or_else(gradecalc::config::get_data_path);
    debug!("Using dataset at {}", data_path.display());

    match command {
        Commands::Compute { json } => {
            let dataset = require_dataset(&data_path);
            validate_or_exit(&dataset);
            print_warnings(&gradecalc::validation::consistency_warnings(&dataset));

            let report = gradecalc::compute(&dataset);

            if json {
                match gradecalc::output::format_json(&report) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            } else {
                let use_colors = gradecalc::output::should_use_colors();
                println!("{}", gradecalc::output::format_report(&report, use_colors));
            }
        }
        Commands::Check => {
            let dataset = require_dataset(&data_path);
            validate_or_exit(&dataset);
            let warnings = gradecalc::validation::consistency_warnings(&dataset);
            print_warnings(&warnings);
            println!(
                "Dataset OK: {} subjects, {} warnings",
                dataset.subjects.len(),
                warnings.len()
            );
        }
        Commands::Init {
            structure,
            subjects,
            force,
        } => {
            if !force && data_path.exists() {
                eprintln!(
                    "A dataset already exists at {}. Use --force to overwrite it.",
                    data_path.display()
                );
                std::process::exit(EXIT_CONFIG);
            }

            let config = match gradecalc::config::load_structure_config(&structure) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            // Enabled groupings need a non-empty list, same as a conversion
            let seed = match gradecalc::storage::new_dataset(&config, subjects) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let conversion = match gradecalc::convert(Some(&seed), Some(&config)) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            save_or_exit(&data_path, &conversion.dataset);
            info!("Created dataset at {}", data_path.display());
            println!(
                "Created {} subjects at {}",
                conversion.dataset.subjects.len(),
                data_path.display()
            );
            if !conversion.warnings.is_empty() {
                println!("Assign each subject to its groups before computing.");
            }
        }
        Commands::Convert { structure, dry_run } => {
            let config = match gradecalc::config::load_structure_config(&structure) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let existing = load_or_exit(&data_path);
            let conversion = match gradecalc::convert(existing.as_ref(), Some(&config)) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Conversion failed, dataset left unchanged: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            print_warnings(&conversion.warnings);

            if dry_run {
                match serde_json::to_string_pretty(&conversion.dataset) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Output error: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            } else {
                save_or_exit(&data_path, &conversion.dataset);
                println!(
                    "Converted dataset to {:?} mode ({} warnings)",
                    conversion.dataset.mode(),
                    conversion.warnings.len()
                );
            }
        }
        Commands::Reset => {
            if let Err(e) = gradecalc::storage::reset_dataset(&data_path) {
                eprintln!("Storage error: {:#}", e);
                std::process::exit(EXIT_STORAGE);
            }
            println!("Removed dataset at {}", data_path.display());
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
