use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use allie::scoring::{self, Multipliers};
use allie::survey::{Category, Responder};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the effective weight of every catalog question
    Weigh {
        /// Question catalog (YAML or JSON); defaults to `catalog` in the config
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Survey submission with the family's priorities
        #[arg(long)]
        survey: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Show overall and per-category balance for a survey submission
    Balance {
        /// Question catalog (YAML or JSON); defaults to `catalog` in the config
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Survey submission with priorities and responses
        #[arg(long)]
        survey: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
        /// Number of heaviest tasks to list per responder (table format only)
        #[arg(long, default_value_t = 3)]
        top: usize,
    },
    /// Validate a catalog and, optionally, a survey submission
    Check {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        survey: Option<PathBuf>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "allie")]
#[command(about = "Household responsibility balance scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/allie/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "allie=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn resolve_catalog(arg: Option<PathBuf>, config: &allie::config::Config) -> PathBuf {
    match arg.or_else(|| config.catalog.clone()) {
        Some(path) => path,
        None => fail(
            EXIT_CONFIG,
            "No question catalog given. Pass --catalog or set `catalog` in the config file.",
        ),
    }
}

fn load_inputs(
    catalog_path: &Path,
    survey_path: &Path,
) -> (allie::survey::Catalog, allie::survey::SurveySubmission) {
    let catalog = allie::survey::load_catalog(catalog_path)
        .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Catalog error: {:#}", e)));
    let submission = allie::survey::load_submission(survey_path)
        .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Survey error: {:#}", e)));
    (catalog, submission)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init { force } = cli.command {
        let path = match cli.config {
            Some(p) => p,
            None => allie::config::get_config_path()
                .unwrap_or_else(|e| fail(EXIT_CONFIG, format!("Config error: {:#}", e))),
        };
        if let Err(e) = allie::config::write_default_config(&path, force) {
            fail(EXIT_CONFIG, format!("Config error: {:#}", e));
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match allie::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => fail(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    // Validate multiplier tables at startup
    if let Err(errors) = scoring::validate_multipliers(&config.multipliers) {
        eprintln!("Multiplier config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let multipliers: &Multipliers = &config.multipliers;
    let use_colors = allie::output::should_use_colors();

    match cli.command {
        Commands::Weigh {
            catalog,
            survey,
            format,
        } => {
            let catalog_path = resolve_catalog(catalog, &config);
            let (catalog, submission) = load_inputs(&catalog_path, &survey);

            let mut rows = Vec::with_capacity(catalog.questions.len());
            for question in &catalog.questions {
                match scoring::explain_weight(question, &submission.priorities, multipliers) {
                    Ok(result) => rows.push(allie::output::WeightedQuestion { question, result }),
                    Err(e) => fail(EXIT_INPUT, format!("Scoring error: {}", e)),
                }
            }

            // Heaviest first; sort is stable so ties keep catalog order
            rows.sort_by(|x, y| {
                y.result
                    .weight
                    .partial_cmp(&x.result.weight)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            match format {
                Format::Table => {
                    let table = allie::output::format_weight_table(&rows, use_colors);
                    if cli.verbose && !rows.is_empty() {
                        for (line, row) in table.lines().zip(&rows) {
                            println!("{}", line);
                            println!("{}", allie::output::format_weight_breakdown(&row.result));
                        }
                    } else {
                        println!("{}", table);
                    }
                }
                Format::Tsv => println!("{}", allie::output::format_weight_tsv(&rows)),
                Format::Json => {
                    let entries: Vec<_> = rows
                        .iter()
                        .map(|row| {
                            serde_json::json!({
                                "questionId": row.question.id,
                                "category": row.question.category,
                                "weight": row.result.weight,
                            })
                        })
                        .collect();
                    match serde_json::to_string_pretty(&entries) {
                        Ok(json) => println!("{}", json),
                        Err(e) => fail(EXIT_INPUT, format!("Failed to serialize weights: {}", e)),
                    }
                }
            }
        }
        Commands::Balance {
            catalog,
            survey,
            format,
            top,
        } => {
            let catalog_path = resolve_catalog(catalog, &config);
            let (catalog, submission) = load_inputs(&catalog_path, &survey);

            let weighted = scoring::weigh_responses(
                &catalog.questions,
                &submission.responses,
                &submission.priorities,
                multipliers,
            )
            .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Scoring error: {}", e)));
            let scores = scoring::aggregate(&weighted);

            match format {
                Format::Table => {
                    println!(
                        "{}",
                        allie::output::format_balance_table(&scores, &config.names, use_colors)
                    );
                    if top > 0 {
                        for (responder, name) in [
                            (Responder::ResponderA, &config.names.a),
                            (Responder::ResponderB, &config.names.b),
                        ] {
                            let tasks = scoring::heaviest_tasks(&weighted, responder, top);
                            println!();
                            println!(
                                "{}",
                                allie::output::format_heaviest_tasks(
                                    name,
                                    &tasks,
                                    &catalog.questions,
                                    use_colors
                                )
                            );
                        }
                    }
                }
                Format::Tsv => println!("{}", allie::output::format_balance_tsv(&scores)),
                Format::Json => match serde_json::to_string_pretty(&scores) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(EXIT_INPUT, format!("Failed to serialize scores: {}", e)),
                },
            }
        }
        Commands::Check { catalog, survey } => {
            let catalog_path = resolve_catalog(catalog, &config);
            let catalog = allie::survey::load_catalog(&catalog_path)
                .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Catalog error: {:#}", e)));

            println!("Catalog OK: {} questions", catalog.questions.len());
            for category in Category::ALL {
                let count = catalog
                    .questions
                    .iter()
                    .filter(|q| q.category == category)
                    .count();
                println!("  {:<20} {}", category.label(), count);
            }

            if let Some(survey_path) = survey {
                let submission = allie::survey::load_submission(&survey_path)
                    .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Survey error: {:#}", e)));
                let weighted = scoring::weigh_responses(
                    &catalog.questions,
                    &submission.responses,
                    &submission.priorities,
                    multipliers,
                )
                .unwrap_or_else(|e| fail(EXIT_INPUT, format!("Scoring error: {}", e)));

                let unmatched = submission.responses.len() - weighted.len();
                println!(
                    "Survey OK: {} responses ({} unmatched), unranked category: {}",
                    submission.responses.len(),
                    unmatched,
                    submission
                        .priorities
                        .unranked()
                        .map(|c| c.label())
                        .unwrap_or("-")
                );
            }
        }
        Commands::Init { .. } => unreachable!("handled before config is loaded"),
    }

    std::process::exit(EXIT_SUCCESS);
}
