use anyhow::{Context, Result};
use cashlens_core::{Classifier, TransactionRecord};
use cashlens_ingest::{clean_file, BatchSummary, CleanOptions, NarrationTable};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "cashlens",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CASHLENS_BUILD_SHA"), ")"),
    about = "Classify bank-transaction narrations into dated, categorized records"
)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single narration and print the record
    Classify {
        /// Narration text, e.g. "Paid Rs. 450 to Zomato on 12/04/2024"
        text: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,

        /// Rule-table TOML overriding the configured/built-in tables
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Classify every row of a CSV and write the augmented CSV
    Clean {
        /// Input CSV with a header row and a narration column
        #[arg(long)]
        input: PathBuf,

        /// Output CSV (default: <input stem>_cleaned.<ext>)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Narration column name (default from config: text)
        #[arg(long)]
        column: Option<String>,

        /// Rule-table TOML overriding the configured/built-in tables
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Classify rows one at a time instead of on the worker pool
        #[arg(long)]
        sequential: bool,

        /// Number of classified rows to print (default from config: 10)
        #[arg(long)]
        preview: Option<usize>,
    },

    /// Rule-table commands
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },

    /// Config file commands (~/.cashlens/config.toml)
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// Print the effective rule tables as TOML
    Dump {
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let cfg = config::load_config()?;

    match cli.command {
        Command::Classify { text, json, rules } => {
            let classifier = build_classifier(&cfg, rules.as_deref())?;
            let record = classifier.classify(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
        }

        Command::Clean {
            input,
            output,
            column,
            rules,
            sequential,
            preview,
        } => {
            let classifier = build_classifier(&cfg, rules.as_deref())?;
            let output = output.unwrap_or_else(|| default_output_path(&input));
            let options = CleanOptions {
                text_column: column.unwrap_or_else(|| cfg.batch.text_column.clone()),
                parallel: cfg.batch.parallel && !sequential,
            };

            let (table, records, summary) = clean_file(&classifier, &input, &output, &options)
                .with_context(|| format!("cleaning {}", input.display()))?;

            println!("Cleaned CSV generated at: {}\n", output.display());
            print_preview(&table, &records, preview.unwrap_or(cfg.output.preview_rows));
            print_summary(&summary);
        }

        Command::Rules { command } => match command {
            RulesCommand::Dump { rules } => {
                let tables = config::load_rules(&cfg, rules.as_deref())?;
                print!("{}", tables.to_toml_string()?);
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn build_classifier(cfg: &config::Config, rules: Option<&Path>) -> Result<Classifier> {
    let tables = config::load_rules(cfg, rules)?;
    Classifier::with_rules(tables).context("building classifier")
}

/// `data/new.csv` -> `data/new_cleaned.csv`
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{}_cleaned.{}", stem, ext.to_string_lossy()),
        None => format!("{}_cleaned", stem),
    };
    input.with_file_name(name)
}

fn format_amount(amount: Option<f64>) -> String {
    amount.map(|a| format!("{:.2}", a)).unwrap_or_else(|| "-".to_string())
}

fn print_record(r: &TransactionRecord) {
    println!("date:         {}", r.date);
    println!("amount:       {}", format_amount(r.amount));
    println!("direction:    {}", r.direction);
    println!("merchant:     {}", r.merchant);
    println!("category:     {}", r.category);
    println!("sub_category: {}", r.sub_category);
}

fn print_preview(table: &NarrationTable, records: &[TransactionRecord], limit: usize) {
    if limit == 0 {
        return;
    }
    for (text, r) in table.texts().zip(records).take(limit) {
        println!(
            "- {} | {} | {} | {} | {} / {} | {}",
            text,
            r.date,
            format_amount(r.amount),
            r.merchant,
            r.category,
            r.sub_category,
            r.direction
        );
    }
    println!();
}

fn print_summary(summary: &BatchSummary) {
    println!("Rows: {} (without amount: {})", summary.rows, summary.missing_amount);
    for (cat, n) in &summary.by_category {
        println!("  {:<16} {}", cat.as_str(), n);
    }
    let directions: Vec<String> = summary
        .by_direction
        .iter()
        .map(|(d, n)| format!("{}={}", d, n))
        .collect();
    println!("Directions: {}", directions.join(", "));
}
