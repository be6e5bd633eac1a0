use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use evaluate::config::TaskCategory;
use evaluate::report::{default_export_path, ReportError};
use evaluate::{DocumentationStrategy, EvaluationContext, EvaluationManager, ReadmeQuality};
use hub_handler::{enrich_records, CategoryQuery, CollectionSource, Collector, HubClient};
use model::{read_records, write_records, DatasetRecord};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

const EXIT_INVALID_CATEGORY: u8 = 1;
const EXIT_USAGE: u8 = 2;

/// Collect Arabic datasets from the hub and grade them into High/Medium/Low tiers
#[derive(Parser, Debug)]
#[command(name = "evaluate", version)]
pub struct Cli {
    /// Config file, with or without the `.toml` extension
    #[arg(long, global = true, default_value = "evaluate/config")]
    pub config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect dataset metadata for one task category
    Collect {
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// List the available categories and exit
        #[arg(short = 'l', long)]
        list: bool,

        /// Save the collected records as CSV
        #[arg(short = 's', long)]
        save: bool,

        /// Output file (default: `<category>.csv`)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Score and classify the datasets of a collected CSV file
    Run {
        #[arg(short = 'f', long)]
        file: PathBuf,

        /// Column to count, or `all` for every tier column
        #[arg(short = 'e', long)]
        eval: Option<String>,

        /// Save the evaluated table as CSV
        #[arg(short = 's', long)]
        save: bool,

        /// Output file (default: `<file>_evaluated.csv`)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = DocumentationStrategy::Averaged)]
        strategy: DocumentationStrategy,

        /// Skip the hub lookups for missing Spaces and DOIs
        #[arg(long)]
        offline: bool,

        /// Evaluation date used for recency (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

pub async fn run(cli: Cli, ctx: EvaluationContext) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Collect {
            category,
            list,
            save,
            output,
        } => collect(&ctx, category.as_deref(), list, save, output)
            .await
            .map(ExitCode::from),
        Commands::Run {
            file,
            eval,
            save,
            output,
            strategy,
            offline,
            today,
        } => {
            let mut ctx = ctx;
            if let Some(today) = today {
                ctx.evaluation_date = today;
            }
            let args = RunArgs {
                file,
                eval,
                save,
                output,
                strategy,
                offline,
            };
            evaluate_file(&ctx, args).await.map(ExitCode::from)
        }
    }
}

fn print_categories(tasks: &[TaskCategory]) {
    println!("Available categories:");
    for task in tasks {
        println!(" - {}", task.label);
    }
}

async fn collect(
    ctx: &EvaluationContext,
    category: Option<&str>,
    list: bool,
    save: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<u8> {
    if list {
        print_categories(&ctx.tasks);
        return Ok(0);
    }

    let Some(category) = category else {
        eprintln!("Please provide a category using -c or --category, or use -l to list categories.");
        return Ok(EXIT_USAGE);
    };
    let Some(task) = ctx.task(category) else {
        eprintln!("Invalid category: '{}'", category);
        print_categories(&ctx.tasks);
        return Ok(EXIT_INVALID_CATEGORY);
    };
    info!("Processing category: {} ...", category);

    let client = HubClient::new(ctx.hub.clone()).context("Failed to create hub client")?;
    let query = CategoryQuery {
        label: &task.label,
        task: &task.hub_task,
        fallback: task.fallback.as_ref(),
    };
    let mut collection = Collector::new(&client).collect(&query).await;

    if collection.records.is_empty() {
        println!("No data found for the category '{}'.", category);
        return Ok(0);
    }
    let quality = ReadmeQuality::new(ctx);
    for record in &mut collection.records {
        quality.annotate(record);
    }
    print_records(&collection.records);

    if save {
        let suffix = match collection.source {
            CollectionSource::TaskCategory => "",
            CollectionSource::KeywordFallback => "_keywords",
        };
        let path = output.unwrap_or_else(|| PathBuf::from(format!("{}{}.csv", file_label(category), suffix)));
        write_records(&path, &collection.records)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Data saved to {}", path.display());
    }
    Ok(0)
}

fn file_label(category: &str) -> String {
    category.replace([' ', '/'], "_")
}

fn print_records(records: &[DatasetRecord]) {
    let cell = |v: Option<i64>| v.map_or_else(|| "-".to_owned(), |n| n.to_string());
    println!(
        "{:<48} {:>8} {:>10} {:>7} {:>7} {:>8}  License",
        "Dataset ID", "Likes", "Downloads", "Models", "Spaces", "README"
    );
    for r in records {
        println!(
            "{:<48} {:>8} {:>10} {:>7} {:>7} {:>8}  {}",
            r.dataset_id,
            cell(r.likes),
            cell(r.downloads),
            cell(r.models),
            cell(r.spaces),
            r.readme_quality_level.as_deref().unwrap_or("-"),
            r.license.as_deref().unwrap_or("-"),
        );
    }
    println!("[{} rows]", records.len());
}

struct RunArgs {
    file: PathBuf,
    eval: Option<String>,
    save: bool,
    output: Option<PathBuf>,
    strategy: DocumentationStrategy,
    offline: bool,
}

async fn evaluate_file(ctx: &EvaluationContext, args: RunArgs) -> anyhow::Result<u8> {
    let mut records = read_records(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    info!("Loaded {} datasets from {}", records.len(), args.file.display());

    if !args.offline {
        let client = HubClient::new(ctx.hub.clone()).context("Failed to create hub client")?;
        let updated = enrich_records(&client, &mut records).await;
        info!("Hub lookups finished for {} datasets", updated);
    }

    let mut manager = EvaluationManager::new();
    manager.add_default_passes(ctx, args.strategy);
    info!("Documentation/annotation strategy: {}", args.strategy);
    let report = manager.run(ctx, records);

    let mut status = 0;
    match report.counts(args.eval.as_deref()) {
        Ok(counts) => {
            for column in counts {
                println!("\n{}", column);
            }
        }
        Err(e @ ReportError::UnknownColumn(_)) => {
            eprintln!("Error: {}", e);
            status = EXIT_USAGE;
        }
        Err(e) => return Err(e.into()),
    }

    if args.save {
        let path = args
            .output
            .unwrap_or_else(|| default_export_path(Path::new(&args.file)));
        report
            .write_csv(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nEvaluation completed. Results saved to {}", path.display());
    }
    Ok(status)
}
