use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use simulation_dashboard::data::generate::{generate, DEFAULT_COUNT};
use simulation_dashboard::{
    to_csv, App, DataSource, FileSource, HttpSource, Settings, SortKey, SortSpec,
};

#[derive(Parser, Debug)]
#[command(name = "simdash")]
#[command(about = "Validate, query and export simulation-run records")]
struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load records, apply a search and sort, and export the result as CSV
    Show(ShowArgs),
    /// Write a sample simulation_data.json
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Full URL of the record resource (defaults to base_url + resource_path)
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Read records from a local JSON file instead of HTTP
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Search pattern (regular expression, matched against every field)
    #[arg(short, long, default_value = "")]
    search: String,

    /// Column to sort by (id, timestamp, value, parameter_set, status, performance_index)
    #[arg(long)]
    sort: Option<SortKey>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// CSV output path (defaults to the configured export_path)
    #[arg(short, long, conflicts_with = "stdout")]
    export: Option<PathBuf>,

    /// Write the CSV to stdout instead of a file
    #[arg(long)]
    stdout: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of entries
    #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
    count: usize,

    /// RNG seed
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Output path
    #[arg(short, long, default_value = "simulation_data.json")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    init_tracing(&settings.log_level);

    match cli.command {
        Command::Show(args) => run_show(args, &settings),
        Command::Generate(args) => run_generate(args),
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load once, query, print the status summary and export.
fn run_show(args: ShowArgs, settings: &Settings) -> Result<()> {
    // Build a tokio runtime for the HTTP load
    let rt = tokio::runtime::Runtime::new()?;

    let source: Box<dyn DataSource> = match &args.file {
        Some(path) => Box::new(FileSource::new(path)),
        None => {
            let url = args.url.clone().unwrap_or_else(|| settings.resource_url());
            let client = reqwest::Client::builder()
                .timeout(settings.request_timeout())
                .build()?;
            let _guard = rt.enter();
            Box::new(HttpSource::spawn(client, url))
        }
    };

    let mut app = App::new(source);
    if !app.wait_for_load(settings.load_timeout()) {
        bail!("timed out waiting for {}", app.source_description());
    }

    app.set_search(args.search);
    if let Some(key) = args.sort {
        app.set_sort(Some(if args.desc {
            SortSpec::desc(key)
        } else {
            SortSpec::asc(key)
        }));
    }

    let rows = app.visible_records();

    if args.stdout {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", to_csv(&rows))?;
    } else {
        let path = args.export.unwrap_or_else(|| settings.export_path.clone());
        app.export_csv(&path)?;
        println!("Exported {} of {} records to {}", rows.len(), app.records().len(), path.display());
    }

    if let Some(err) = &app.load_error {
        eprintln!("Load failed: {}", err);
    }

    let counts = app.status_counts();
    eprintln!("Status counts ({} records):", counts.total());
    for (status, count) in counts.iter() {
        eprintln!("  {:<12} {}", status, count);
    }

    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let data = generate(args.count, args.seed);
    let json = serde_json::to_string_pretty(&data)?;
    fs::write(&args.out, json).with_context(|| format!("failed to write {}", args.out.display()))?;
    println!("Generated {} entries in {}", data.len(), args.out.display());
    Ok(())
}
