use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ghpaths::{ChangeSet, Config, PathsClient};

const CONFIG_FILE: &str = "ghpaths.toml";

#[derive(Parser)]
#[command(name = "ghpaths")]
#[command(about = "List files in GitHub repositories and report recent changes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (default: ghpaths.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log every API call
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every matching file on the default branch
    List {
        /// Print a JSON array instead of one path per line
        #[arg(long)]
        json: bool,
    },

    /// Show files added, removed or modified recently
    Changes {
        /// Size of the time window, in hours
        #[arg(long, default_value = "24")]
        hours: u32,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = Config::load(&config_path)
        .with_context(|| format!("Could not load {}", config_path.display()))?;

    let client = PathsClient::from_config(config).context("Failed to create GitHub client")?;

    match cli.command {
        Commands::List { json } => cmd_list(&client, json).await,
        Commands::Changes { hours, json } => cmd_changes(&client, hours, json).await,
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ghpaths=debug" } else { "ghpaths=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn cmd_list(client: &PathsClient<ghpaths::HttpGitHub>, json: bool) -> Result<()> {
    let paths = client.list_all_paths().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }

    for path in &paths {
        println!("{}", path);
    }

    eprintln!(
        "\n{} {} files in {} repositories",
        "•".green(),
        paths.len().to_string().bold(),
        client.config().repositories.len()
    );

    Ok(())
}

async fn cmd_changes(
    client: &PathsClient<ghpaths::HttpGitHub>,
    hours: u32,
    json: bool,
) -> Result<()> {
    let changes = client.list_changes_since(hours).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&changes)?);
        return Ok(());
    }

    print_changes(&changes, hours);
    Ok(())
}

fn print_changes(changes: &ChangeSet, hours: u32) {
    println!(
        "\n{} {} {}\n",
        "📦".cyan(),
        format!("Changes in the last {}h", hours).bold(),
        format!("({} entries)", changes.total()).dimmed()
    );

    if changes.is_empty() {
        println!("  {}", "No changes".dimmed());
        return;
    }

    let sections = [
        ("Added", "+", &changes.added),
        ("Removed", "-", &changes.removed),
        ("Modified", "~", &changes.modified),
    ];

    for (title, marker, paths) in sections {
        if paths.is_empty() {
            continue;
        }

        println!("{} {}", title.bold(), format!("({})", paths.len()).dimmed());
        for path in paths.iter() {
            let marker = match marker {
                "+" => marker.green(),
                "-" => marker.red(),
                _ => marker.yellow(),
            };
            println!("  {} {}", marker, path);
        }
        println!();
    }
}
