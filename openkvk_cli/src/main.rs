mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use openkvk_lib::{EngineConfig, KvkClient};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "openkvk")]
#[command(about = "Query the Dutch company registry through the OpenKVK API")]
struct Cli {
    /// Output format: csv, json, table or markdown
    #[arg(long, short = 'f', default_value = "csv", global = true)]
    format: String,

    /// Write the result to this file instead of stdout
    #[arg(long, short = 'o', global = true)]
    output: Option<PathBuf>,

    /// Include companies that are no longer active
    #[arg(long, global = true)]
    all: bool,

    /// API base URL (overrides OPENKVK_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a company by KVK number
    Kvk(commands::companies::KvkArgs),
    /// Search companies by name
    Name(commands::companies::NameArgs),
    /// List companies in a city
    City(commands::companies::CityArgs),
    /// List companies by SBI activity code
    Sbi(commands::companies::SbiArgs),
    /// List bankruptcies by KVK number, city or court
    Bankruptcies(commands::bankruptcies::BankruptciesArgs),
    /// Run a raw SQL statement
    Query(commands::query::QueryArgs),
    /// Full-text company search
    Search(commands::query::SearchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("openkvk=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.format)?;

    let mut config = EngineConfig::from_env()?;
    if let Some(url) = &cli.base_url {
        config.base_url = Some(url.clone());
    }
    if cli.all {
        config.active_only = false;
    }
    config.format = format.response_format();

    let client = KvkClient::from_config(&config);

    let result = match &cli.command {
        Commands::Kvk(args) => commands::companies::run_kvk(args, &client).await?,
        Commands::Name(args) => commands::companies::run_name(args, &client).await?,
        Commands::City(args) => commands::companies::run_city(args, &client).await?,
        Commands::Sbi(args) => commands::companies::run_sbi(args, &client).await?,
        Commands::Bankruptcies(args) => commands::bankruptcies::run(args, &client).await?,
        Commands::Query(args) => commands::query::run(args, &client).await?,
        Commands::Search(args) => commands::query::run_search(args, &client).await?,
    };

    let text = output::render(result, format)?;
    output::write_output(&text, cli.output.as_deref())?;

    Ok(())
}
