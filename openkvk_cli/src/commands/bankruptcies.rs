use anyhow::Result;
use clap::Args;
use openkvk_lib::client::{BANKRUPTCY_CITY_KEY, BANKRUPTCY_COURT_KEY, BANKRUPTCY_ID_KEY};
use openkvk_lib::{KvkClient, KvkResult, PAGE_LIMIT};

use super::{parse_fields, parse_filters};

#[derive(Args)]
pub struct BankruptciesArgs {
    /// KVK number of the bankrupt company
    #[arg(long)]
    pub kvk: Option<String>,

    /// Part of the city name
    #[arg(long)]
    pub city: Option<String>,

    /// Part of the court name (e.g. "Rotterdam")
    #[arg(long)]
    pub court: Option<String>,

    /// Maximum number of records
    #[arg(long, default_value_t = PAGE_LIMIT)]
    pub limit: u64,

    /// Comma separated columns to return (default: all)
    #[arg(long)]
    pub fields: Option<String>,

    /// Extra equality filter (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

pub async fn run(args: &BankruptciesArgs, client: &KvkClient) -> Result<KvkResult> {
    let mut filters = parse_filters(&args.filters)?;
    if let Some(kvk) = &args.kvk {
        filters.insert(BANKRUPTCY_ID_KEY, kvk)?;
    }
    if let Some(city) = &args.city {
        filters.insert(BANKRUPTCY_CITY_KEY, city)?;
    }
    if let Some(court) = &args.court {
        filters.insert(BANKRUPTCY_COURT_KEY, court)?;
    }
    Ok(client
        .get_bankruptcies(&parse_fields(&args.fields), args.limit, &filters)
        .await?)
}
