use anyhow::Result;
use clap::Args;
use openkvk_lib::validation;
use openkvk_lib::{KvkClient, KvkResult, PAGE_LIMIT};

use super::{parse_fields, parse_filters};

#[derive(Args)]
pub struct KvkArgs {
    /// KVK number (8 digits)
    pub kvk: String,

    /// Comma separated columns to return (default: all)
    #[arg(long)]
    pub fields: Option<String>,
}

#[derive(Args)]
pub struct NameArgs {
    /// Part of the company name, case-insensitive
    pub name: String,

    /// Maximum number of companies
    #[arg(long, default_value_t = PAGE_LIMIT)]
    pub limit: u64,

    /// Comma separated columns to return (default: all)
    #[arg(long)]
    pub fields: Option<String>,
}

#[derive(Args)]
pub struct CityArgs {
    /// Part of the city name, case-insensitive
    pub city: String,

    /// Maximum number of companies
    #[arg(long, default_value_t = PAGE_LIMIT)]
    pub limit: u64,

    /// Comma separated columns to return (default: all)
    #[arg(long)]
    pub fields: Option<String>,

    /// Extra equality filter, e.g. --filter type=Hoofdvestiging (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

#[derive(Args)]
pub struct SbiArgs {
    /// SBI activity code, e.g. 6201
    pub code: String,

    /// Maximum number of companies
    #[arg(long, default_value_t = PAGE_LIMIT)]
    pub limit: u64,

    /// Comma separated columns to return (default: all)
    #[arg(long)]
    pub fields: Option<String>,

    /// Extra equality filter, e.g. --filter plaats=Delft (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

pub async fn run_kvk(args: &KvkArgs, client: &KvkClient) -> Result<KvkResult> {
    let kvk = validation::validate_kvk_number(&args.kvk)?;
    Ok(client.get_by_kvk(kvk, &parse_fields(&args.fields)).await?)
}

pub async fn run_name(args: &NameArgs, client: &KvkClient) -> Result<KvkResult> {
    Ok(client
        .get_by_name(&args.name, args.limit, &parse_fields(&args.fields))
        .await?)
}

pub async fn run_city(args: &CityArgs, client: &KvkClient) -> Result<KvkResult> {
    let filters = parse_filters(&args.filters)?;
    Ok(client
        .get_by_city(&args.city, args.limit, &parse_fields(&args.fields), &filters)
        .await?)
}

pub async fn run_sbi(args: &SbiArgs, client: &KvkClient) -> Result<KvkResult> {
    let filters = parse_filters(&args.filters)?;
    Ok(client
        .get_by_sbi(&args.code, args.limit, &parse_fields(&args.fields), &filters)
        .await?)
}
