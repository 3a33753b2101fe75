use anyhow::Result;
use clap::Args;
use openkvk_lib::{KvkClient, KvkResult};

#[derive(Args)]
pub struct QueryArgs {
    /// SQL statement; a trailing LIMIT sets the number of rows (default 99)
    pub statement: String,

    /// Row count, for statements without their own LIMIT
    #[arg(long)]
    pub limit: Option<u64>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Free text to look up in the full-text index
    pub text: String,
}

pub async fn run(args: &QueryArgs, client: &KvkClient) -> Result<KvkResult> {
    let result = match args.limit {
        Some(limit) => client.get_custom(&args.statement, limit).await?,
        None => client.query(&args.statement).await?,
    };
    Ok(result)
}

pub async fn run_search(args: &SearchArgs, client: &KvkClient) -> Result<KvkResult> {
    Ok(client.search(&args.text).await?)
}
