//! Named company lookups on top of the paged query engine.

use openkvk_api::types::ResponseFormat;
use openkvk_api::{Client, FilterSet, Transport, PAGE_LIMIT};

use crate::config::EngineConfig;
use crate::engine::QueryEngine;
use crate::error::OpenKvkError;
use crate::reassemble::KvkResult;
use crate::statement::parse_statement;
use crate::validation;

/// Column holding the 8-digit KVK number in the `kvk` table.
///
/// Older revisions of the service schema called this `kvk`; `kvks` is what the
/// current schema answers to.
pub const ID_COLUMN: &str = "kvks";

/// Rows requested by [`KvkClient::search`].
pub const SEARCH_LIMIT: u64 = 200;

/// Filter keys that select rows in [`KvkClient::get_bankruptcies`], in
/// priority order.
pub const BANKRUPTCY_ID_KEY: &str = "kvk";
pub const BANKRUPTCY_CITY_KEY: &str = "plaats";
pub const BANKRUPTCY_COURT_KEY: &str = "rechtbank";

/// Company registry lookups.
///
/// Each method builds one base statement and hands it to the engine together
/// with the number of rows wanted.
pub struct KvkClient<T = Client> {
    engine: QueryEngine<T>,
}

impl Default for KvkClient<Client> {
    fn default() -> Self {
        Self::new()
    }
}

impl KvkClient<Client> {
    /// Creates a client for the production API.
    pub fn new() -> Self {
        Self {
            engine: QueryEngine::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            engine: QueryEngine::from_config(config),
        }
    }

    /// Creates a client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            engine: QueryEngine::with_transport(Client::with_base_url(base_url)),
        }
    }
}

impl<T: Transport> KvkClient<T> {
    pub fn with_engine(engine: QueryEngine<T>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &QueryEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut QueryEngine<T> {
        &mut self.engine
    }

    /// See [`QueryEngine::set_format`].
    pub fn set_format(&mut self, value: &str) -> Result<(), OpenKvkError> {
        self.engine.set_format(value)
    }

    pub fn set_response_format(&mut self, format: ResponseFormat) {
        self.engine.set_response_format(format);
    }

    pub fn set_active_only(&mut self, active_only: bool) {
        self.engine.set_active_only(active_only);
    }

    /// Looks up one company by KVK number.
    pub async fn get_by_kvk(&self, kvk: u64, fields: &[&str]) -> Result<KvkResult, OpenKvkError> {
        let fields = validation::validate_fields(fields)?;
        let base = format!("SELECT {} FROM kvk WHERE {} = {}", fields, ID_COLUMN, kvk);
        self.engine.execute(&base, 1, &FilterSet::new()).await
    }

    /// Companies whose name contains `name`, case-insensitive.
    pub async fn get_by_name(
        &self,
        name: &str,
        limit: u64,
        fields: &[&str],
    ) -> Result<KvkResult, OpenKvkError> {
        let name = validation::validate_search(name)?;
        let limit = validation::validate_limit(limit)?;
        let fields = validation::validate_fields(fields)?;
        let base = format!(
            "SELECT {} FROM kvk WHERE bedrijfsnaam ILIKE '%{}%'",
            fields, name
        );
        self.engine.execute(&base, limit, &FilterSet::new()).await
    }

    /// Companies registered under an SBI activity code.
    pub async fn get_by_sbi(
        &self,
        code: &str,
        limit: u64,
        fields: &[&str],
        filters: &FilterSet,
    ) -> Result<KvkResult, OpenKvkError> {
        let code = validation::validate_sbi_code(code)?;
        let limit = validation::validate_limit(limit)?;
        let fields = validation::validate_fields(fields)?;
        let base = format!(
            "SELECT {} FROM kvk JOIN kvk_sbi ON kvk_sbi.kvk = kvk.kvk WHERE code = '{}'",
            fields, code
        );
        self.engine.execute(&base, limit, filters).await
    }

    /// Companies whose city contains `city`, case-insensitive.
    pub async fn get_by_city(
        &self,
        city: &str,
        limit: u64,
        fields: &[&str],
        filters: &FilterSet,
    ) -> Result<KvkResult, OpenKvkError> {
        let city = validation::validate_search(city)?;
        let limit = validation::validate_limit(limit)?;
        let fields = validation::validate_fields(fields)?;
        let base = format!("SELECT {} FROM kvk WHERE plaats ILIKE '%{}%'", fields, city);
        self.engine.execute(&base, limit, filters).await
    }

    /// Bankruptcy records selected by KVK number, city, or court name.
    ///
    /// The first of `kvk`, `plaats`, `rechtbank` present in `filters` becomes
    /// the selecting predicate. All three keys are taken out of the filter set;
    /// any other filters still apply. Fails before any request when none of
    /// them is given.
    pub async fn get_bankruptcies(
        &self,
        fields: &[&str],
        limit: u64,
        filters: &FilterSet,
    ) -> Result<KvkResult, OpenKvkError> {
        let fields = validation::validate_fields(fields)?;
        let limit = validation::validate_limit(limit)?;

        let mut rest = filters.clone();
        let id = rest.remove(BANKRUPTCY_ID_KEY);
        let city = rest.remove(BANKRUPTCY_CITY_KEY);
        let court = rest.remove(BANKRUPTCY_COURT_KEY);

        let predicate = if let Some(id) = id {
            let id = id.trim().parse::<u64>().map_err(|_| {
                OpenKvkError::InvalidInput(format!("invalid KVK number '{}'", id))
            })?;
            format!("kvk = {}", id)
        } else if let Some(city) = city {
            format!("plaats ILIKE '%{}%'", validation::validate_search(&city)?)
        } else if let Some(court) = court {
            format!("rechtbank ILIKE '%{}%'", validation::validate_search(&court)?)
        } else {
            return Err(OpenKvkError::MissingParameter(format!(
                "bankruptcy listing needs one of '{}', '{}' or '{}'",
                BANKRUPTCY_ID_KEY, BANKRUPTCY_CITY_KEY, BANKRUPTCY_COURT_KEY
            )));
        };

        let base = format!("SELECT {} FROM faillissementen WHERE {}", fields, predicate);
        self.engine.execute(&base, limit, &rest).await
    }

    /// Runs a caller-written statement. A trailing `LIMIT n` sets the number
    /// of rows; without one, [`PAGE_LIMIT`] rows are requested.
    pub async fn query(&self, text: &str) -> Result<KvkResult, OpenKvkError> {
        let statement = parse_statement(text)?;
        let limit = validation::validate_limit(statement.limit.unwrap_or(PAGE_LIMIT))?;
        self.engine
            .execute(&statement.body, limit, &FilterSet::new())
            .await
    }

    /// Runs a caller-written statement for exactly `limit` rows. The statement
    /// must not carry its own `LIMIT`.
    pub async fn get_custom(&self, query: &str, limit: u64) -> Result<KvkResult, OpenKvkError> {
        let limit = validation::validate_limit(limit)?;
        let statement = parse_statement(query)?;
        if statement.limit.is_some() {
            return Err(OpenKvkError::InvalidInput(
                "statement already has a LIMIT clause; pass the row count separately"
                    .to_string(),
            ));
        }
        self.engine
            .execute(&statement.body, limit, &FilterSet::new())
            .await
    }

    /// Full-text search over company names and addresses, including
    /// ANBI (charity) status and bankruptcy joins.
    pub async fn search(&self, text: &str) -> Result<KvkResult, OpenKvkError> {
        let text = validation::validate_search(text)?;
        let base = format!(
            "SELECT x.kvk, x.bedrijfsnaam, x.adres, x.postcode, x.plaats, x.type, \
             NOT(anbikvk.kvks is null AND anbikvk.intrekking is null) AS 'anbi', status, x.kvks, x.sub \
             FROM (SELECT kvk.kvk, kvk.bedrijfsnaam, kvk.adres, kvk.postcode, kvk.plaats, kvk.type, kvk.kvks, kvk.sub \
             FROM sphinx_searchIndex('{}', '*') AS fts, kvk WHERE kvk.kvk = fts.id) AS x \
             LEFT JOIN anbikvk ON x.kvks = anbikvk.kvks \
             LEFT JOIN faillissementen ON x.kvks = faillissementen.kvk",
            text
        );
        self.engine
            .execute(&base, SEARCH_LIMIT, &FilterSet::new())
            .await
    }
}
