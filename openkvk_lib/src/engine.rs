//! Paged execution of filtered statements.

use openkvk_api::types::ResponseFormat;
use openkvk_api::{build_query, divide, Client, FilterSet, Transport, MAX_ROWS};

use crate::config::EngineConfig;
use crate::error::OpenKvkError;
use crate::reassemble::{reassemble, KvkResult};
use crate::validation::parse_bool;

/// Runs statements against the service, one page at a time.
///
/// Holds two settings, the response format and the active-only flag. They
/// are changed through `&mut self`, so an engine shared between threads needs
/// external locking.
pub struct QueryEngine<T = Client> {
    transport: T,
    format: ResponseFormat,
    active_only: bool,
}

impl Default for QueryEngine<Client> {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEngine<Client> {
    /// Creates an engine for the production API, returning structured records
    /// of active companies only.
    pub fn new() -> Self {
        Self::with_transport(Client::new())
    }

    /// Creates an engine from configuration, e.g. [`EngineConfig::from_env`].
    pub fn from_config(config: &EngineConfig) -> Self {
        let client = match &config.base_url {
            Some(url) => Client::with_base_url(url),
            None => Client::new(),
        };
        let mut engine = Self::with_transport(client);
        engine.format = config.format;
        engine.active_only = config.active_only;
        engine
    }
}

impl<T: Transport> QueryEngine<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            format: ResponseFormat::default(),
            active_only: true,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn format(&self) -> ResponseFormat {
        self.format
    }

    pub fn active_only(&self) -> bool {
        self.active_only
    }

    /// Selects the result format by name: `structured` (or `py`), `json`, `csv`.
    pub fn set_format(&mut self, value: &str) -> Result<(), OpenKvkError> {
        self.format = value
            .parse()
            .map_err(|_| OpenKvkError::UnsupportedFormat(value.to_string()))?;
        Ok(())
    }

    pub fn set_response_format(&mut self, format: ResponseFormat) {
        self.format = format;
    }

    pub fn set_active_only(&mut self, active_only: bool) {
        self.active_only = active_only;
    }

    /// Sets the active-only flag from text; anything but a boolean word is a
    /// type error.
    pub fn set_active_only_str(&mut self, value: &str) -> Result<(), OpenKvkError> {
        self.active_only = parse_bool(value)?;
        Ok(())
    }

    /// Applies filters to `base`, fetches `total` rows in pages and merges them.
    ///
    /// Pages are requested in offset order and each request waits for the
    /// previous one. The first transport error ends the call; pages already
    /// received are dropped.
    pub async fn execute(
        &self,
        base: &str,
        total: u64,
        filters: &FilterSet,
    ) -> Result<KvkResult, OpenKvkError> {
        if total > MAX_ROWS {
            return Err(OpenKvkError::InvalidInput(format!(
                "row count {} exceeds maximum of {}",
                total, MAX_ROWS
            )));
        }
        let query = build_query(base, filters, self.active_only);
        let pages = divide(&query, total);
        tracing::debug!(
            "Fetching {} rows in {} page(s) as {}",
            total,
            pages.len(),
            self.format
        );

        let mut bodies = Vec::with_capacity(pages.len());
        for page in &pages {
            tracing::debug!("Page offset {} limit {}", page.offset, page.limit);
            let body = self.transport.fetch(self.format, &page.statement).await?;
            bodies.push(body);
        }

        reassemble(self.format, &bodies)
    }
}
