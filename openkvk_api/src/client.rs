//! HTTP client for the OpenKVK query API.

use std::future::Future;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::{types::ResponseFormat, user_agent::get_user_agent, Error};

/// Characters the service's statement parser needs to see unescaped.
///
/// The backtick is not in this list: `Url` always escapes it in http paths,
/// so it is encoded here and the path that goes out matches this output.
const STATEMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*')
    .remove(b';')
    .remove(b'%')
    .remove(b'\'')
    .remove(b'=')
    .remove(b'&');

/// Encodes a statement for use as the final path segment of a request.
///
/// Double quotes become single quotes first, since string literals on the
/// service are single-quoted.
pub fn encode_query(query: &str) -> String {
    let query = query.replace('"', "'");
    utf8_percent_encode(&query, STATEMENT).to_string()
}

/// Anything that can run one bounded statement and hand back the raw body.
pub trait Transport {
    fn fetch(
        &self,
        format: ResponseFormat,
        query: &str,
    ) -> impl Future<Output = Result<String, Error>> + Send;
}

/// HTTP client for the OpenKVK query API.
///
/// Each request builds a fresh `reqwest::Client` with a randomized user agent
/// and a 30-second timeout.
pub struct Client {
    /// Base URL for the API. Defaults to `http://api.openkvk.nl`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production OpenKVK API.
    pub fn new() -> Self {
        Self {
            base_api_url: "http://api.openkvk.nl".to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, format: ResponseFormat, query: &str) -> Result<Url, Error> {
        let raw = format!(
            "{}/{}/{}",
            &self.base_api_url,
            format.segment(),
            encode_query(query)
        );
        Url::parse(&raw).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })
    }

    async fn get(&self, url: Url) -> Result<String, Error> {
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json, text/csv, text/plain, */*")
            .header("accept-language", "nl-NL,nl;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }
}

impl Transport for Client {
    async fn fetch(&self, format: ResponseFormat, query: &str) -> Result<String, Error> {
        let url = self.get_url(format, query)?;
        tracing::debug!("GET {}", url);
        self.get(url).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_spaces_keeps_star_and_semicolon() {
        assert_eq!(encode_query("SELECT * FROM KVK;"), "SELECT%20*%20FROM%20KVK;");
    }

    #[test]
    fn keeps_single_quotes_and_equals() {
        assert_eq!(
            encode_query("SELECT * FROM KVK WHERE naam = 'something'"),
            "SELECT%20*%20FROM%20KVK%20WHERE%20naam%20=%20'something'"
        );
    }

    #[test]
    fn double_quotes_become_single_quotes() {
        assert_eq!(
            encode_query("SELECT * FROM KVK WHERE naam = \"something\""),
            "SELECT%20*%20FROM%20KVK%20WHERE%20naam%20=%20'something'"
        );
    }

    #[test]
    fn keeps_like_wildcards_and_ampersand() {
        assert_eq!(
            encode_query("WHERE `bedrijfsnaam` ILIKE '%kinkr%' & x"),
            "WHERE%20%60bedrijfsnaam%60%20ILIKE%20'%kinkr%'%20&%20x"
        );
    }

    #[test]
    fn tilde_is_encoded() {
        assert_eq!(encode_query("a~b"), "a%7Eb");
    }

    #[test]
    fn request_path_is_the_encoded_statement() {
        let client = Client::with_base_url("http://localhost:1234");
        let statement =
            "SELECT `bedrijfsnaam` FROM kvk WHERE naam ILIKE '%a%' AND x = 1 & y; LIMIT 1 OFFSET 0;";
        let url = client.get_url(ResponseFormat::Json, statement).unwrap();
        assert_eq!(url.path(), format!("/json/{}", encode_query(statement)));
        assert!(url.path().contains("%60bedrijfsnaam%60"));
        assert!(url.path().contains("'%a%'"));
    }

    #[test]
    fn encodes_commas_and_parens() {
        assert_eq!(
            encode_query("SELECT a,b FROM kvk WHERE isnull(status)"),
            "SELECT%20a%2Cb%20FROM%20kvk%20WHERE%20isnull%28status%29"
        );
    }

    #[test]
    fn encodes_non_ascii_as_utf8() {
        assert_eq!(encode_query("Café"), "Caf%C3%A9");
    }

    #[test]
    fn url_is_segmented_by_format() {
        let client = Client::with_base_url("http://localhost:1234/");
        let url = client
            .get_url(ResponseFormat::Csv, "SELECT * FROM kvk LIMIT 1 OFFSET 0;")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1234/csv/SELECT%20*%20FROM%20kvk%20LIMIT%201%20OFFSET%200;"
        );
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "a".repeat(2500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(out.len(), 2000 + "...[truncated]".len());
    }
}
