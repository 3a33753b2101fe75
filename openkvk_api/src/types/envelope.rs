use serde::Deserialize;
use serde_json::Value;

/// One element of the service's JSON response array.
#[derive(Deserialize, Debug)]
pub struct Envelope {
    #[serde(rename = "RESULT")]
    pub result: ResultSet,
}

/// Column names plus positional rows for one page of results.
#[derive(Deserialize, Debug, Default)]
pub struct ResultSet {
    #[serde(rename = "TYPES", default)]
    pub types: Vec<String>,
    #[serde(rename = "HEADER")]
    pub header: Vec<String>,
    #[serde(rename = "ROWS", default)]
    pub rows: Vec<Vec<Value>>,
}

/// The full body returned by the `json` endpoint.
pub type Payload = Vec<Envelope>;
