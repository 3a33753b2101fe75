mod client;
mod errors;
mod query;
pub mod types;
mod user_agent;
pub use self::client::{encode_query, Client, Transport};
pub use self::errors::Error;
pub use self::query::{build_query, divide, FilterSet, InvalidField, Page, MAX_ROWS, PAGE_LIMIT};
