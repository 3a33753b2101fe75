mod page;
pub use self::page::{divide, Page, MAX_ROWS, PAGE_LIMIT};

mod filter;
pub use self::filter::{build_query, FilterSet, InvalidField};
