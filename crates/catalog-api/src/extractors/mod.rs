//! Axum extractors for request handling
//!
//! Custom extractors for path ids, paging parameters and validated bodies.

mod pagination;
mod path;
mod validated;

pub use pagination::{PageParams, Pagination};
pub use path::IdPath;
pub use validated::ValidatedJson;
