//! The upstream content-API seam.
//!
//! Everything above this module talks to a [`ContentApi`]; the reqwest
//! implementation lives in [`http_fetcher`], tests substitute scripted
//! doubles.

pub mod http_fetcher;
pub mod query;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::FetchError;
use crate::domain::TaxonomyKind;

pub use http_fetcher::HttpContentApi;
pub use query::ListQuery;

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// One client per resolved hostname, shared by every screen of that site.
pub type SharedApi = Arc<dyn ContentApi + Send + Sync>;

/// Raw pagination headers (`X-WP-Total`, `X-WP-TotalPages`) of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPaging {
    pub total: Option<String>,
    pub total_pages: Option<String>,
}

/// Undecoded listing response: the JSON body plus its paging headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiListing {
    pub body: Value,
    pub paging: RawPaging,
}

#[async_trait]
pub trait ContentApi {
    /// GET of the API root (site name, description, url).
    async fn discover(&self) -> FetchResult<Value>;

    /// One page of posts or pages.
    async fn list(&self, query: &ListQuery) -> FetchResult<ApiListing>;

    /// A single category or tag.
    async fn term(&self, kind: TaxonomyKind, id: u64) -> FetchResult<Value>;
}
