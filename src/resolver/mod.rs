//! Site resolution: one discovery request per hostname.

pub mod taxonomy;

use crate::app::FetchError;
use crate::domain::SiteInfo;
use crate::fetcher::SharedApi;
use crate::normalizer;

pub use taxonomy::TaxonomyLabels;

pub struct SiteResolver {
    api: SharedApi,
}

impl SiteResolver {
    pub fn new(api: SharedApi) -> Self {
        Self { api }
    }

    /// Query the API root once and map it to [`SiteInfo`].
    ///
    /// On failure no partial record is produced; the caller keeps (or resets
    /// to) `SiteInfo::default()`. Never retried.
    pub async fn resolve(&self) -> Result<SiteInfo, FetchError> {
        match self.api.discover().await {
            Ok(body) => {
                let info = normalizer::site_info(&body);
                tracing::info!(name = %info.name, "Resolved site");
                Ok(info)
            }
            Err(e) => {
                tracing::warn!("Site discovery failed: {}", e);
                Err(e)
            }
        }
    }
}
