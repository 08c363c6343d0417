use std::sync::Arc;

use crate::app::FetchError;
use crate::config::Config;
use crate::content::ContentFetcher;
use crate::fetcher::{HttpContentApi, SharedApi};
use crate::presenter::SupersedePolicy;
use crate::resolver::{SiteResolver, TaxonomyLabels};

pub struct AppContext {
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn policy(&self) -> SupersedePolicy {
        self.config.api.policy
    }

    /// Build the per-site services for `hostname` over the real HTTP client.
    ///
    /// A hostname that cannot form a URL fails here with the same error shape
    /// as a failed discovery request.
    pub fn session(&self, hostname: &str) -> Result<SiteSession, FetchError> {
        let api: SharedApi = Arc::new(HttpContentApi::new(hostname, &self.config.api)?);
        Ok(self.session_with_api(hostname, api))
    }

    pub fn session_with_api(&self, hostname: &str, api: SharedApi) -> SiteSession {
        SiteSession::new(hostname, api, &self.config)
    }
}

/// Everything bound to one hostname.
///
/// The API client is created once per hostname and shared by the resolver,
/// the content fetcher and the label lookups of every screen.
#[derive(Clone)]
pub struct SiteSession {
    pub hostname: String,
    pub api: SharedApi,
    pub resolver: Arc<SiteResolver>,
    pub content: ContentFetcher,
    pub labels: Arc<TaxonomyLabels>,
}

impl SiteSession {
    pub fn new(hostname: &str, api: SharedApi, config: &Config) -> Self {
        Self {
            hostname: hostname.trim().trim_matches('/').to_string(),
            resolver: Arc::new(SiteResolver::new(api.clone())),
            content: ContentFetcher::from_config(api.clone(), &config.api),
            labels: Arc::new(TaxonomyLabels::new(api.clone())),
            api,
        }
    }
}
