//! Paginated post/page retrieval.

use crate::app::FetchError;
use crate::config::ApiConfig;
use crate::domain::{ContentItem, ContentKind, Filter, PageIndexing};
use crate::fetcher::{ListQuery, SharedApi};
use crate::normalizer;

/// Items per page on listing screens.
pub const LISTING_PAGE_SIZE: u32 = 12;

/// Items per section on the home screen.
pub const HOME_PAGE_SIZE: u32 = 3;

/// One successfully fetched listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub items: Vec<ContentItem>,
    pub paging: PageIndexing,
}

/// Latest posts and pages shown on a site's home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSummary {
    pub posts: Vec<ContentItem>,
    pub pages: Vec<ContentItem>,
}

#[derive(Clone)]
pub struct ContentFetcher {
    api: SharedApi,
    listing_page_size: u32,
    home_page_size: u32,
}

impl ContentFetcher {
    pub fn new(api: SharedApi) -> Self {
        Self {
            api,
            listing_page_size: LISTING_PAGE_SIZE,
            home_page_size: HOME_PAGE_SIZE,
        }
    }

    pub fn from_config(api: SharedApi, settings: &ApiConfig) -> Self {
        Self {
            api,
            listing_page_size: settings.listing_page_size,
            home_page_size: settings.home_page_size,
        }
    }

    pub fn listing_page_size(&self) -> u32 {
        self.listing_page_size
    }

    pub fn listing_query(&self, kind: ContentKind, filter: Filter, page: u32) -> ListQuery {
        ListQuery::new(kind, filter, page, self.listing_page_size)
    }

    /// Fetch one listing page. Exactly one request, no caching, no retry.
    pub async fn fetch(&self, kind: ContentKind, filter: Filter, page: u32) -> Result<Listing, FetchError> {
        let query = self.listing_query(kind, filter, page);
        let listing = self.run(&query).await?;
        tracing::info!(
            "Fetched {} {} (page {}/{})",
            listing.items.len(),
            kind.slug(),
            listing.paging.current_page,
            listing.paging.total_pages
        );
        Ok(listing)
    }

    /// Fetch the home summary: posts and pages concurrently.
    ///
    /// Both requests must succeed; the first failure becomes the result.
    pub async fn home(&self) -> Result<HomeSummary, FetchError> {
        let posts = ListQuery::new(ContentKind::Posts, Filter::None, 1, self.home_page_size);
        let pages = ListQuery::new(ContentKind::Pages, Filter::None, 1, self.home_page_size);

        let (posts, pages) = futures::try_join!(self.run(&posts), self.run(&pages))?;

        Ok(HomeSummary {
            posts: posts.items,
            pages: pages.items,
        })
    }

    async fn run(&self, query: &ListQuery) -> Result<Listing, FetchError> {
        let raw = self.api.list(query).await.inspect_err(|e| {
            tracing::warn!("Listing {} failed: {}", query.kind.slug(), e);
        })?;
        let (items, paging) = normalizer::listing(raw, query.page)?;
        Ok(Listing { items, paging })
    }
}
