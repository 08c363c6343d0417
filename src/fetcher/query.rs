use url::Url;

use crate::app::FetchError;
use crate::domain::{ContentKind, Filter};

/// One of the six listing shapes: {posts, pages} x {none, category, tag}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub kind: ContentKind,
    pub filter: Filter,
    pub page: u32,
    pub per_page: u32,
    pub embed: bool,
}

impl ListQuery {
    pub fn new(kind: ContentKind, filter: Filter, page: u32, per_page: u32) -> Self {
        Self {
            kind,
            filter,
            page: page.max(1),
            per_page,
            embed: true,
        }
    }

    /// Full request URL below the API root, e.g.
    /// `https://example.com/wp-json/wp/v2/posts?tags=3&per_page=12&page=2&_embed`.
    pub fn endpoint(&self, api_root: &Url) -> Result<Url, FetchError> {
        let raw = format!(
            "{}/wp/v2/{}",
            api_root.as_str().trim_end_matches('/'),
            self.kind.slug()
        );
        let mut url = Url::parse(&raw).map_err(|e| FetchError::new("ERR_INVALID_URL", e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            if let Some((tax, id)) = self.filter.term() {
                pairs.append_pair(tax.collection(), &id.to_string());
            }
            pairs.append_pair("per_page", &self.per_page.to_string());
            pairs.append_pair("page", &self.page.to_string());
            if self.embed {
                pairs.append_key_only("_embed");
            }
        }

        Ok(url)
    }
}
