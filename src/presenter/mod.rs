//! Presentation adapter: picks what a screen renders from its fetch state.
//!
//! Front ends (TUI, CLI) never inspect [`ViewState`] directly; they render
//! the mode chosen here.

pub mod view;

use crate::app::FetchError;
use crate::content::{HomeSummary, Listing};
use crate::domain::{ContentItem, ContentKind, PageIndexing, SiteInfo};

pub use view::{ScreenCell, SupersedePolicy, Ticket, ViewState};

const APP_TITLE: &str = "Wapp";

/// Labelled error panel for a failed content fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Which endpoints were attempted, e.g. `Posts` or `Posts/Pages`.
    pub endpoint: String,
    /// Literal `[{code}] {message}`.
    pub detail: String,
}

impl Diagnostic {
    pub fn new(endpoint: impl Into<String>, err: &FetchError) -> Self {
        Self {
            endpoint: endpoint.into(),
            detail: err.to_string(),
        }
    }

    pub fn heading(&self) -> String {
        format!("Unable to load {}", self.endpoint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub current: u32,
    pub total: u32,
    pub base_path: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl PaginationControls {
    /// Controls for a paginated listing; `None` when everything fits on one page.
    pub fn derive(paging: &PageIndexing, base_path: &str) -> Option<Self> {
        if !paging.is_paginated() {
            return None;
        }
        Some(Self {
            current: paging.current_page,
            total: paging.total_pages,
            base_path: base_path.to_string(),
            prev: paging
                .has_prev()
                .then(|| page_link(base_path, paging.current_page - 1)),
            next: paging
                .has_next()
                .then(|| page_link(base_path, paging.current_page + 1)),
        })
    }

    pub fn link(&self, page: u32) -> String {
        page_link(&self.base_path, page)
    }
}

fn page_link(base_path: &str, page: u32) -> String {
    format!("{}/{}", base_path, page)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingMode<'a> {
    /// Progress indicator plus a skeleton of `skeleton` placeholder cards.
    Loading { skeleton: usize },
    Error(Diagnostic),
    Empty,
    Content {
        items: &'a [ContentItem],
        pagination: Option<PaginationControls>,
    },
}

/// Render mode of a full listing screen.
pub fn listing_mode<'a>(
    state: &'a ViewState<Listing>,
    kind: ContentKind,
    base_path: &str,
    skeleton: usize,
) -> ListingMode<'a> {
    match state {
        ViewState::Idle | ViewState::Loading => ListingMode::Loading { skeleton },
        ViewState::Failed(err) => ListingMode::Error(Diagnostic::new(kind.label(), err)),
        ViewState::Ready(listing) if listing.items.is_empty() => ListingMode::Empty,
        ViewState::Ready(listing) => ListingMode::Content {
            items: &listing.items,
            pagination: PaginationControls::derive(&listing.paging, base_path),
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeSection<'a> {
    pub kind: ContentKind,
    pub items: &'a [ContentItem],
}

impl HomeSection<'_> {
    pub fn title(&self) -> &'static str {
        self.kind.label()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeMode<'a> {
    Loading,
    Error(Diagnostic),
    /// Only non-empty sections are listed. No pagination on the home screen.
    Content { sections: Vec<HomeSection<'a>> },
}

pub fn home_mode(state: &ViewState<HomeSummary>) -> HomeMode<'_> {
    match state {
        ViewState::Idle | ViewState::Loading => HomeMode::Loading,
        ViewState::Failed(err) => HomeMode::Error(Diagnostic::new("Posts/Pages", err)),
        ViewState::Ready(summary) => {
            let sections = [
                (ContentKind::Posts, summary.posts.as_slice()),
                (ContentKind::Pages, summary.pages.as_slice()),
            ]
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(kind, items)| HomeSection { kind, items })
            .collect();
            HomeMode::Content { sections }
        }
    }
}

/// Site-wide failure panel shown instead of any screen content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFailure {
    pub heading: &'static str,
    pub summary: &'static str,
    pub reasons_intro: &'static str,
    pub reasons: [&'static str; 3],
    pub details_heading: &'static str,
    pub details: String,
}

pub fn site_failure(err: &FetchError) -> SiteFailure {
    SiteFailure {
        heading: "Unable to Display Website",
        summary: "We've made a request to the website's JSON API (if it exists), and have not had the expected response returned.",
        reasons_intro: "This can be due to the following reasons:",
        reasons: [
            "The website you requested is not a WordPress site.",
            "The website has blocked or disabled their REST API endpoint(s).",
            "The API is behind a strict CORS policy disabling us from seeing it.",
        ],
        details_heading: "Technical Details",
        details: err.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SiteMode<'a> {
    Resolving,
    Failed(SiteFailure),
    /// Child screens may render (and fetch) only in this mode.
    Ready(&'a SiteInfo),
}

pub fn site_mode(state: &ViewState<SiteInfo>) -> SiteMode<'_> {
    match state {
        ViewState::Idle | ViewState::Loading => SiteMode::Resolving,
        ViewState::Failed(err) => SiteMode::Failed(site_failure(err)),
        ViewState::Ready(info) => SiteMode::Ready(info),
    }
}

/// Heading of a listing: the taxonomy name once known, else the kind.
pub fn listing_heading(kind: ContentKind, label: Option<&str>) -> String {
    label.unwrap_or(kind.label()).to_string()
}

pub fn picker_title() -> String {
    format!("Choose a site - {}", APP_TITLE)
}

pub fn home_title(site: &SiteInfo) -> String {
    format!("{} - {}", site.display_name(), APP_TITLE)
}

pub fn listing_title(site: &SiteInfo, kind: ContentKind) -> String {
    format!("{} {} - {}", site.display_name(), kind.label(), APP_TITLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: u64) -> Vec<ContentItem> {
        (1..=n).map(ContentItem::new).collect()
    }

    fn listing(n: u64, current: u32, total: u32) -> Listing {
        Listing {
            items: items(n),
            paging: PageIndexing {
                current_page: current,
                total_pages: total,
                total_items: n,
            },
        }
    }

    #[test]
    fn test_listing_loading_has_skeleton() {
        let state = ViewState::Loading;
        assert_eq!(
            listing_mode(&state, ContentKind::Posts, "/e.com/posts", 12),
            ListingMode::Loading { skeleton: 12 }
        );
        let idle = ViewState::Idle;
        assert!(matches!(
            listing_mode(&idle, ContentKind::Posts, "/e.com/posts", 12),
            ListingMode::Loading { .. }
        ));
    }

    #[test]
    fn test_listing_error_panel() {
        let state = ViewState::Failed(FetchError::new("rest_invalid_param", "Invalid parameter(s): tags"));
        let mode = listing_mode(&state, ContentKind::Pages, "/e.com/pages", 12);
        assert_eq!(
            mode,
            ListingMode::Error(Diagnostic {
                endpoint: "Pages".into(),
                detail: "[rest_invalid_param] Invalid parameter(s): tags".into()
            })
        );
    }

    #[test]
    fn test_listing_empty() {
        let state = ViewState::Ready(listing(0, 1, 0));
        assert_eq!(
            listing_mode(&state, ContentKind::Posts, "/e.com/posts", 12),
            ListingMode::Empty
        );
    }

    #[test]
    fn test_listing_content_with_pagination() {
        let state = ViewState::Ready(listing(12, 2, 3));
        let ListingMode::Content { items, pagination } =
            listing_mode(&state, ContentKind::Posts, "/e.com/posts/tag/4", 12)
        else {
            panic!("expected content");
        };
        assert_eq!(items.len(), 12);
        let pagination = pagination.unwrap();
        assert_eq!(pagination.current, 2);
        assert_eq!(pagination.total, 3);
        assert_eq!(pagination.prev.as_deref(), Some("/e.com/posts/tag/4/1"));
        assert_eq!(pagination.next.as_deref(), Some("/e.com/posts/tag/4/3"));
        assert_eq!(pagination.link(3), "/e.com/posts/tag/4/3");
    }

    #[test]
    fn test_single_page_has_no_pagination() {
        let state = ViewState::Ready(listing(3, 1, 1));
        let mode = listing_mode(&state, ContentKind::Posts, "/e.com/posts", 12);
        assert!(matches!(mode, ListingMode::Content { pagination: None, .. }));
    }

    #[test]
    fn test_last_page_has_no_next_link() {
        let paging = PageIndexing {
            current_page: 3,
            total_pages: 3,
            total_items: 30,
        };
        let controls = PaginationControls::derive(&paging, "/e.com/pages").unwrap();
        assert_eq!(controls.prev.as_deref(), Some("/e.com/pages/2"));
        assert_eq!(controls.next, None);
    }

    #[test]
    fn test_home_hides_empty_sections() {
        let state = ViewState::Ready(HomeSummary {
            posts: items(3),
            pages: Vec::new(),
        });
        let HomeMode::Content { sections } = home_mode(&state) else {
            panic!("expected content");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title(), "Posts");
        assert_eq!(sections[0].items.len(), 3);
    }

    #[test]
    fn test_home_error_names_both_endpoints() {
        let state: ViewState<HomeSummary> = ViewState::Failed(FetchError::new("ERR_NETWORK", "Network Error"));
        let HomeMode::Error(diagnostic) = home_mode(&state) else {
            panic!("expected error");
        };
        assert_eq!(diagnostic.endpoint, "Posts/Pages");
        assert_eq!(diagnostic.detail, "[ERR_NETWORK] Network Error");
        assert_eq!(diagnostic.heading(), "Unable to load Posts/Pages");
    }

    #[test]
    fn test_site_mode() {
        let failed: ViewState<SiteInfo> = ViewState::Failed(FetchError::new("ERR_BAD_REQUEST", "Request failed with status code 404"));
        let SiteMode::Failed(panel) = site_mode(&failed) else {
            panic!("expected failure");
        };
        assert_eq!(panel.heading, "Unable to Display Website");
        assert_eq!(panel.reasons_intro, "This can be due to the following reasons:");
        assert_eq!(panel.details_heading, "Technical Details");
        assert_eq!(panel.details, "[ERR_BAD_REQUEST] Request failed with status code 404");

        assert_eq!(site_mode(&ViewState::Loading), SiteMode::Resolving);
    }

    #[test]
    fn test_headings_and_titles() {
        assert_eq!(listing_heading(ContentKind::Posts, None), "Posts");
        assert_eq!(listing_heading(ContentKind::Posts, Some("News")), "News");

        let site = SiteInfo {
            name: "Example Blog".into(),
            ..SiteInfo::default()
        };
        assert_eq!(picker_title(), "Choose a site - Wapp");
        assert_eq!(home_title(&site), "Example Blog - Wapp");
        assert_eq!(listing_title(&site, ContentKind::Pages), "Example Blog Pages - Wapp");
        assert_eq!(home_title(&SiteInfo::default()), "Error - Wapp");
    }
}
