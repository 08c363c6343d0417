pub mod content;
pub mod paging;
pub mod route;
pub mod site;
pub mod taxonomy;

pub use content::{plain_text, ContentItem, ContentKind};
pub use paging::PageIndexing;
pub use route::{listing_base_path, parse_id, parse_page, Route, Screen};
pub use site::SiteInfo;
pub use taxonomy::{Filter, TaxonomyKind, TaxonomyTerm};
