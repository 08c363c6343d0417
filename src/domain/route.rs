//! Navigational parameters and their coercion rules.
//!
//! Routes look like the paths of the web client this tool mirrors:
//! `host`, `host/posts`, `host/pages/2`, `host/posts/category/5`,
//! `host/posts/tag/3/2`.

use std::fmt;

use crate::app::{Result, WappError};
use crate::domain::{ContentKind, Filter, TaxonomyKind};

/// Parse the leading integer of a route parameter.
///
/// Mirrors integer-prefix parsing: `"12"` and `" 12abc"` give 12, while
/// `"abc"` or an empty string give nothing.
fn leading_integer(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Page number parameter; absent, non-numeric or zero means page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(leading_integer)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}

/// Taxonomy id parameter; absent or non-numeric means 0.
///
/// An id of 0 is passed through to the remote API as-is.
pub fn parse_id(raw: Option<&str>) -> u64 {
    raw.and_then(leading_integer).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Listing {
        kind: ContentKind,
        filter: Filter,
        page: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub hostname: String,
    pub screen: Screen,
}

impl Route {
    pub fn home(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            screen: Screen::Home,
        }
    }

    pub fn listing(hostname: impl Into<String>, kind: ContentKind, filter: Filter, page: u32) -> Self {
        Self {
            hostname: hostname.into(),
            screen: Screen::Listing {
                kind,
                filter,
                page: page.max(1),
            },
        }
    }

    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let Some((hostname, rest)) = segments.split_first() else {
            return Err(WappError::InvalidRoute(path.to_string()));
        };

        let screen = match rest {
            [] => Screen::Home,
            [kind, tail @ ..] => {
                let kind = ContentKind::from_slug(kind)
                    .ok_or_else(|| WappError::InvalidRoute(path.to_string()))?;
                match tail {
                    [] => Screen::Listing {
                        kind,
                        filter: Filter::None,
                        page: 1,
                    },
                    [tax, more @ ..] if TaxonomyKind::from_slug(tax).is_some() => {
                        let tax = TaxonomyKind::from_slug(tax)
                            .ok_or_else(|| WappError::InvalidRoute(path.to_string()))?;
                        let (id, page) = match more {
                            [] => (None, None),
                            [id] => (Some(*id), None),
                            [id, page] => (Some(*id), Some(*page)),
                            _ => return Err(WappError::InvalidRoute(path.to_string())),
                        };
                        Screen::Listing {
                            kind,
                            filter: Filter::new(tax, parse_id(id)),
                            page: parse_page(page),
                        }
                    }
                    [page] => Screen::Listing {
                        kind,
                        filter: Filter::None,
                        page: parse_page(Some(*page)),
                    },
                    _ => return Err(WappError::InvalidRoute(path.to_string())),
                }
            }
        };

        Ok(Self {
            hostname: hostname.to_string(),
            screen,
        })
    }

    /// Canonical path of this route, with a leading slash.
    pub fn path(&self) -> String {
        match self.screen {
            Screen::Home => format!("/{}", self.hostname),
            Screen::Listing { kind, filter, page } => {
                let mut path = listing_base_path(&self.hostname, kind, filter);
                if page > 1 {
                    path.push_str(&format!("/{}", page));
                }
                path
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Base path that pagination links for a listing are built on.
pub fn listing_base_path(hostname: &str, kind: ContentKind, filter: Filter) -> String {
    match filter.term() {
        None => format!("/{}/{}", hostname, kind.slug()),
        Some((tax, id)) => format!("/{}/{}/{}/{}", hostname, kind.slug(), tax.slug(), id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_defaults() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some(" 4x")), 4);
    }

    #[test]
    fn test_parse_id_defaults() {
        assert_eq!(parse_id(None), 0);
        assert_eq!(parse_id(Some("tag")), 0);
        assert_eq!(parse_id(Some("17")), 17);
    }

    #[test]
    fn test_parse_home() {
        let route = Route::parse("/example.com").unwrap();
        assert_eq!(route, Route::home("example.com"));
    }

    #[test]
    fn test_parse_listing_with_page() {
        let route = Route::parse("example.com/pages/2").unwrap();
        assert_eq!(
            route.screen,
            Screen::Listing {
                kind: ContentKind::Pages,
                filter: Filter::None,
                page: 2
            }
        );
    }

    #[test]
    fn test_parse_filtered_listing() {
        let route = Route::parse("/example.com/posts/tag/3/2/").unwrap();
        assert_eq!(
            route,
            Route::listing("example.com", ContentKind::Posts, Filter::Tag(3), 2)
        );
    }

    #[test]
    fn test_parse_non_numeric_filter_id_is_zero() {
        let route = Route::parse("example.com/posts/category/news").unwrap();
        assert_eq!(
            route.screen,
            Screen::Listing {
                kind: ContentKind::Posts,
                filter: Filter::Category(0),
                page: 1
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_segments() {
        assert!(Route::parse("").is_err());
        assert!(Route::parse("example.com/comments").is_err());
        assert!(Route::parse("example.com/posts/category/1/2/3").is_err());
        assert!(Route::parse("example.com/posts/2/3").is_err());
    }

    #[test]
    fn test_path_round_trips() {
        for path in [
            "/example.com",
            "/example.com/posts",
            "/example.com/pages/4",
            "/example.com/posts/category/5",
            "/example.com/pages/tag/9/2",
        ] {
            assert_eq!(Route::parse(path).unwrap().path(), path);
        }
    }

    #[test]
    fn test_listing_base_path() {
        assert_eq!(
            listing_base_path("example.com", ContentKind::Posts, Filter::None),
            "/example.com/posts"
        );
        assert_eq!(
            listing_base_path("example.com", ContentKind::Pages, Filter::Category(5)),
            "/example.com/pages/category/5"
        );
    }
}
