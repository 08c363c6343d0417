//! Turns raw API JSON into domain values.

use html_escape::decode_html_entities;
use serde_json::Value;

use crate::app::FetchError;
use crate::domain::site::UNKNOWN_SITE_NAME;
use crate::domain::{ContentItem, PageIndexing, SiteInfo, TaxonomyTerm};
use crate::fetcher::{ApiListing, RawPaging};

const PAGING_KEY: &str = "_paging";

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(|s| decode_html_entities(s).to_string())
}

/// Map an API root response to site metadata.
///
/// A missing name becomes `"N/A"`. Anything that is not an object, including
/// an empty body, still counts as success with defaulted fields.
pub fn site_info(body: &Value) -> SiteInfo {
    let empty = serde_json::Map::new();
    let map = body.as_object().unwrap_or(&empty);

    SiteInfo {
        name: string_field(map, "name").unwrap_or_else(|| UNKNOWN_SITE_NAME.to_string()),
        url: string_field(map, "url").unwrap_or_default(),
        description: string_field(map, "description").unwrap_or_default(),
        has_pages: false,
        has_posts: false,
    }
}

/// Normalize one listing response into items plus page indexing.
///
/// Pagination metadata never stays in the returned collection: an envelope's
/// `_paging` is lifted out and stray `_paging` keys on items are dropped.
pub fn listing(
    listing: ApiListing,
    current_page: u32,
) -> Result<(Vec<ContentItem>, PageIndexing), FetchError> {
    let ApiListing { body, paging } = listing;

    let (raw_items, envelope_paging) = match body {
        Value::Array(items) => (items, None),
        Value::Object(mut map) if map.get("items").is_some_and(Value::is_array) => {
            let envelope_paging = map.remove(PAGING_KEY);
            let items = match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            (items, envelope_paging)
        }
        other => {
            return Err(FetchError::new(
                "ERR_BAD_RESPONSE",
                format!("Expected a list of items, got {}", json_kind(&other)),
            ))
        }
    };

    let items = raw_items
        .into_iter()
        .map(|mut raw| {
            if let Value::Object(map) = &mut raw {
                map.remove(PAGING_KEY);
            }
            serde_json::from_value::<ContentItem>(raw)
                .map_err(|e| FetchError::new("ERR_BAD_RESPONSE", format!("Malformed item: {}", e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let paging = match (paging, envelope_paging) {
        (RawPaging { total: None, total_pages: None }, Some(envelope)) => {
            envelope_paging_fields(&envelope)
        }
        (headers, _) => headers,
    };

    let indexing = page_indexing(&paging, current_page, items.len())?;
    Ok((items, indexing))
}

fn envelope_paging_fields(envelope: &Value) -> RawPaging {
    let field = |key: &str| {
        envelope.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    };
    RawPaging {
        total: field("total"),
        total_pages: field("totalPages"),
    }
}

/// Derive page indexing from raw metadata.
///
/// No metadata at all means a single page holding what was returned; metadata
/// that is present but not numeric is an error.
pub fn page_indexing(
    paging: &RawPaging,
    current_page: u32,
    returned: usize,
) -> Result<PageIndexing, FetchError> {
    let parse = |name: &str, raw: &Option<String>| -> Result<Option<u64>, FetchError> {
        raw.as_deref()
            .map(|v| {
                v.trim().parse::<u64>().map_err(|_| {
                    FetchError::new("ERR_BAD_PAGING", format!("Invalid {} value: {:?}", name, v))
                })
            })
            .transpose()
    };

    let total = parse("total", &paging.total)?;
    let total_pages = parse("total pages", &paging.total_pages)?;

    let total_pages = match total_pages {
        Some(n) => u32::try_from(n)
            .map_err(|_| FetchError::new("ERR_BAD_PAGING", format!("Invalid total pages value: {}", n)))?,
        None => 1,
    };

    Ok(PageIndexing {
        current_page: current_page.max(1),
        total_pages,
        total_items: total.unwrap_or(returned as u64),
    })
}

pub fn term(body: &Value) -> Option<TaxonomyTerm> {
    let id = body.get("id")?.as_u64()?;
    let name = body.get("name")?.as_str()?;
    Some(TaxonomyTerm {
        id,
        name: decode_html_entities(name).to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(total: &str, pages: &str) -> RawPaging {
        RawPaging {
            total: Some(total.into()),
            total_pages: Some(pages.into()),
        }
    }

    #[test]
    fn test_site_info_maps_fields() {
        let info = site_info(&json!({
            "name": "Example &amp; Co",
            "description": "Just another site",
            "url": "https://example.com",
            "namespaces": ["wp/v2"]
        }));
        assert_eq!(info.name, "Example & Co");
        assert_eq!(info.description, "Just another site");
        assert_eq!(info.url, "https://example.com");
        assert!(!info.has_pages);
        assert!(!info.has_posts);
    }

    #[test]
    fn test_site_info_defaults_missing_name() {
        let info = site_info(&json!({"url": "https://example.com"}));
        assert_eq!(info.name, "N/A");
        assert_eq!(info.description, "");
    }

    #[test]
    fn test_site_info_from_empty_body() {
        let info = site_info(&Value::Null);
        assert_eq!(info.name, "N/A");
        assert!(info.url.is_empty());
    }

    #[test]
    fn test_listing_reads_headers() {
        let body = json!([{"id": 1}, {"id": 2}]);
        let (items, paging) = listing(
            ApiListing {
                body,
                paging: headers("26", "3"),
            },
            2,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(
            paging,
            PageIndexing {
                current_page: 2,
                total_pages: 3,
                total_items: 26
            }
        );
    }

    #[test]
    fn test_listing_without_headers_is_single_page() {
        let (items, paging) = listing(
            ApiListing {
                body: json!([{"id": 1}]),
                paging: RawPaging::default(),
            },
            1,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(paging.total_pages, 1);
        assert_eq!(paging.total_items, 1);
    }

    #[test]
    fn test_listing_lifts_envelope_paging() {
        let body = json!({
            "items": [{"id": 1}, {"id": 2, "_paging": {"total": 9}}],
            "_paging": {"total": 14, "totalPages": 2}
        });
        let (items, paging) = listing(
            ApiListing {
                body,
                paging: RawPaging::default(),
            },
            1,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(paging.total_pages, 2);
        assert_eq!(paging.total_items, 14);
    }

    #[test]
    fn test_listing_rejects_malformed_paging() {
        let err = listing(
            ApiListing {
                body: json!([]),
                paging: headers("ten", "1"),
            },
            1,
        )
        .unwrap_err();
        assert_eq!(err.code, "ERR_BAD_PAGING");
    }

    #[test]
    fn test_listing_rejects_non_list_body() {
        let err = listing(
            ApiListing {
                body: json!({"code": "oops"}),
                paging: RawPaging::default(),
            },
            1,
        )
        .unwrap_err();
        assert_eq!(err.code, "ERR_BAD_RESPONSE");
        assert!(err.message.contains("an object"));
    }

    #[test]
    fn test_listing_rejects_malformed_item() {
        let err = listing(
            ApiListing {
                body: json!([{"title": "no id"}]),
                paging: RawPaging::default(),
            },
            1,
        )
        .unwrap_err();
        assert_eq!(err.code, "ERR_BAD_RESPONSE");
    }

    #[test]
    fn test_empty_listing_is_success() {
        let (items, paging) = listing(
            ApiListing {
                body: json!([]),
                paging: headers("0", "0"),
            },
            1,
        )
        .unwrap();
        assert!(items.is_empty());
        assert_eq!(paging.total_pages, 0);
    }

    #[test]
    fn test_term() {
        let term = term(&json!({"id": 5, "name": "News &amp; Views", "slug": "news"})).unwrap();
        assert_eq!(term.id, 5);
        assert_eq!(term.name, "News & Views");
        assert!(super::term(&json!({"code": "rest_term_invalid"})).is_none());
    }
}
