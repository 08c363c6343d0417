use serde::{Deserialize, Serialize};

/// Placeholder shown when the API root does not report a site name.
pub const UNKNOWN_SITE_NAME: &str = "N/A";

/// Basic metadata of a resolved site.
///
/// The default value means "unresolved". A `SiteInfo` is always replaced as a
/// whole, never patched field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub url: String,
    pub description: String,
    pub has_pages: bool,
    pub has_posts: bool,
}

impl SiteInfo {
    /// Name used in window titles; unresolved sites read as "Error".
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Error"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_site_reads_as_error() {
        let info = SiteInfo::default();
        assert_eq!(info.display_name(), "Error");
    }

    #[test]
    fn test_named_site_display_name() {
        let info = SiteInfo {
            name: "Example Blog".into(),
            ..SiteInfo::default()
        };
        assert_eq!(info.display_name(), "Example Blog");
    }
}
