use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    Category,
    Tag,
}

impl TaxonomyKind {
    /// Route segment (`category`, `tag`).
    pub fn slug(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "category",
            TaxonomyKind::Tag => "tag",
        }
    }

    /// REST collection and listing query parameter (`categories`, `tags`).
    pub fn collection(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "categories",
            TaxonomyKind::Tag => "tags",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "category" => Some(TaxonomyKind::Category),
            "tag" => Some(TaxonomyKind::Tag),
            _ => None,
        }
    }
}

/// A category or tag, only ever used to turn an id into a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    pub id: u64,
    pub name: String,
}

/// Optional taxonomy restriction on a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    None,
    Category(u64),
    Tag(u64),
}

impl Filter {
    pub fn new(kind: TaxonomyKind, id: u64) -> Self {
        match kind {
            TaxonomyKind::Category => Filter::Category(id),
            TaxonomyKind::Tag => Filter::Tag(id),
        }
    }

    pub fn term(self) -> Option<(TaxonomyKind, u64)> {
        match self {
            Filter::None => None,
            Filter::Category(id) => Some((TaxonomyKind::Category, id)),
            Filter::Tag(id) => Some((TaxonomyKind::Tag, id)),
        }
    }
}
