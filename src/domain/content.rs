use chrono::NaiveDateTime;
use html_escape::decode_html_entities;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Which collection a listing is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Posts,
    Pages,
}

impl ContentKind {
    /// Path segment, both in the REST API and in navigational routes.
    pub fn slug(self) -> &'static str {
        match self {
            ContentKind::Posts => "posts",
            ContentKind::Pages => "pages",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Posts => "Posts",
            ContentKind::Pages => "Pages",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "posts" => Some(ContentKind::Posts),
            "pages" => Some(ContentKind::Pages),
            _ => None,
        }
    }
}

/// A single post or page.
///
/// Posts and pages share this shape. Past normalization the content is not
/// interpreted, only displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    #[serde(default, deserialize_with = "rendered")]
    pub title: String,
    #[serde(default, deserialize_with = "rendered")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "rendered")]
    pub content: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub categories: Vec<u64>,
    #[serde(default)]
    pub tags: Vec<u64>,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Value>,
}

impl ContentItem {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: String::new(),
            excerpt: String::new(),
            content: String::new(),
            link: None,
            date: None,
            categories: Vec::new(),
            tags: Vec::new(),
            embedded: None,
        }
    }

    pub fn display_title(&self) -> String {
        let title = plain_text(&self.title);
        if title.is_empty() {
            "(Untitled)".to_string()
        } else {
            title
        }
    }

    /// Plain-text summary, preferring the excerpt over the full content.
    pub fn summary(&self) -> String {
        let excerpt = plain_text(&self.excerpt);
        if excerpt.is_empty() {
            plain_text(&self.content)
        } else {
            excerpt
        }
    }

    /// Author name from the embedded `author` entity, if the listing asked for it.
    pub fn author_name(&self) -> Option<&str> {
        self.embedded
            .as_ref()?
            .get("author")?
            .get(0)?
            .get("name")?
            .as_str()
    }

    pub fn featured_media_url(&self) -> Option<&str> {
        self.embedded
            .as_ref()?
            .get("wp:featuredmedia")?
            .get(0)?
            .get("source_url")?
            .as_str()
    }

    pub fn first_category(&self) -> Option<u64> {
        self.categories.first().copied()
    }

    pub fn first_tag(&self) -> Option<u64> {
        self.tags.first().copied()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RenderedField {
    Rendered { rendered: String },
    Plain(String),
}

/// WordPress wraps display strings as `{"rendered": "..."}`; plain strings are
/// accepted too.
fn rendered<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RenderedField>::deserialize(deserializer)? {
        Some(RenderedField::Rendered { rendered }) => rendered,
        Some(RenderedField::Plain(s)) => s,
        None => String::new(),
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse::<NaiveDateTime>().ok()))
}

/// Strip tags, decode entities and collapse whitespace.
pub fn plain_text(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        result.push(' ');
                        last_was_space = true;
                    }
                } else {
                    result.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    decode_html_entities(result.trim()).to_string()
}
