//! Scripted `ContentApi` doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use wapp::app::{AppContext, FetchError, SiteSession};
use wapp::config::Config;
use wapp::domain::{ContentKind, Filter, TaxonomyKind};
use wapp::fetcher::{ApiListing, ContentApi, FetchResult, ListQuery, RawPaging};
use wapp::tui::app::TuiApp;
use wapp::tui::event::Message;

/// Answers every call from a fixed script and records what was asked.
pub struct ScriptedApi {
    pub site: FetchResult<Value>,
    pub listings: HashMap<(ContentKind, Filter), FetchResult<ApiListing>>,
    pub terms: HashMap<(TaxonomyKind, u64), FetchResult<Value>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new(site: FetchResult<Value>) -> Self {
        Self {
            site,
            listings: HashMap::new(),
            terms: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_listing(
        mut self,
        kind: ContentKind,
        filter: Filter,
        result: FetchResult<ApiListing>,
    ) -> Self {
        self.listings.insert((kind, filter), result);
        self
    }

    pub fn with_term(mut self, kind: TaxonomyKind, id: u64, result: FetchResult<Value>) -> Self {
        self.terms.insert((kind, id), result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ContentApi for ScriptedApi {
    async fn discover(&self) -> FetchResult<Value> {
        self.record("discover".into());
        self.site.clone()
    }

    async fn list(&self, query: &ListQuery) -> FetchResult<ApiListing> {
        self.record(format!(
            "list {} {:?} page={} per_page={}",
            query.kind.slug(),
            query.filter,
            query.page,
            query.per_page
        ));
        self.listings
            .get(&(query.kind, query.filter))
            .cloned()
            .unwrap_or_else(|| Ok(api_listing(Vec::new(), None)))
    }

    async fn term(&self, kind: TaxonomyKind, id: u64) -> FetchResult<Value> {
        self.record(format!("term {} {}", kind.slug(), id));
        self.terms
            .get(&(kind, id))
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }
}

/// Listing double whose responses are released by the test, one page at a time.
pub struct GatedApi {
    gates: Mutex<HashMap<u32, oneshot::Receiver<FetchResult<ApiListing>>>>,
}

impl GatedApi {
    pub fn new(pages: &[u32]) -> (Self, HashMap<u32, oneshot::Sender<FetchResult<ApiListing>>>) {
        let mut gates = HashMap::new();
        let mut senders = HashMap::new();
        for page in pages {
            let (tx, rx) = oneshot::channel();
            gates.insert(*page, rx);
            senders.insert(*page, tx);
        }
        (
            Self {
                gates: Mutex::new(gates),
            },
            senders,
        )
    }
}

#[async_trait]
impl ContentApi for GatedApi {
    async fn discover(&self) -> FetchResult<Value> {
        Ok(site_root("Gated"))
    }

    async fn list(&self, query: &ListQuery) -> FetchResult<ApiListing> {
        let gate = self.gates.lock().unwrap().remove(&query.page);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::new("ERR_CANCELED", "gate dropped"))),
            None => Err(not_found()),
        }
    }

    async fn term(&self, _kind: TaxonomyKind, _id: u64) -> FetchResult<Value> {
        Err(not_found())
    }
}

pub fn not_found() -> FetchError {
    FetchError::new("ERR_BAD_REQUEST", "Request failed with status code 404")
}

pub fn site_root(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Just another WordPress site",
        "url": "https://example.com",
        "home": "https://example.com",
        "namespaces": ["wp/v2"]
    })
}

pub fn post(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "date": "2024-03-01T10:00:00",
        "link": format!("https://example.com/?p={}", id),
        "title": { "rendered": title },
        "excerpt": { "rendered": format!("<p>About {}</p>", title) },
        "content": { "rendered": format!("<p>{} body</p>", title) },
        "categories": [5],
        "tags": [],
        "_embedded": { "author": [{ "name": "Ada" }] }
    })
}

pub fn api_listing(items: Vec<Value>, pages: Option<(u64, u32)>) -> ApiListing {
    ApiListing {
        body: Value::Array(items),
        paging: match pages {
            Some((total, total_pages)) => RawPaging {
                total: Some(total.to_string()),
                total_pages: Some(total_pages.to_string()),
            },
            None => RawPaging::default(),
        },
    }
}

pub fn session(api: Arc<dyn ContentApi + Send + Sync>) -> SiteSession {
    AppContext::new(Config::default()).session_with_api("example.com", api)
}

/// Run the app's requests to completion, in issue order, including follow-ups.
pub async fn drain(app: &mut TuiApp, requests: Vec<wapp::tui::event::Request>) {
    let mut queue: std::collections::VecDeque<_> = requests.into();
    while let Some(request) = queue.pop_front() {
        let session = app.session.clone().expect("site session");
        let payload = wapp::tui::perform(&session, request).await;
        let follow_up = app.apply(Message {
            visit: app.visit,
            payload,
        });
        queue.extend(follow_up);
    }
}
