use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::app::FetchError;
use crate::config::ApiConfig;
use crate::domain::TaxonomyKind;
use crate::fetcher::{ApiListing, ContentApi, FetchResult, ListQuery, RawPaging};

const TOTAL_HEADER: &str = "x-wp-total";
const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// reqwest-backed WordPress REST client for a single site.
pub struct HttpContentApi {
    client: Client,
    root: Url,
}

impl HttpContentApi {
    /// Client for `{scheme}://{hostname}/wp-json`.
    pub fn new(hostname: &str, settings: &ApiConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| transport_error(&e))?;

        let root = api_root(&settings.scheme, hostname)?;
        Ok(Self { client, root })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    async fn get(&self, url: Url, errors: ErrorBody) -> FetchResult<(HeaderMap, Value)> {
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| transport_error(&e))?;

        if !status.is_success() {
            return Err(match errors {
                ErrorBody::WordPress => status_error(status, &body),
                ErrorBody::Ignored => generic_status_error(status),
            });
        }

        Ok((headers, decode_body(&body)?))
    }
}

/// How the body of a non-2xx response is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorBody {
    /// Use a WordPress `{code, message}` error object when present.
    WordPress,
    /// Report the status only.
    Ignored,
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn discover(&self) -> FetchResult<Value> {
        // Discovery reports the bare HTTP failure even when the site sent a
        // WordPress error object.
        let (_, body) = self.get(self.root.clone(), ErrorBody::Ignored).await?;
        Ok(body)
    }

    async fn list(&self, query: &ListQuery) -> FetchResult<ApiListing> {
        let url = query.endpoint(&self.root)?;
        let (headers, body) = self.get(url, ErrorBody::WordPress).await?;

        let header = |name: &str| {
            headers
                .get(name)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        };

        Ok(ApiListing {
            body,
            paging: RawPaging {
                total: header(TOTAL_HEADER),
                total_pages: header(TOTAL_PAGES_HEADER),
            },
        })
    }

    async fn term(&self, kind: TaxonomyKind, id: u64) -> FetchResult<Value> {
        let raw = format!(
            "{}/wp/v2/{}/{}",
            self.root.as_str().trim_end_matches('/'),
            kind.collection(),
            id
        );
        let url = Url::parse(&raw).map_err(|e| FetchError::new("ERR_INVALID_URL", e.to_string()))?;
        let (_, body) = self.get(url, ErrorBody::WordPress).await?;
        Ok(body)
    }
}

/// `{scheme}://{hostname}/wp-json`. The hostname may carry a sub-directory.
pub fn api_root(scheme: &str, hostname: &str) -> FetchResult<Url> {
    let hostname = hostname.trim().trim_end_matches('/');
    if hostname.is_empty() {
        return Err(FetchError::new("ERR_INVALID_URL", "Hostname is empty"));
    }
    Url::parse(&format!("{}://{}/wp-json", scheme, hostname))
        .map_err(|e| FetchError::new("ERR_INVALID_URL", format!("Invalid hostname {}: {}", hostname, e)))
}

fn transport_error(err: &reqwest::Error) -> FetchError {
    let code = if err.is_timeout() {
        "ETIMEDOUT"
    } else if err.is_connect() {
        "ECONNREFUSED"
    } else if err.is_builder() {
        "ERR_BAD_REQUEST"
    } else if err.is_decode() || err.is_body() {
        "ERR_BAD_RESPONSE"
    } else {
        "ERR_NETWORK"
    };
    FetchError::new(code, err.to_string())
}

/// Error for a non-2xx response.
///
/// WordPress answers failures with `{"code": ..., "message": ...}`; those are
/// passed through verbatim. Anything else gets a generic status message.
pub fn status_error(status: StatusCode, body: &[u8]) -> FetchError {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        let code = match map.get("code") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let message = map.get("message").and_then(Value::as_str);
        if let (Some(code), Some(message)) = (code, message) {
            return FetchError::new(code, message);
        }
    }

    generic_status_error(status)
}

/// `ERR_BAD_REQUEST` for 4xx, `ERR_BAD_RESPONSE` for 5xx.
pub fn generic_status_error(status: StatusCode) -> FetchError {
    let code = if status.is_server_error() {
        "ERR_BAD_RESPONSE"
    } else {
        "ERR_BAD_REQUEST"
    };
    FetchError::new(
        code,
        format!("Request failed with status code {}", status.as_u16()),
    )
}

/// Decode a successful body. An empty body reads as `null`.
pub fn decode_body(body: &[u8]) -> FetchResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| FetchError::new("ERR_BAD_RESPONSE", format!("Response is not valid JSON: {}", e)))
}
