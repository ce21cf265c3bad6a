//! HTTP client for an api.bible-compatible scripture provider.
//!
//! Endpoints used:
//! - `GET /bibles`: catalog, for edition discovery by language
//! - `GET /bibles/{id}/chapters/{BOOK.C}/verses`: verse ids of a chapter
//! - `GET /bibles/{id}/verses/{BOOK.C.V}?content-type=text`: verse text
//!
//! The edition id comes from an injected `CatalogResolver`.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{clean_plain_text, CatalogResolver, ScriptureError, TextProvider};
use crate::reference::{Book, VerseId};

const API_KEY_HEADER: &str = "api-key";

fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, ScriptureError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ScriptureError::HttpClient(e.to_string()))
}

fn map_send_error(base_url: &str, e: reqwest::Error) -> ScriptureError {
    if e.is_connect() {
        ScriptureError::Connection(base_url.to_string())
    } else if e.is_timeout() {
        ScriptureError::HttpClient("Request timed out".to_string())
    } else {
        ScriptureError::HttpClient(e.to_string())
    }
}

async fn get_json<T: for<'de> Deserialize<'de>>(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, ScriptureError> {
    let response = client
        .get(url)
        .header(API_KEY_HEADER, api_key)
        .query(query)
        .send()
        .await
        .map_err(|e| map_send_error(base_url, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ScriptureError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ScriptureError::ResponseParsing(e.to_string()))
}

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct DataList<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Deserialize)]
struct DataItem<T> {
    data: T,
}

#[derive(Deserialize)]
struct BibleSummary {
    id: String,
    #[serde(default)]
    language: Option<BibleLanguage>,
}

#[derive(Deserialize)]
struct BibleLanguage {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct VerseSummary {
    id: String,
}

#[derive(Deserialize)]
struct VerseContent {
    #[serde(default)]
    content: String,
}

// ═══════════════════════════════════════════════════════════
// Catalog resolution
// ═══════════════════════════════════════════════════════════

/// Edition resolver backed by the provider's `/bibles` catalog.
///
/// A configured preferred id short-circuits discovery. Otherwise the first
/// edition whose language id or name matches `language` is used. The
/// resolved id is memoized; concurrent first resolutions may race, and
/// whichever stores first wins (they resolve to the same value).
pub struct ApiBibleCatalog {
    base_url: String,
    api_key: Option<String>,
    preferred: Option<String>,
    language: String,
    client: reqwest::Client,
    resolved: OnceLock<String>,
}

impl ApiBibleCatalog {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        preferred: Option<String>,
        language: &str,
        timeout_secs: u64,
    ) -> Result<Self, ScriptureError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            preferred,
            language: language.to_lowercase(),
            client: build_http_client(timeout_secs)?,
            resolved: OnceLock::new(),
        })
    }

    async fn discover(&self) -> Result<String, ScriptureError> {
        let api_key = self.api_key.as_deref().ok_or(ScriptureError::MissingApiKey)?;
        let url = format!("{}/bibles", self.base_url);
        let list: DataList<BibleSummary> =
            get_json(&self.client, &self.base_url, api_key, &url, &[]).await?;

        list.data
            .into_iter()
            .find(|b| {
                b.language.as_ref().is_some_and(|l| {
                    l.id.to_lowercase() == self.language || l.name.to_lowercase().contains(&self.language)
                })
            })
            .map(|b| b.id)
            .ok_or_else(|| ScriptureError::CatalogNotFound(self.language.clone()))
    }
}

#[async_trait]
impl CatalogResolver for ApiBibleCatalog {
    async fn bible_id(&self) -> Result<String, ScriptureError> {
        if let Some(id) = self.resolved.get() {
            return Ok(id.clone());
        }
        let id = match &self.preferred {
            Some(id) => id.clone(),
            None => self.discover().await?,
        };
        let _ = self.resolved.set(id.clone());
        tracing::info!(bible_id = %id, "Resolved Bible edition");
        Ok(id)
    }
}

// ═══════════════════════════════════════════════════════════
// Text provider
// ═══════════════════════════════════════════════════════════

/// Scripture text provider over HTTP.
pub struct ApiBibleClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    catalog: Arc<dyn CatalogResolver>,
}

impl ApiBibleClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        catalog: Arc<dyn CatalogResolver>,
        timeout_secs: u64,
    ) -> Result<Self, ScriptureError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: build_http_client(timeout_secs)?,
            catalog,
        })
    }

    fn api_key(&self) -> Result<&str, ScriptureError> {
        self.api_key.as_deref().ok_or(ScriptureError::MissingApiKey)
    }
}

#[async_trait]
impl TextProvider for ApiBibleClient {
    async fn list_verses(&self, book: Book, chapter: u32) -> Result<Vec<String>, ScriptureError> {
        let api_key = self.api_key()?;
        let bible_id = self.catalog.bible_id().await?;
        let url = format!(
            "{}/bibles/{}/chapters/{}.{}/verses",
            self.base_url,
            bible_id,
            book.code(),
            chapter
        );
        let list: DataList<VerseSummary> =
            get_json(&self.client, &self.base_url, api_key, &url, &[]).await?;
        Ok(list.data.into_iter().map(|v| v.id).collect())
    }

    async fn verse_text(&self, id: &VerseId) -> Result<String, ScriptureError> {
        let api_key = self.api_key()?;
        let bible_id = self.catalog.bible_id().await?;
        let url = format!("{}/bibles/{}/verses/{}", self.base_url, bible_id, id);
        let item: DataItem<VerseContent> = get_json(
            &self.client,
            &self.base_url,
            api_key,
            &url,
            &[("content-type", "text")],
        )
        .await?;
        Ok(clean_plain_text(&item.data.content))
    }

    async fn edition_id(&self) -> Option<String> {
        self.catalog.bible_id().await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn authorized(headers: &HeaderMap) -> bool {
        headers.get(API_KEY_HEADER).is_some_and(|v| v == "test-key")
    }

    /// Spawn a stub api.bible server on an ephemeral localhost port.
    async fn spawn_stub() -> SocketAddr {
        let app = Router::new()
            .route(
                "/v1/bibles",
                get(|headers: HeaderMap| async move {
                    if !authorized(&headers) {
                        return (StatusCode::UNAUTHORIZED, Json(json!({})));
                    }
                    (
                        StatusCode::OK,
                        Json(json!({ "data": [
                            { "id": "eng-01", "language": { "id": "eng", "name": "English" } },
                            { "id": "fra-01", "language": { "id": "fra", "name": "French" } }
                        ]})),
                    )
                }),
            )
            .route(
                "/v1/bibles/:bible/chapters/:chapter/verses",
                get(|Path((bible, chapter)): Path<(String, String)>| async move {
                    if bible != "fra-01" || chapter != "GEN.1" {
                        return (StatusCode::NOT_FOUND, Json(json!({})));
                    }
                    (
                        StatusCode::OK,
                        Json(json!({ "data": [
                            { "id": "GEN.1.10" }, { "id": "GEN.1.2" }, { "id": "GEN.1.1" }
                        ]})),
                    )
                }),
            )
            .route(
                "/v1/bibles/:bible/verses/:verse",
                get(|Path((_bible, verse)): Path<(String, String)>| async move {
                    let body: Value = json!({ "data": {
                        "id": verse,
                        "content": "  Au commencement   Dieu créa\n les cieux et la terre. "
                    }});
                    Json(body)
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        addr
    }

    fn base(addr: SocketAddr) -> String {
        format!("http://{addr}/v1")
    }

    #[tokio::test]
    async fn catalog_prefers_configured_id_without_network() {
        let catalog = ApiBibleCatalog::new(
            "http://127.0.0.1:9",
            None,
            Some("pref-01".into()),
            "fra",
            2,
        )
        .unwrap();
        assert_eq!(catalog.bible_id().await.unwrap(), "pref-01");
    }

    #[tokio::test]
    async fn catalog_discovers_by_language_and_memoizes() {
        let addr = spawn_stub().await;
        let catalog =
            ApiBibleCatalog::new(&base(addr), Some("test-key".into()), None, "fra", 5).unwrap();
        assert_eq!(catalog.bible_id().await.unwrap(), "fra-01");
        assert_eq!(catalog.resolved.get().map(String::as_str), Some("fra-01"));
        assert_eq!(catalog.bible_id().await.unwrap(), "fra-01");
    }

    #[tokio::test]
    async fn catalog_without_key_fails() {
        let catalog = ApiBibleCatalog::new("http://127.0.0.1:9", None, None, "fra", 2).unwrap();
        assert!(matches!(
            catalog.bible_id().await,
            Err(ScriptureError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn catalog_unknown_language_fails() {
        let addr = spawn_stub().await;
        let catalog =
            ApiBibleCatalog::new(&base(addr), Some("test-key".into()), None, "deu", 5).unwrap();
        assert!(matches!(
            catalog.bible_id().await,
            Err(ScriptureError::CatalogNotFound(_))
        ));
    }

    #[tokio::test]
    async fn client_lists_verse_ids_and_fetches_clean_text() {
        let addr = spawn_stub().await;
        let catalog = Arc::new(
            ApiBibleCatalog::new(&base(addr), Some("test-key".into()), None, "fra", 5).unwrap(),
        );
        let client = ApiBibleClient::new(&base(addr), Some("test-key".into()), catalog, 5).unwrap();

        let ids = client.list_verses(Book::Genesis, 1).await.unwrap();
        assert_eq!(ids, vec!["GEN.1.10", "GEN.1.2", "GEN.1.1"]);

        let text = client
            .verse_text(&VerseId::new(Book::Genesis, 1, 1))
            .await
            .unwrap();
        assert_eq!(text, "Au commencement Dieu créa les cieux et la terre.");
        assert_eq!(client.edition_id().await.as_deref(), Some("fra-01"));
    }

    #[tokio::test]
    async fn client_reports_status_errors() {
        let addr = spawn_stub().await;
        let catalog = Arc::new(
            ApiBibleCatalog::new("http://127.0.0.1:9", None, Some("fra-01".into()), "fra", 2).unwrap(),
        );
        let client = ApiBibleClient::new(&base(addr), Some("test-key".into()), catalog, 5).unwrap();
        let err = client.list_verses(Book::Exodus, 3).await.unwrap_err();
        assert!(matches!(err, ScriptureError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn client_reports_connection_errors() {
        let catalog = Arc::new(
            ApiBibleCatalog::new("http://127.0.0.1:9", None, Some("fra-01".into()), "fra", 2).unwrap(),
        );
        let client =
            ApiBibleClient::new("http://127.0.0.1:9", Some("k".into()), catalog, 2).unwrap();
        assert!(client.list_verses(Book::Genesis, 1).await.is_err());
    }
}
