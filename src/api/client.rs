use reqwest::header::AUTHORIZATION;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::config::ApiConfig;
use crate::state::data::SearchPage;

/// Photos requested per page
const PER_PAGE: u32 = 12;

/// Thin wrapper around `reqwest::Client` for the Pexels search API.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct PexelsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PexelsClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pexels-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        if config.key.is_empty() {
            warn!("No Pexels API key configured; searches will be rejected");
        }

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.key.clone(),
        })
    }

    /// Fetch one page of results for `query`
    ///
    /// The query is forwarded as-is, empty strings included.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ApiError> {
        let url = format!("{}/search", self.base_url);
        debug!(%query, page, per_page = PER_PAGE, "GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("per_page", PER_PAGE.to_string()),
            ])
            .header(AUTHORIZATION, &self.api_key)
            .send()
            .await
            .map_err(|e| ApiError::request(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| ApiError::decode(&url, e))
    }

    /// Fetch the raw bytes behind an image URL taken from a search result.
    ///
    /// Image hosts are public, so no credential is attached.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::request(url, e))?;
        Ok(bytes.to_vec())
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::test_server::serve;
    use super::*;
    use crate::config::Config;

    #[derive(Debug, Clone)]
    struct Seen {
        params: HashMap<String, String>,
        auth: Option<String>,
    }

    type Log = Arc<Mutex<Vec<Seen>>>;

    async fn search_handler(
        State(log): State<Log>,
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> impl IntoResponse {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        log.lock().unwrap().push(Seen { params, auth });

        let photos: Vec<_> = (0..12)
            .map(|i| {
                json!({
                    "id": u64::from(page) * 100 + i,
                    "alt": "",
                    "photographer": "Test",
                    "src": {
                        "original": "http://img/original.jpeg",
                        "large": "http://img/large.jpeg",
                        "medium": "http://img/medium.jpeg"
                    }
                })
            })
            .collect();
        Json(json!({
            "page": page,
            "per_page": 12,
            "total_results": 120,
            "photos": photos,
            "next_page": "http://next"
        }))
    }

    fn config(base_url: String) -> ApiConfig {
        ApiConfig {
            base_url,
            key: "test-key".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_sends_query_page_and_credential() {
        let log: Log = Arc::default();
        let router = Router::new()
            .route("/search", get(search_handler))
            .with_state(log.clone());
        let base = serve(router).await;
        let client = PexelsClient::new(&config(base)).unwrap();

        let page = client.search("nature", 2).await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.photos.len(), 12);
        assert_eq!(page.photos[0].id, 200);

        let seen = log.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].params.get("query").map(String::as_str), Some("nature"));
        assert_eq!(seen[0].params.get("page").map(String::as_str), Some("2"));
        assert_eq!(seen[0].params.get("per_page").map(String::as_str), Some("12"));
        assert_eq!(seen[0].auth.as_deref(), Some("test-key"));
    }

    #[tokio::test]
    async fn test_page_size_ignores_config_file() {
        let log: Log = Arc::default();
        let router = Router::new()
            .route("/search", get(search_handler))
            .with_state(log.clone());
        let base = serve(router).await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nkey = \"file-key\"\nper_page = 30\n").unwrap();
        let mut config = Config::from_file(&path).unwrap();
        config.api.base_url = base;

        let client = PexelsClient::new(&config.api).unwrap();
        client.search("nature", 1).await.unwrap();

        let seen = log.lock().unwrap().clone();
        assert_eq!(seen[0].params.get("per_page").map(String::as_str), Some("12"));
    }

    #[tokio::test]
    async fn test_empty_query_is_sent() {
        let log: Log = Arc::default();
        let router = Router::new()
            .route("/search", get(search_handler))
            .with_state(log.clone());
        let base = serve(router).await;
        let client = PexelsClient::new(&config(format!("{}/", base))).unwrap();

        client.search("", 1).await.unwrap();
        let seen = log.lock().unwrap().clone();
        assert_eq!(seen[0].params.get("query").map(String::as_str), Some(""));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().route(
            "/search",
            get(|| async { (StatusCode::UNAUTHORIZED, "no key") }),
        );
        let base = serve(router).await;
        let client = PexelsClient::new(&config(base)).unwrap();

        match client.search("nature", 1).await {
            Err(ApiError::Status { status, .. }) => assert_eq!(status, 401),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let router = Router::new().route("/search", get(|| async { "not json" }));
        let base = serve(router).await;
        let client = PexelsClient::new(&config(base)).unwrap();

        assert!(matches!(
            client.search("nature", 1).await,
            Err(ApiError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body() {
        let router = Router::new().route("/photo.jpeg", get(|| async { vec![0xffu8, 0xd8, 0xff] }));
        let base = serve(router).await;
        let client = PexelsClient::new(&config(base.clone())).unwrap();

        let bytes = client
            .fetch_bytes(&format!("{}/photo.jpeg", base))
            .await
            .unwrap();
        assert_eq!(bytes, vec![0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        let client = PexelsClient::new(&config("http://127.0.0.1:1".to_string())).unwrap();
        assert!(matches!(
            client.search("nature", 1).await,
            Err(ApiError::Request { .. })
        ));
    }
}
