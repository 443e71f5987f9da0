//! HTTP client wrapper
//!
//! Attaches the stored bearer credential, issues a single request and turns
//! every non-2xx response into [`ApiError::Http`].

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde_json::Value;

use crate::cache::{ResponseCache, cache_key};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::session::CredentialStore;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw body of a binary endpoint
#[derive(Debug, Clone)]
pub struct Download {
    /// Filename from `Content-Disposition`, when the server sent one
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// Backend client: one per session, owning its response cache
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    cache: Option<ResponseCache>,
    invalidate_on_write: bool,
}

impl ApiClient {
    /// Create a client with default timeout and cache settings
    pub fn new(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Result<Self> {
        Self::build(base_url.into(), store, DEFAULT_TIMEOUT)
    }

    /// Create a client from the loaded configuration
    pub fn from_config(
        config: &Config,
        host_override: Option<&str>,
        store: Arc<dyn CredentialStore>,
        no_cache: bool,
    ) -> Result<Self> {
        let base_url = config.api_host(host_override)?;
        let client = Self::build(base_url, store, config.timeout())?;

        let cache = (config.cache.enabled && !no_cache)
            .then(|| ResponseCache::new(config.cache.ttl()));

        Ok(client
            .with_cache(cache)
            .invalidate_on_write(config.cache.invalidate_on_write))
    }

    fn build(base_url: String, store: Arc<dyn CredentialStore>, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            cache: Some(ResponseCache::default()),
            invalidate_on_write: false,
        })
    }

    /// Replace the response cache (`None` disables caching)
    pub fn with_cache(mut self, cache: Option<ResponseCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Clear the cache after every successful mutation
    pub fn invalidate_on_write(mut self, enabled: bool) -> Self {
        self.invalidate_on_write = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// Drop every cached read. Returns the number of entries removed.
    pub fn clear_cache(&self) -> usize {
        self.cache.as_ref().map(ResponseCache::clear).unwrap_or(0)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `Authorization` header value, failing fast when nobody is logged in
    fn authorization(&self) -> Result<String> {
        let credential = self.store.load()?.ok_or(ApiError::MissingToken)?;
        Ok(credential.authorization())
    }

    /// Issue an authenticated request and parse a JSON body if there is one
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        let auth = self.authorization()?;

        debug!("{} {}", method, path);
        let mut request = self
            .http
            .request(method, self.url(path))
            .header(AUTHORIZATION, auth);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        read_json(response).await
    }

    /// Authenticated GET served from the cache while fresh
    pub async fn get_cached(&self, path: &str, query: &[(&str, &str)]) -> Result<Option<Value>> {
        let Some(cache) = self.cache.as_ref() else {
            return self.request(Method::GET, path, query, None).await;
        };

        // A logged-out client must not read what an earlier session cached
        self.authorization()?;

        let key = cache_key(path, query);
        if let Some(cached) = cache.get(&key) {
            debug!("Cache hit: {}", path);
            return Ok(Some(cached));
        }
        debug!("Cache miss: {}", path);

        let result = self.request(Method::GET, path, query, None).await?;
        if let Some(ref value) = result {
            cache.set(&key, value.clone());
        }
        Ok(result)
    }

    /// Authenticated write; honours `invalidate_on_write`
    pub async fn mutate(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        let result = self.request(method, path, &[], body).await?;
        if self.invalidate_on_write {
            let removed = self.clear_cache();
            debug!("Cleared {} cached reads after write to {}", removed, path);
        }
        Ok(result)
    }

    /// Authenticated GET of a binary payload
    pub async fn download(&self, path: &str) -> Result<Download> {
        let auth = self.authorization()?;

        debug!("GET {} (download)", path);
        let response = self
            .http
            .get(self.url(path))
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(ApiError::from)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await.into());
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition);
        let bytes = response.bytes().await.map_err(ApiError::from)?.to_vec();

        Ok(Download { filename, bytes })
    }

    /// Unauthenticated form-encoded POST (used by `/token`)
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Option<Value>> {
        debug!("POST {} (form)", path);
        let response = self
            .http
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .map_err(ApiError::from)?;
        read_json(response).await
    }
}

/// Parse a response: JSON for 2xx JSON bodies, `None` for empty or non-JSON
async fn read_json(response: Response) -> Result<Option<Value>> {
    let status = response.status();
    if !status.is_success() {
        return Err(error_from_response(response).await.into());
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"));

    let text = response
        .text()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

    if !is_json || text.trim().is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(&text)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
    Ok(Some(value))
}

async fn error_from_response(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message =
        error_message(&body).unwrap_or_else(|| format!("Server responded with status {}", status));
    ApiError::Http { status, message }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, validation lists
/// `{"detail": [{"msg": "..."}]}` and `{"message": "..."}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Extract the filename from a `Content-Disposition` header
fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    for part in header.split(';').map(str::trim) {
        if let Some(encoded) = part.strip_prefix("filename*=") {
            // RFC 5987: charset''value
            let value = encoded.rsplit("''").next().unwrap_or(encoded);
            let value = value.trim_matches('"');
            if !value.is_empty() {
                return Some(value.to_string());
            }
        } else if let Some(value) = part.strip_prefix("filename=") {
            let value = value.trim_matches('"');
            if !value.is_empty() {
                plain = Some(value.to_string());
            }
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionCredential;
    use crate::error::Error;
    use crate::session::MemoryCredentialStore;
    use serde_json::json;

    fn logged_in_store() -> Arc<dyn CredentialStore> {
        Arc::new(MemoryCredentialStore::with_credential(SessionCredential {
            access_token: "tok".to_string(),
            token_type: "bearer".to_string(),
        }))
    }

    #[test]
    fn test_error_message_detail_string() {
        assert_eq!(
            error_message(r#"{"detail": "Not found"}"#),
            Some("Not found".to_string())
        );
    }

    #[test]
    fn test_error_message_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "field required"},
                                  {"loc": ["body", "age"], "msg": "not an int"}]}"#;
        assert_eq!(
            error_message(body),
            Some("field required; not an int".to_string())
        );
    }

    #[test]
    fn test_error_message_message_field_and_garbage() {
        assert_eq!(
            error_message(r#"{"message": "Conflict"}"#),
            Some("Conflict".to_string())
        );
        assert_eq!(error_message("<html>oops</html>"), None);
        assert_eq!(error_message(r#"{"detail": ""}"#), None);
    }

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="visas_2024.csv""#),
            Some("visas_2024.csv".to_string())
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=plain.csv"),
            Some("plain.csv".to_string())
        );
        assert_eq!(
            filename_from_disposition(
                r#"attachment; filename="fallback.csv"; filename*=UTF-8''utf8.csv"#
            ),
            Some("utf8.csv".to_string())
        );
        assert_eq!(filename_from_disposition("inline"), None);
    }

    #[tokio::test]
    async fn test_404_surfaces_server_detail() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/refugees/9")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Not found"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store()).unwrap();
        let err = client
            .request(Method::GET, "/refugees/9", &[], None)
            .await
            .unwrap_err();

        match err {
            Error::Api(ApiError::Http { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_without_json_uses_generic_message() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("DELETE", "/visas/3")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store()).unwrap();
        let err = client
            .request(Method::DELETE, "/visas/3", &[], None)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "Server responded with status 502");
    }

    #[tokio::test]
    async fn test_204_is_empty_success() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("DELETE", "/visas/3")
            .with_status(204)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store()).unwrap();
        let result = client
            .request(Method::DELETE, "/visas/3", &[], None)
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_non_json_success_has_no_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/logout")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("bye")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store()).unwrap();
        let result = client
            .request(Method::POST, "/logout", &[], None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_sends_authorization_header() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/users/me")
            .match_header("authorization", "bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"username": "officer"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store()).unwrap();
        let body = client
            .request(Method::GET, "/users/me", &[], None)
            .await
            .unwrap();

        m.assert_async().await;
        assert_eq!(body, Some(json!({"username": "officer"})));
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_network() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
        let client = ApiClient::new(server.url(), store).unwrap();

        let err = client.get_cached("/visas", &[]).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::MissingToken)));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_equivalent_params_hit_network_once() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/foreigners")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store()).unwrap();
        let first = client
            .get_cached("/foreigners", &[("skip", "0"), ("limit", "50")])
            .await
            .unwrap();
        let second = client
            .get_cached("/foreigners", &[("limit", "50"), ("skip", "0")])
            .await
            .unwrap();

        assert_eq!(first, second);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/visas")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .expect(2)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store()).unwrap();
        client.get_cached("/visas", &[]).await.unwrap();
        client.get_cached("/visas", &[]).await.unwrap();
        assert_eq!(client.clear_cache(), 1);
        client.get_cached("/visas", &[]).await.unwrap();

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_writes_keep_cache_by_default() {
        let mut server = mockito::Server::new_async().await;
        let _get = server
            .mock("GET", "/visas")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;
        let _post = server
            .mock("POST", "/visas")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 5}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store()).unwrap();
        client.get_cached("/visas", &[]).await.unwrap();
        client
            .mutate(Method::POST, "/visas", Some(&json!({"visa_type": "work"})))
            .await
            .unwrap();

        assert_eq!(client.cache().map(ResponseCache::len), Some(1));
    }

    #[tokio::test]
    async fn test_invalidate_on_write_clears_cache() {
        let mut server = mockito::Server::new_async().await;
        let _get = server
            .mock("GET", "/visas")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;
        let _put = server
            .mock("PUT", "/visas/5")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 5}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store())
            .unwrap()
            .invalidate_on_write(true);
        client.get_cached("/visas", &[]).await.unwrap();
        client
            .mutate(Method::PUT, "/visas/5", Some(&json!({"status": "revoked"})))
            .await
            .unwrap();

        assert_eq!(client.cache().map(ResponseCache::len), Some(0));
    }

    #[tokio::test]
    async fn test_disabled_cache_always_fetches() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/visas")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .expect(2)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store())
            .unwrap()
            .with_cache(None);
        client.get_cached("/visas", &[]).await.unwrap();
        client.get_cached("/visas", &[]).await.unwrap();

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_download_reads_filename_and_bytes() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/export/visas")
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_header("content-disposition", r#"attachment; filename="visas.csv""#)
            .with_body("id,visa_type\n1,work\n")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), logged_in_store()).unwrap();
        let download = client.download("/export/visas").await.unwrap();

        assert_eq!(download.filename.as_deref(), Some("visas.csv"));
        assert_eq!(download.bytes, b"id,visa_type\n1,work\n");
    }

    #[test]
    fn test_from_config_respects_no_cache() {
        let config = Config::default();
        let client = ApiClient::from_config(
            &config,
            Some("http://localhost:8000/"),
            Arc::new(MemoryCredentialStore::new()),
            true,
        )
        .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8000");
        assert!(client.cache().is_none());
    }
}
