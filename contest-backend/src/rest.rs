//! Supabase implementation of [`ContestBackend`]
//!
//! Rows go through the PostgREST endpoint (`/rest/v1`), images through the
//! storage endpoint (`/storage/v1`). Every request carries the project's anon
//! key; once a user signed in, their access token replaces it as bearer so the
//! service's row-level rules see the user.

use crate::client::{BackendError, BackendResult, ContestBackend};
use crate::models::{CategoryRecord, CommentRecord, LikeRecord, NewPhoto, PhotoRecord, ProfileRecord};
use crate::storage;
use reqwest::header::{HeaderMap, CONTENT_RANGE, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

const PHOTOS: &str = "photos";
const LIKES: &str = "photo_likes";
const COMMENTS: &str = "photo_comments";
const CATEGORIES: &str = "categories";
const PROFILES: &str = "profiles";

/// Connection settings for a Supabase project
#[derive(Debug, Clone, PartialEq)]
pub struct RestConfig {
    pub base_url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct RestBackend {
    config: RestConfig,
    client: reqwest::Client,
    access_token: Option<String>,
}

impl RestBackend {
    /// Create a new client for the given project
    pub fn new(config: RestConfig) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent("PhotoContest/0.1.0")
            .build()
            .map_err(|e| BackendError::Network(format!("Client build failed: {}", e)))?;

        Ok(Self {
            config,
            client,
            access_token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url(), table)
    }

    fn object_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url(),
            storage::BUCKET,
            object_path
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);

        self.client
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
            .header("Accept", "application/json")
    }

    fn table(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, &self.table_url(table))
    }

    async fn send(&self, request: RequestBuilder) -> BackendResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("Backend returned {}: {}", status, body);

        match status.as_u16() {
            401 | 403 => Err(BackendError::Unauthorized),
            404 => Err(BackendError::NotFound(error_message(&body))),
            code => Err(BackendError::Server {
                status: code,
                message: error_message(&body),
            }),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> BackendResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BackendError::Json(format!("Failed to parse response: {}", e)))
    }

    /// Inserts one row and returns the stored representation
    async fn insert_one<T: DeserializeOwned>(
        &self,
        table: &str,
        body: serde_json::Value,
    ) -> BackendResult<T> {
        let rows: Vec<T> = self
            .fetch(
                self.table(Method::POST, table)
                    .header("Prefer", "return=representation")
                    .json(&body),
            )
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::Other(format!("Insert into {} returned no row", table)))
    }

    /// Deletes rows matching `filters` and reports how many were removed
    async fn delete_counted(&self, table: &str, filters: &[(&str, String)]) -> BackendResult<u64> {
        let response = self
            .send(
                self.table(Method::DELETE, table)
                    .query(filters)
                    .header("Prefer", "count=exact"),
            )
            .await?;

        Ok(deleted_count(response.headers()))
    }
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

/// Pulls `message` out of a PostgREST / storage error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

/// Parses the total out of a `Content-Range: 0-1/2` or `*/0` header
fn deleted_count(headers: &HeaderMap) -> u64 {
    headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit('/').next())
        .and_then(|total| total.trim().parse().ok())
        .unwrap_or(0)
}

impl ContestBackend for RestBackend {
    fn with_access_token(&self, token: Option<String>) -> Self {
        Self {
            access_token: token,
            ..self.clone()
        }
    }

    async fn list_photos(&self) -> BackendResult<Vec<PhotoRecord>> {
        self.fetch(
            self.table(Method::GET, PHOTOS)
                .query(&[("select", "*"), ("order", "created_at.desc")]),
        )
        .await
    }

    async fn list_photos_by(&self, photographer_id: &str) -> BackendResult<Vec<PhotoRecord>> {
        self.fetch(self.table(Method::GET, PHOTOS).query(&[
            ("select", "*".to_string()),
            ("photographer_id", eq(photographer_id)),
            ("order", "created_at.desc".to_string()),
        ]))
        .await
    }

    async fn insert_photo(&self, photo: &NewPhoto) -> BackendResult<PhotoRecord> {
        let body = serde_json::to_value(photo)
            .map_err(|e| BackendError::Json(format!("Failed to encode photo: {}", e)))?;
        self.insert_one(PHOTOS, body).await
    }

    async fn update_photo_title(&self, photo_id: &str, title: &str) -> BackendResult<()> {
        self.send(
            self.table(Method::PATCH, PHOTOS)
                .query(&[("id", eq(photo_id))])
                .json(&json!({ "title": title })),
        )
        .await?;
        Ok(())
    }

    async fn delete_photo(&self, photo_id: &str) -> BackendResult<u64> {
        self.delete_counted(PHOTOS, &[("id", eq(photo_id))]).await
    }

    async fn list_likes(&self, photo_id: Option<&str>) -> BackendResult<Vec<LikeRecord>> {
        let mut query = vec![("select", "photo_id,user_id".to_string())];
        if let Some(id) = photo_id {
            query.push(("photo_id", eq(id)));
        }
        self.fetch(self.table(Method::GET, LIKES).query(&query)).await
    }

    async fn add_like(&self, photo_id: &str, user_id: &str) -> BackendResult<()> {
        self.send(
            self.table(Method::POST, LIKES)
                .json(&json!({ "photo_id": photo_id, "user_id": user_id })),
        )
        .await?;
        Ok(())
    }

    async fn remove_like(&self, photo_id: &str, user_id: &str) -> BackendResult<()> {
        self.send(
            self.table(Method::DELETE, LIKES)
                .query(&[("photo_id", eq(photo_id)), ("user_id", eq(user_id))]),
        )
        .await?;
        Ok(())
    }

    async fn list_comments(&self, photo_id: &str) -> BackendResult<Vec<CommentRecord>> {
        self.fetch(self.table(Method::GET, COMMENTS).query(&[
            ("select", "*".to_string()),
            ("photo_id", eq(photo_id)),
            ("order", "created_at.desc".to_string()),
        ]))
        .await
    }

    async fn add_comment(
        &self,
        photo_id: &str,
        user_id: &str,
        text: &str,
    ) -> BackendResult<CommentRecord> {
        self.insert_one(
            COMMENTS,
            json!({ "photo_id": photo_id, "user_id": user_id, "text": text }),
        )
        .await
    }

    async fn list_categories(&self) -> BackendResult<Vec<CategoryRecord>> {
        self.fetch(
            self.table(Method::GET, CATEGORIES)
                .query(&[("select", "*"), ("order", "name.asc")]),
        )
        .await
    }

    async fn insert_category(&self, name: &str) -> BackendResult<CategoryRecord> {
        self.insert_one(CATEGORIES, json!({ "name": name })).await
    }

    async fn update_category(&self, category_id: &str, name: &str) -> BackendResult<()> {
        self.send(
            self.table(Method::PATCH, CATEGORIES)
                .query(&[("id", eq(category_id))])
                .json(&json!({ "name": name })),
        )
        .await?;
        Ok(())
    }

    async fn delete_category(&self, category_id: &str) -> BackendResult<u64> {
        self.delete_counted(CATEGORIES, &[("id", eq(category_id))])
            .await
    }

    async fn list_profiles(&self) -> BackendResult<Vec<ProfileRecord>> {
        self.fetch(self.table(Method::GET, PROFILES).query(&[("select", "*")]))
            .await
    }

    async fn get_profile(&self, user_id: &str) -> BackendResult<Option<ProfileRecord>> {
        let rows: Vec<ProfileRecord> = self
            .fetch(
                self.table(Method::GET, PROFILES)
                    .query(&[("select", "*".to_string()), ("id", eq(user_id))]),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn delete_profile(&self, user_id: &str) -> BackendResult<u64> {
        self.delete_counted(PROFILES, &[("id", eq(user_id))]).await
    }

    async fn upload_image(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendResult<String> {
        log::info!("Uploading {} bytes to {}", bytes.len(), object_path);

        self.send(
            self.request(Method::POST, &self.object_url(object_path))
                .header(CONTENT_TYPE, content_type)
                .header("x-upsert", "false")
                .body(bytes),
        )
        .await?;

        Ok(storage::public_url(self.base_url(), object_path))
    }

    async fn remove_image(&self, object_path: &str) -> BackendResult<()> {
        let url = format!("{}/storage/v1/object/{}", self.base_url(), storage::BUCKET);
        self.send(
            self.request(Method::DELETE, &url)
                .json(&json!({ "prefixes": [object_path] })),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_deleted_count_from_content_range() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_RANGE, HeaderValue::from_static("*/0"));
        assert_eq!(deleted_count(&headers), 0);

        headers.insert(CONTENT_RANGE, HeaderValue::from_static("0-1/2"));
        assert_eq!(deleted_count(&headers), 2);

        assert_eq!(deleted_count(&HeaderMap::new()), 0);
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        assert_eq!(
            error_message(r#"{"message":"permission denied","code":"42501"}"#),
            "permission denied"
        );
        assert_eq!(error_message("plain failure"), "plain failure");
    }

    #[test]
    fn test_access_token_replaces_bearer() {
        let backend = RestBackend::new(RestConfig {
            base_url: "https://example.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
        })
        .unwrap();
        assert_eq!(backend.base_url(), "https://example.supabase.co");

        let authorized = backend.with_access_token(Some("user-token".to_string()));
        let request = authorized
            .table(Method::GET, PHOTOS)
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer user-token"
        );
        assert_eq!(request.headers().get("apikey").unwrap(), "anon");
    }
}
