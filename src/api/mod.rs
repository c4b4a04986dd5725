//! REST API Client
//!
//! Thin `fetch` wrapper for the bearer-authenticated JSON API, organized by domain.

mod notification;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::config::AppConfig;

// Re-export all public items
pub use notification::*;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("no browser window")]
    NoWindow,
    #[error("no signed-in user")]
    MissingUser,
    #[error("request failed: {0}")]
    Js(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        ApiError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_wasm_bindgen::Error> for ApiError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Escape a value for use as one URL path segment
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Connection settings taken from `AppConfig`
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base.clone(), config.token.clone())
    }

    /// Absolute URL for an API path starting with `/`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send("GET", path).await?;
        let body = JsFuture::from(response.json()?).await?;
        Ok(serde_wasm_bindgen::from_value(body)?)
    }

    /// PUT without a body; the response body is ignored
    pub async fn put(&self, path: &str) -> Result<(), ApiError> {
        self.send("PUT", path).await.map(|_| ())
    }

    async fn send(&self, method: &str, path: &str) -> Result<Response, ApiError> {
        let window = web_sys::window().ok_or(ApiError::NoWindow)?;

        let opts = RequestInit::new();
        opts.set_method(method);
        let request = Request::new_with_str_and_init(&self.url(path), &opts)?;
        let headers = request.headers();
        headers.set("Accept", "application/json")?;
        if let Some(token) = &self.token {
            headers.set("Authorization", &format!("Bearer {}", token))?;
        }

        let value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = value.dyn_into()?;
        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_joins_base() {
        let client = ApiClient::new("https://api.example.com/", None);
        assert_eq!(client.url("/api/notification/mark-read/4"), "https://api.example.com/api/notification/mark-read/4");

        let same_origin = ApiClient::new("", Some("t".to_string()));
        assert_eq!(same_origin.url("/api/x"), "/api/x");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("a1b2-c3"), "a1b2-c3");
        assert_eq!(encode_segment("user/../admin"), "user%2F..%2Fadmin");
        assert_eq!(encode_segment("a b?c#d"), "a%20b%3Fc%23d");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::Status(401).to_string(), "server responded with status 401");
        assert_eq!(ApiError::MissingUser.to_string(), "no signed-in user");
    }
}
