//! Fetch-shaped requests accepted by the gateway

use axum::{
    body::Bytes,
    http::{
        HeaderMap, HeaderName, HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

/// An intercepted request
///
/// `url` may be absolute (`http://localhost:5173/api/products?category=vidro`)
/// or just a path with an optional query string.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl GatewayRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// POST with a JSON-encoded body
    pub fn post_json<T: Serialize>(url: impl Into<String>, body: &T) -> Self {
        let mut request = Self::new(Method::POST, url);
        match serde_json::to_vec(body) {
            Ok(bytes) => request.body = Bytes::from(bytes),
            Err(e) => warn!("Failed to encode request body: {}", e),
        }
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        request
    }

    /// Add a header; values that are not valid header text are skipped
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(e) => warn!("Skipping invalid {} header: {}", name, e),
        }
        self
    }

    /// Add `Authorization: Bearer <token>`
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header(AUTHORIZATION, &format!("Bearer {token}"))
    }

    /// The URL without its query string or fragment
    pub fn path(&self) -> &str {
        let end = self.url.find(['?', '#']).unwrap_or(self.url.len());
        &self.url[..end]
    }

    /// First decoded value of query parameter `name`
    pub fn query_param(&self, name: &str) -> Option<String> {
        let without_fragment = self.url.split('#').next().unwrap_or_default();
        let (_, query) = without_fragment.split_once('?')?;

        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Decode the JSON body, falling back to `T::default()` when it is absent or malformed
    pub fn json_or_default<T: DeserializeOwned + Default>(&self) -> T {
        if self.body.is_empty() {
            return T::default();
        }

        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            debug!("Ignoring unreadable request body: {}", e);
            T::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Payload {
        email: Option<String>,
    }

    #[test]
    fn test_path_strips_query_and_fragment() {
        let request = GatewayRequest::get("http://localhost:5173/api/products?category=vidro#top");
        assert_eq!(request.path(), "http://localhost:5173/api/products");

        let request = GatewayRequest::get("/api/categories");
        assert_eq!(request.path(), "/api/categories");
    }

    #[test]
    fn test_query_param_is_decoded() {
        let request = GatewayRequest::get("/api/products?page=2&category=papel%20e+papel%C3%A3o");
        assert_eq!(
            request.query_param("category"),
            Some("papel e papelão".to_string())
        );
        assert_eq!(request.query_param("page"), Some("2".to_string()));
        assert_eq!(request.query_param("missing"), None);
        assert_eq!(GatewayRequest::get("/api/products").query_param("category"), None);
    }

    #[test]
    fn test_json_body() {
        let request = GatewayRequest::post_json("/api/auth/login", &json!({ "email": "a@b.com" }));
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.json_or_default::<Payload>(),
            Payload {
                email: Some("a@b.com".to_string())
            }
        );
    }

    #[test]
    fn test_missing_or_malformed_body_defaults() {
        let request = GatewayRequest::new(Method::POST, "/api/auth/login");
        assert_eq!(request.json_or_default::<Payload>(), Payload::default());

        let mut request = GatewayRequest::new(Method::POST, "/api/auth/login");
        request.body = Bytes::from_static(b"{not json");
        assert_eq!(request.json_or_default::<Payload>(), Payload::default());
    }

    #[test]
    fn test_with_bearer() {
        let request = GatewayRequest::get("/api/auth/session").with_bearer("abc");
        assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
    }
}
