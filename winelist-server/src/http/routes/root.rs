//! API root - links to each collection

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::{routing::get, Json, Router};

use crate::http::server::AppState;

/// Collections listed at the root, by name and path
const COLLECTIONS: [(&str, &str); 1] = [("wines", "/wines")];

/// GET / - map of collection name to absolute URL
async fn api_root(headers: HeaderMap) -> Json<BTreeMap<&'static str, String>> {
    let base = base_url(&headers);

    Json(
        COLLECTIONS
            .iter()
            .map(|(name, path)| (*name, format!("{}{}", base, path)))
            .collect(),
    )
}

/// `scheme://host` for the current request, empty when Host is missing.
///
/// Behind a platform router the original scheme arrives in
/// `X-Forwarded-Proto`.
fn base_url(headers: &HeaderMap) -> String {
    let Some(host) = headers.get(HOST).and_then(|h| h.to_str().ok()) else {
        return String::new();
    };

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .and_then(|p| p.split(',').next())
        .map(str::trim)
        .filter(|p| matches!(*p, "http" | "https"))
        .unwrap_or("http");

    format!("{}://{}", scheme, host)
}

/// Root routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(api_root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn links_use_request_host() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("wines.example.com"));

        let Json(links) = api_root(headers).await;
        assert_eq!(links["wines"], "http://wines.example.com/wines");
    }

    #[test]
    fn forwarded_proto_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("app.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        assert_eq!(base_url(&headers), "https://app.example.com");
    }

    #[test]
    fn missing_host_gives_relative_links() {
        assert_eq!(base_url(&HeaderMap::new()), "");
    }
}
