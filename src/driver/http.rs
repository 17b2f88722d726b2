use std::time::Duration;

use serde::Serialize;

use crate::Result;
use crate::driver::events::NetworkResponse;
use crate::driver::page::Page;

/// Driver adapter for suites whose trigger actions are plain HTTP calls.
///
/// Each request is performed with reqwest and the observed response is
/// emitted into the page's stream, exactly as a browser adapter would do
/// from its response hook. Useful on its own for API-level suites and for
/// exercising the harness against a mock server.
#[derive(Clone)]
pub struct HttpDriver {
    inner: reqwest::Client,
    page: Page,
}

impl HttpDriver {
    pub fn new(page: &Page) -> Self {
        Self {
            inner: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            page: page.clone(),
        }
    }

    pub async fn get(&self, url: &str) -> Result<()> {
        let url = url::Url::parse(url)?;
        self.dispatch(self.inner.get(url)).await
    }

    pub async fn get_with_bearer(&self, url: &str, token: &str) -> Result<()> {
        let url = url::Url::parse(url)?;
        self.dispatch(self.inner.get(url).bearer_auth(token)).await
    }

    pub async fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<()> {
        let url = url::Url::parse(url)?;
        self.dispatch(self.inner.post(url).json(body)).await
    }

    async fn dispatch(&self, req: reqwest::RequestBuilder) -> Result<()> {
        let response = req.send().await?;

        // resp.url() is the final absolute URL after redirects, which is
        // what URL matchers are evaluated against
        let url = response.url().to_string();
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        self.page
            .emit_response(NetworkResponse::new(url, status, headers, body)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_emits_response_event() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .mount(&mock_server)
            .await;

        let page = Page::new();
        let mut rx = page.subscribe();
        let driver = HttpDriver::new(&page);

        driver
            .get(&format!("{}/api/health", mock_server.uri()))
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert!(event.url.contains("/api/health"));
        assert_eq!(event.status.code(), 200);
        assert_eq!(event.body, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_post_json_sets_content_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(wiremock::matchers::header(
                "Content-Type",
                "application/json",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&mock_server)
            .await;

        let page = Page::new();
        let mut rx = page.subscribe();
        let driver = HttpDriver::new(&page);

        driver
            .post_json(
                &format!("{}/api/login", mock_server.uri()),
                &serde_json::json!({"email": "a@b.c", "password": "pw"}),
            )
            .await
            .unwrap();

        assert_eq!(rx.recv().await.unwrap().status.code(), 200);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let page = Page::new();
        let driver = HttpDriver::new(&page);
        assert!(driver.get("not a url").await.is_err());
    }
}
