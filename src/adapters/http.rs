use crate::domain::ports::{ConfigProvider, PeopleSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;

/// Fetches the people feed over HTTP GET.
///
/// Non-2xx responses are failures of the fetch itself. A body that is not
/// JSON is handed on as a JSON string so validation rejects it.
#[derive(Debug, Clone)]
pub struct HttpPeopleSource {
    client: Client,
}

impl HttpPeopleSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(config.request_timeout_seconds().map(Duration::from_secs))
    }
}

impl Default for HttpPeopleSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PeopleSource for HttpPeopleSource {
    async fn fetch(&self, source: &str) -> Result<serde_json::Value> {
        tracing::debug!("Making API request to: {}", source);
        let response = self
            .client
            .get(source)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        let response = response.error_for_status()?;

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes", body.len());
        match serde_json::from_slice(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::debug!("Body is not JSON ({}), passing it on as text", e);
                Ok(serde_json::Value::String(
                    String::from_utf8_lossy(&body).into_owned(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CatRosterError;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_returns_json_body() {
        let server = MockServer::start();
        let mock_data = serde_json::json!([
            {"name": "Bob", "gender": "Male", "age": 23, "pets": null}
        ]);

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/people.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mock_data.clone());
        });

        let source = HttpPeopleSource::new();
        let body = source.fetch(&server.url("/people.json")).await.unwrap();

        api_mock.assert();
        assert_eq!(body, mock_data);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_an_error() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/people.json");
            then.status(404);
        });

        let source = HttpPeopleSource::new();
        let result = source.fetch(&server.url("/people.json")).await;

        api_mock.assert();
        let err = result.unwrap_err();
        match &err {
            CatRosterError::ApiError(e) => {
                assert_eq!(e.status().map(|s| s.as_u16()), Some(404));
                // shown as reqwest describes it, without a prefix
                assert_eq!(err.to_string(), e.to_string());
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_passed_on_as_text() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/people.json");
            then.status(200).body("<html>maintenance</html>");
        });

        let source = HttpPeopleSource::new();
        let result = source.fetch(&server.url("/people.json")).await;

        api_mock.assert();
        assert_eq!(
            result.unwrap(),
            serde_json::Value::String("<html>maintenance</html>".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_an_error() {
        let source = HttpPeopleSource::with_timeout(Some(Duration::from_secs(2))).unwrap();
        // port 9 (discard) on localhost is not served by anything in tests
        let result = source.fetch("http://127.0.0.1:9/people.json").await;

        assert!(matches!(result, Err(CatRosterError::ApiError(_))));
    }
}
