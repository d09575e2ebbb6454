use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::io::Write;

const SLACK_API_BASE: &str = "https://slack.com/api";

pub struct SlackClient {
    http: reqwest::Client,
    headers: HeaderMap,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, SLACK_API_BASE)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {token}")
            .parse()
            .map_err(|_| Error::Auth("token contains characters that cannot be sent".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            http: reqwest::Client::new(),
            headers,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http
            .get(format!("{}/{method}", self.base_url))
            .headers(self.headers.clone())
            .query(query)
            .send()
            .await?;

        Ok(response.json().await?)
    }

    /// Streams the response body into `dest`. Private file URLs require the
    /// auth header.
    pub async fn download(&self, url: &str, dest: &mut impl Write) -> Result<()> {
        let mut response = self
            .http
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?
            .error_for_status()?;

        while let Some(chunk) = response.chunk().await? {
            dest.write_all(&chunk)
                .map_err(|e| Error::io("failed to write downloaded bytes", e))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn download_streams_body_with_auth_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/dl/report.pdf"))
            .and(header("authorization", "Bearer xoxb-test"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"file bytes".as_slice()))
            .mount(&server)
            .await;

        let client = SlackClient::with_base_url("xoxb-test", &server.uri()).unwrap();
        let mut dest = Vec::new();
        client
            .download(&format!("{}/dl/report.pdf", server.uri()), &mut dest)
            .await
            .unwrap();

        assert_eq!(dest, b"file bytes");
    }

    #[tokio::test]
    async fn download_fails_on_http_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/dl/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = SlackClient::with_base_url("xoxb-test", &server.uri()).unwrap();
        let mut dest = Vec::new();
        let result = client
            .download(&format!("{}/dl/missing", server.uri()), &mut dest)
            .await;

        assert!(result.is_err());
        assert!(dest.is_empty());
    }
}
