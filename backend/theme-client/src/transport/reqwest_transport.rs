use crate::error::{ConfigError, TransportError};
use crate::transport::{HttpMethod, RequestDescriptor, Transport, TransportResponse};

use common::{HttpStatusCode, RedactedSecret};

use std::time::Duration;

use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use url::Url;

const ACCEPT_JSON: &str = "application/json";

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    base_url: Url,
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport rooted at `base_url_str`.
    ///
    /// A trailing separator is added when missing so relative paths extend the
    /// base instead of replacing its last segment.
    pub fn new(base_url_str: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let base_url = if base_url_str.ends_with('/') {
            Url::parse(base_url_str)?
        } else {
            Url::parse(&format!("{base_url_str}/"))?
        };
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &RequestDescriptor) -> Result<Url, TransportError> {
        let mut url = self.base_url.join(&request.path)?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: &RequestDescriptor,
        authorization: &RedactedSecret,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(request)?;
        debug!("{:?} {}", request.method, url.path());

        let builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        let mut builder = builder
            .header(AUTHORIZATION, authorization.expose())
            .header(ACCEPT, ACCEPT_JSON);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = HttpStatusCode(response.status().as_u16());
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        Ok(TransportResponse { status, body })
    }
}
