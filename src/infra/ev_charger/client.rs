use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Method, Request, Url};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LocatorError;
use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, HttpClient};
use crate::query::GeoQuery;
use crate::services::charger_api::{ChargerApi, ChargerPayload};

const ERROR_BODY_LIMIT: usize = 512;

/// Client for the upstream EV charger service.
///
/// Every lookup is a single `GET {base_url}/chargers` carrying `lat`, `lon`
/// and `radius`; the credential is added by the wrapped [`HttpClient`].
pub struct ChargerClient<C = UrlParam<BasicClient>> {
    endpoint: Url,
    http: C,
}

impl ChargerClient {
    pub fn new(config: &Config) -> Result<Self> {
        let basic = BasicClient::new(config.timeout).context("Failed to build HTTP client")?;
        let http = UrlParam::key(basic, config.credential.clone());
        Self::with_http(&config.base_url, http)
    }
}

impl<C: HttpClient> ChargerClient<C> {
    pub fn with_http(base_url: &str, http: C) -> Result<Self> {
        let endpoint = format!("{}/chargers", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .with_context(|| format!("Invalid charger endpoint '{endpoint}'"))?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_request(&self, query: &GeoQuery) -> Request {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(query.upstream_params());
        Request::new(Method::GET, url)
    }
}

#[async_trait]
impl<C: HttpClient> ChargerApi for ChargerClient<C> {
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn get_chargers_nearby(&self, query: &GeoQuery) -> Result<ChargerPayload, LocatorError> {
        let response = self.http.execute(self.build_request(query)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) => excerpt(text),
                Err(e) => {
                    warn!(%status, error = %e.without_url(), "Failed to read upstream error body");
                    String::new()
                }
            };
            warn!(%status, body = %body, "Upstream returned an error status");
            return Err(LocatorError::UpstreamStatus { status, body });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Upstream body received");

        Ok(ChargerPayload::from_bytes(body)?)
    }
}

/// Cuts `text` to at most [`ERROR_BODY_LIMIT`] bytes on a char boundary.
fn excerpt(mut text: String) -> String {
    if text.len() > ERROR_BODY_LIMIT {
        let mut end = ERROR_BODY_LIMIT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}
