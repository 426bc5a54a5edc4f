use crate::config::Credential;
use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends the credential as a URL query parameter.
///
/// The upstream charger service expects its key as `key=<credential>` on every
/// call; see [`UrlParam::key`].
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub credential: Credential,
}

impl<C> UrlParam<C> {
    pub fn key(inner: C, credential: Credential) -> Self {
        Self {
            inner,
            param_name: "key".to_string(),
            credential,
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, self.credential.expose());
        self.inner.execute(req).await
    }
}
