//! Trait and types for looking up chargers near a point.

use bytes::Bytes;
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::error::LocatorError;
use crate::query::GeoQuery;

/// An upstream response body, known to be well-formed JSON.
///
/// The bytes are kept exactly as received so the proxy can relay them
/// unchanged; nothing about their shape is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargerPayload(Bytes);

impl ChargerPayload {
    /// # Errors
    ///
    /// Returns an error if `body` is not a single valid JSON document.
    pub fn from_bytes(body: Bytes) -> serde_json::Result<Self> {
        serde_json::from_slice::<IgnoredAny>(&body)?;
        Ok(Self(body))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.0)
    }

    /// Reads the payload as a list of [`ChargerRecord`]s, the shape the web
    /// page expects.
    pub fn records(&self) -> serde_json::Result<Vec<ChargerRecord>> {
        serde_json::from_slice(&self.0)
    }
}

/// The fields of a charger that get rendered. Anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChargerRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Abstraction over a nearby-charger provider.
#[async_trait::async_trait]
pub trait ChargerApi: Send + Sync {
    /// Fetches chargers within `query.radius` km of the query point.
    /// Each call reaches the provider; nothing is cached.
    async fn get_chargers_nearby(&self, query: &GeoQuery) -> Result<ChargerPayload, LocatorError>;
}
