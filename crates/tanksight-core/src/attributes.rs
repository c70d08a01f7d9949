//! Attribute Service Client
//!
//! Entity identities and the attribute-fetch collaborator. The resolver
//! issues at most two fetches per widget instance lifetime (one for the
//! shape attribute, one combined fetch for secondary values), so the
//! fetcher sees a fixed, tiny call pattern.

use crate::error::WidgetError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use uuid::{uuid, Uuid};

/// Identity of a not-yet-bound datasource. Widgets bound to this identity
/// never issue attribute fetches; static configuration applies directly.
pub const PLACEHOLDER_ENTITY_ID: Uuid = uuid!("13814000-1dd2-11b2-8080-808080808080");

/// Reference to the entity a widget datasource is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity kind as the attribute service knows it ("DEVICE", "ASSET", ...)
    pub entity_type: String,
    /// Entity identifier
    pub id: Uuid,
}

impl EntityRef {
    /// Reference to a device entity.
    pub fn device(id: Uuid) -> Self {
        Self {
            entity_type: "DEVICE".to_string(),
            id,
        }
    }

    /// The placeholder identity used before a datasource is bound.
    pub fn placeholder() -> Self {
        Self {
            entity_type: "DEVICE".to_string(),
            id: PLACEHOLDER_ENTITY_ID,
        }
    }

    /// Whether this is the null/placeholder identity.
    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ENTITY_ID
    }
}

/// Attribute-fetch collaborator: one asynchronous round trip per call,
/// returning whatever requested keys the server knows about. Missing keys
/// are simply absent from the map, never an error.
pub trait AttributeFetcher {
    /// Fetch the given attribute keys for an entity.
    fn fetch_attributes(
        &self,
        entity: &EntityRef,
        keys: &[&str],
    ) -> impl Future<Output = Result<HashMap<String, serde_json::Value>, WidgetError>> + Send;
}

/// One key/value pair as the attribute service returns it.
#[derive(Debug, Clone, Deserialize)]
struct AttributeEntry {
    key: String,
    value: serde_json::Value,
}

/// Default [`AttributeFetcher`] over the platform's HTTP telemetry API.
#[derive(Debug, Clone)]
pub struct HttpAttributeFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAttributeFetcher {
    /// Create a client against a platform base URL, e.g.
    /// `"https://dashboards.example.com"`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("TankSight/0.1")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl AttributeFetcher for HttpAttributeFetcher {
    async fn fetch_attributes(
        &self,
        entity: &EntityRef,
        keys: &[&str],
    ) -> Result<HashMap<String, serde_json::Value>, WidgetError> {
        let url = format!(
            "{}/api/plugins/telemetry/{}/{}/values/attributes?keys={}",
            self.base_url,
            entity.entity_type,
            entity.id,
            keys.join(",")
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WidgetError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WidgetError::Fetch(format!(
                "attribute service returned {}",
                response.status()
            )));
        }

        let entries: Vec<AttributeEntry> = response
            .json()
            .await
            .map_err(|e| WidgetError::Fetch(e.to_string()))?;

        Ok(entries.into_iter().map(|e| (e.key, e.value)).collect())
    }
}
