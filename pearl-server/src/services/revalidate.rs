//! Cache revalidation client
//!
//! Tells the storefront to drop cached pages after catalog/content
//! changes: POST `{ "tags": [...] }` to the configured endpoint.
//! Fire-and-forget — failures are logged and never retried.

/// Revalidation client
#[derive(Clone, Debug)]
pub struct Revalidator {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl Revalidator {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// A revalidator that never sends anything (tests, local dev)
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Trigger revalidation for the given cache tags, best effort
    pub async fn revalidate(&self, tags: &[String]) {
        let Some(endpoint) = &self.endpoint else {
            tracing::debug!(?tags, "Revalidation endpoint not configured, skipping");
            return;
        };

        let body = serde_json::json!({ "tags": tags });

        match self.client.post(endpoint).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(?tags, "Cache revalidation triggered successfully");
            }
            Ok(resp) => {
                tracing::warn!(
                    status = %resp.status(),
                    ?tags,
                    "Cache revalidation failed"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, ?tags, "Error triggering cache revalidation");
            }
        }
    }
}
