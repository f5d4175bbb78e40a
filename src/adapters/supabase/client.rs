//! Supabase REST log store
//!
//! Records are inserted through the PostgREST endpoint that Supabase
//! exposes for every table: `POST {url}/rest/v1/{table}`.

use crate::adapters::store::LogStore;
use crate::anonymization::OutboundRecord;
use crate::config::{SecretString, SupabaseConfig};
use crate::domain::{LogStoreError, Result, StorylogError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Log store backed by a Supabase table
pub struct SupabaseLogStore {
    /// HTTP client for making requests
    client: Client,

    /// `{url}/rest/v1/{table}`
    endpoint: Url,

    /// Project API key, sent as `apikey` and bearer token
    api_key: SecretString,
}

impl SupabaseLogStore {
    /// Create a new Supabase log store
    ///
    /// No request is made until the first insert.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let endpoint = rest_endpoint(&config.url, &config.table)?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                StorylogError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// Insert endpoint this store posts to
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key: &str = self.api_key.expose_secret().as_ref();
        request.header("apikey", key).bearer_auth(key)
    }
}

#[async_trait]
impl LogStore for SupabaseLogStore {
    fn name(&self) -> &'static str {
        "supabase"
    }

    async fn insert(&self, record: &OutboundRecord) -> Result<()> {
        let response = self
            .authorized(self.client.post(self.endpoint.clone()))
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LogStoreError::Rejected {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        tracing::debug!(status = status.as_u16(), "Supabase insert accepted");
        Ok(())
    }

    async fn test_connection(&self) -> Result<()> {
        let response = self
            .authorized(self.client.get(self.endpoint.clone()))
            .query(&[("limit", "0")])
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LogStoreError::Rejected {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(())
    }
}

fn rest_endpoint(base_url: &str, table: &str) -> Result<Url> {
    let raw = format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table);
    Url::parse(&raw).map_err(|e| {
        StorylogError::Configuration(format!("Invalid Supabase URL '{base_url}': {e}"))
    })
}

fn map_request_error(err: reqwest::Error) -> StorylogError {
    let store_error = if err.is_timeout() {
        LogStoreError::Timeout(err.to_string())
    } else if err.is_connect() {
        LogStoreError::ConnectionFailed(err.to_string())
    } else {
        LogStoreError::InsertFailed(err.to_string())
    };
    store_error.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config(url: &str) -> SupabaseConfig {
        SupabaseConfig {
            url: url.to_string(),
            api_key: secret_string("anon-key"),
            table: "gunapad_logs".to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_endpoint_construction() {
        let store = SupabaseLogStore::new(&config("https://abc.supabase.co/")).unwrap();
        assert_eq!(store.endpoint(), "https://abc.supabase.co/rest/v1/gunapad_logs");
        assert_eq!(store.name(), "supabase");
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(matches!(
            SupabaseLogStore::new(&config("::not a url")),
            Err(StorylogError::Configuration(_))
        ));
    }
}
