use crate::{DefinitionStore, StoreError};
use async_trait::async_trait;
use ballast_definitions::{DefinitionKind, DefinitionRecord};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// REST client for the definition store API.
///
/// Wire format (JSON):
/// - `GET    {base}/api/{resource}` - list all records of a kind
/// - `POST   {base}/api/{resource}` - upsert, body `{"<resource>": [record]}`,
///   response is the stored record
/// - `DELETE {base}/api/{resource}/{db_id}` - delete; 404 counts as success
pub struct HttpDefinitionStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDefinitionStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        Self::with_timeout(base_url, None)
    }

    /// Client with a whole-request timeout applied to every call, on top of
    /// whatever per-operation timeout the caller enforces.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, kind: DefinitionKind) -> String {
        format!("{}/api/{}", self.base_url, kind.resource())
    }

    fn record_url(&self, kind: DefinitionKind, db_id: &str) -> String {
        format!("{}/{}", self.collection_url(kind), db_id)
    }
}

#[async_trait]
impl DefinitionStore for HttpDefinitionStore {
    async fn list(&self, kind: DefinitionKind) -> Result<Vec<DefinitionRecord>, StoreError> {
        let url = self.collection_url(kind);
        debug!(%url, "listing definitions");

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        let records = response
            .json::<Vec<DefinitionRecord>>()
            .await
            .map_err(|error| StoreError::InvalidResponse(error.to_string()))?;

        Ok(records)
    }

    async fn upsert(
        &self,
        kind: DefinitionKind,
        record: DefinitionRecord,
    ) -> Result<DefinitionRecord, StoreError> {
        let url = self.collection_url(kind);
        debug!(%url, id = record.id(), "upserting definition");

        let payload = HashMap::from([(kind.resource(), vec![&record])]);
        let response = self.client.post(&url).json(&payload).send().await?;
        let response = check_status(response).await?;
        let stored = response
            .json::<DefinitionRecord>()
            .await
            .map_err(|error| StoreError::InvalidResponse(error.to_string()))?;

        Ok(stored)
    }

    async fn delete(&self, kind: DefinitionKind, db_id: &str) -> Result<(), StoreError> {
        let url = self.record_url(kind, db_id);
        debug!(%url, "deleting definition");

        let response = self.client.delete(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            // Idempotent: the record is gone either way.
            return Ok(());
        }
        check_status(response).await?;

        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}
