//! Persona persistence backends.
//!
//! The store is the source of truth for persona records and their display
//! priorities. Two implementations: a JSON file holding the persona array,
//! and an HTTP backend whose endpoint paths come from configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{StoreKind, StoreSettings};
use crate::error::{Error, Result};

use super::ordering::apply_priorities;
use super::types::{PersonaRecord, PriorityMap};

/// Body of a display priority update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayPriorityRequest {
    pub display_priority_map: PriorityMap,
}

/// Source of truth for persona records.
#[async_trait]
pub trait PersonaStore: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// All persona records, in whatever order the store keeps them.
    async fn fetch_all(&self) -> Result<Vec<PersonaRecord>>;

    /// Persist explicit priorities. Records not in the map keep theirs.
    async fn update_display_priorities(&self, priorities: &PriorityMap) -> Result<()>;
}

/// Build the store selected by configuration.
pub fn build_store(settings: &StoreSettings) -> Result<Box<dyn PersonaStore>> {
    match settings.kind {
        StoreKind::File => Ok(Box::new(FileStore::new(&settings.path))),
        StoreKind::Http => Ok(Box::new(HttpStore::new(settings)?)),
    }
}

// ─────────────────────────────────────────────────────────────────
// File Store
// ─────────────────────────────────────────────────────────────────

/// Personas kept as a JSON array in a single file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `records` to the file, replacing its contents.
    pub async fn save_all(&self, records: &[PersonaRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| Error::Internal(format!("Failed to encode personas: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::IoWrite {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        // Write next to the target and rename so readers never see a partial file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| Error::IoWrite {
                path: tmp.clone(),
                source: e,
            })?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(Error::IoWrite {
                path: self.path.clone(),
                source: e,
            });
        }

        debug!(path = %self.path.display(), count = records.len(), "Personas written");
        Ok(())
    }
}

#[async_trait]
impl PersonaStore for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_all(&self) -> Result<Vec<PersonaRecord>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::IoRead {
                path: self.path.clone(),
                source: e,
            })?;

        let records: Vec<PersonaRecord> = serde_json::from_str(&content)
            .map_err(|e| Error::malformed(self.path.display().to_string(), e))?;

        debug!(path = %self.path.display(), count = records.len(), "Personas loaded");
        Ok(records)
    }

    async fn update_display_priorities(&self, priorities: &PriorityMap) -> Result<()> {
        let records = self.fetch_all().await?;

        if let Some(missing) = priorities
            .keys()
            .find(|id| !records.iter().any(|r| r.id == **id))
        {
            return Err(Error::PersonaNotFound { id: *missing });
        }

        let updated = apply_priorities(&records, priorities);
        self.save_all(&updated).await?;

        info!(path = %self.path.display(), count = priorities.len(), "Display priorities saved");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// HTTP Store
// ─────────────────────────────────────────────────────────────────

/// Personas served by the assistant backend's REST API.
pub struct HttpStore {
    list_url: String,
    priority_url: String,
    api_key: String,
    timeout_secs: u64,
    client: Client,
}

impl HttpStore {
    pub fn new(settings: &StoreSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let store = Self {
            list_url: join_url(&settings.base_url, &settings.list_path),
            priority_url: join_url(&settings.base_url, &settings.priority_path),
            api_key: settings.api_key.clone(),
            timeout_secs: settings.timeout_secs,
            client,
        };

        debug!(list_url = %store.list_url, priority_url = %store.priority_url, "HTTP store created");
        Ok(store)
    }

    pub fn list_url(&self) -> &str {
        &self.list_url
    }

    pub fn priority_url(&self) -> &str {
        &self.priority_url
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        if self.api_key.is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    async fn send(&self, url: &str, req: RequestBuilder) -> Result<Response> {
        let response = self.authorize(req).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::StoreTimeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout_secs,
                }
            } else {
                Error::StoreUnreachable {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::StoreRejected {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl PersonaStore for HttpStore {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_all(&self) -> Result<Vec<PersonaRecord>> {
        let response = self
            .send(&self.list_url, self.client.get(&self.list_url))
            .await?;

        let body = response.text().await.map_err(|e| Error::StoreUnreachable {
            url: self.list_url.clone(),
            message: e.to_string(),
        })?;

        let records: Vec<PersonaRecord> =
            serde_json::from_str(&body).map_err(|e| Error::malformed(self.list_url.clone(), e))?;

        debug!(url = %self.list_url, count = records.len(), "Personas fetched");
        Ok(records)
    }

    async fn update_display_priorities(&self, priorities: &PriorityMap) -> Result<()> {
        let body = DisplayPriorityRequest {
            display_priority_map: priorities.clone(),
        };

        self.send(
            &self.priority_url,
            self.client.patch(&self.priority_url).json(&body),
        )
        .await?;

        info!(url = %self.priority_url, count = priorities.len(), "Display priorities saved");
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
