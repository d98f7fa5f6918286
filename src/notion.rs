use crate::config::NotionConfig;
use crate::errors::SourceError;
use crate::models::{DatabaseInfo, NotionPage};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const PAGE_SIZE: u32 = 100;
const UNTITLED: &str = "Untitled Database";

#[derive(Deserialize)]
struct RichText {
    #[serde(default)]
    plain_text: String,
}

#[derive(Deserialize)]
struct DatabaseObject {
    #[serde(default)]
    title: Vec<RichText>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<NotionPage>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

/// Client for the Notion REST API. Built once at startup and shared
/// through the application state.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    config: NotionConfig,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub async fn retrieve_database(&self, database_id: &str) -> Result<DatabaseInfo, SourceError> {
        let url = format!("{}/databases/{database_id}", self.config.base_url);
        let request = self.http.get(url).headers(self.headers()?);
        let database: DatabaseObject = send(request).await?;

        let title = database
            .title
            .into_iter()
            .next()
            .map(|text| text.plain_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        Ok(DatabaseInfo { title })
    }

    /// Every page in the database, following pagination cursors.
    pub async fn query_database(&self, database_id: &str) -> Result<Vec<NotionPage>, SourceError> {
        let url = format!("{}/databases/{database_id}/query", self.config.base_url);
        let headers = self.headers()?;
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = serde_json::json!({ "page_size": PAGE_SIZE });
            if let Some(cursor) = &cursor {
                body["start_cursor"] = serde_json::Value::String(cursor.clone());
            }

            let request = self.http.post(&url).headers(headers.clone()).json(&body);
            let response: QueryResponse = send(request).await?;
            debug!(database = database_id, batch = response.results.len(), "fetched pages");
            pages.extend(response.results);

            match response.next_cursor {
                Some(next) if response.has_more => cursor = Some(next),
                _ => break,
            }
        }

        info!(database = database_id, pages = pages.len(), "queried database");
        Ok(pages)
    }

    fn headers(&self) -> Result<HeaderMap, SourceError> {
        let key = self.config.api_key.as_deref().ok_or(SourceError::MissingApiKey)?;
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| SourceError::InvalidApiKey)?;
        headers.insert(AUTHORIZATION, auth);
        let version = HeaderValue::from_str(&self.config.notion_version)
            .map_err(|_| SourceError::InvalidVersion(self.config.notion_version.clone()))?;
        headers.insert("notion-version", version);
        Ok(headers)
    }
}

async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, SourceError> {
    let response = request.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        return Err(SourceError::Status {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Notion database ids are 32 ASCII alphanumerics.
pub fn is_valid_database_id(id: &str) -> bool {
    id.len() == 32 && id.bytes().all(|b| b.is_ascii_alphanumeric())
}
