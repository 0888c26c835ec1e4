use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a raw climate table is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TableSource {
    File(PathBuf),
    Url(String),
}

impl TableSource {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            TableSource::Url(s.to_string())
        } else {
            TableSource::File(PathBuf::from(s))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TableSource::File(path) => path.display().to_string(),
            TableSource::Url(url) => url.clone(),
        }
    }
}

impl From<String> for TableSource {
    fn from(s: String) -> Self {
        TableSource::parse(&s)
    }
}

impl From<TableSource> for String {
    fn from(source: TableSource) -> Self {
        source.describe()
    }
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Fetches raw table text. One request per table, no retries.
pub struct TableClient {
    client: reqwest::Client,
}

impl TableClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, source: &TableSource) -> Result<String> {
        tracing::debug!("Fetching table from {}", source);
        match source {
            TableSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                AdvisorError::DataSourceUnavailable(format!("{}: {}", path.display(), e))
            }),
            TableSource::Url(url) => {
                let response =
                    self.client.get(url).send().await.map_err(|e| {
                        AdvisorError::DataSourceUnavailable(format!("{}: {}", url, e))
                    })?;

                if !response.status().is_success() {
                    let status = response.status();
                    return Err(AdvisorError::DataSourceUnavailable(format!(
                        "{} returned {}",
                        url, status
                    )));
                }

                Ok(response.text().await?)
            }
        }
    }

    pub async fn test_source(&self, source: &TableSource) -> Result<bool> {
        match source {
            TableSource::File(path) => Ok(tokio::fs::metadata(path).await.is_ok()),
            TableSource::Url(url) => {
                let response = self.client.head(url).send().await?;
                Ok(response.status().is_success())
            }
        }
    }
}
