use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Malformed {table} table: {reason}")]
    MalformedTable { table: String, reason: String },

    #[error("Invalid crop catalog: {0}")]
    InvalidCatalog(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl AdvisorError {
    pub fn malformed(table: &str, reason: impl Into<String>) -> Self {
        AdvisorError::MalformedTable {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
