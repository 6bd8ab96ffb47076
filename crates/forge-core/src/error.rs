use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("not initialized: sidebar accessed outside an active provider")]
    NotInitialized,

    #[error("invalid date '{0}': expected YYYY-MM-DD or an ISO-8601 date-time")]
    InvalidDate(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("config not found: run 'forge config init'")]
    ConfigNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
