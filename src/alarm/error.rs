use thiserror::Error;

use super::storage::StorageError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read alarms: {0}")]
    Read(#[source] StorageError),

    #[error("failed to save alarms: {0}")]
    Write(#[source] StorageError),

    #[error("stored alarms are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("stored alarms use schema version {found}, newest supported is {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("an alarm with id `{0}` already exists")]
    DuplicateId(String),

    #[error("alarms have not been loaded")]
    NotLoaded,
}

pub type StoreResult<T> = Result<T, StoreError>;
