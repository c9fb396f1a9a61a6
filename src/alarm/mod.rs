pub mod error;
pub mod model;
pub mod schema;
pub mod storage;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use model::{seed_alarms, Alarm, Days};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{AlarmStore, DuplicatePolicy, STORAGE_KEY};
