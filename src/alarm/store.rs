use std::sync::Arc;

use log::{debug, info, warn};
use serde::Deserialize;

use super::error::{StoreError, StoreResult};
use super::model::{seed_alarms, Alarm};
use super::schema;
use super::storage::KeyValueStorage;

pub const STORAGE_KEY: &str = "@alarms";

/// What `append` does with an incoming alarm whose id is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep both copies.
    #[default]
    Allow,
    /// Fail the whole append and write nothing.
    Reject,
    /// Last write wins, replacing the stored alarm in place.
    Replace,
}

/// Owns the alarm collection and mirrors it to storage after every change.
///
/// The in-memory list is only updated once the write has succeeded.
pub struct AlarmStore {
    storage: Arc<dyn KeyValueStorage>,
    policy: DuplicatePolicy,
    alarms: Vec<Alarm>,
    loaded: bool,
}

impl AlarmStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            policy: DuplicatePolicy::default(),
            alarms: Vec::new(),
            loaded: false,
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reads the stored collection, seeding it on first run.
    ///
    /// On failure the collection is left empty and the store unloaded.
    pub async fn load(&mut self) -> StoreResult<&[Alarm]> {
        self.alarms.clear();
        self.loaded = false;

        let raw = self
            .storage
            .get(STORAGE_KEY)
            .await
            .map_err(StoreError::Read)?;

        let alarms = match raw {
            None => {
                let seed = seed_alarms();
                self.persist(&seed).await?;
                info!("event=alarms_seeded module=store count={}", seed.len());
                seed
            }
            Some(raw) => {
                let decoded = schema::decode(&raw)?;
                if decoded.needs_migration() {
                    self.persist(&decoded.alarms).await?;
                    info!(
                        "event=alarms_migrated module=store from={} to={}",
                        decoded.version,
                        schema::SCHEMA_VERSION
                    );
                }
                decoded.alarms
            }
        };

        debug!("event=alarms_loaded module=store count={}", alarms.len());
        self.alarms = alarms;
        self.loaded = true;
        Ok(&self.alarms)
    }

    /// Adds `new_alarms` after the existing ones and persists the result.
    pub async fn append(&mut self, new_alarms: Vec<Alarm>) -> StoreResult<&[Alarm]> {
        self.ensure_loaded()?;
        let added = new_alarms.len();
        let merged = merge(&self.alarms, new_alarms, self.policy)?;
        self.persist(&merged).await?;
        info!(
            "event=alarms_appended module=store added={} total={} policy={:?}",
            added,
            merged.len(),
            self.policy
        );
        self.alarms = merged;
        Ok(&self.alarms)
    }

    /// Drops every alarm with `id`. Unknown ids are not an error.
    pub async fn remove(&mut self, id: &str) -> StoreResult<&[Alarm]> {
        self.ensure_loaded()?;
        let remaining: Vec<Alarm> = self
            .alarms
            .iter()
            .filter(|alarm| alarm.id != id)
            .cloned()
            .collect();
        let removed = self.alarms.len() - remaining.len();
        self.persist(&remaining).await?;
        info!(
            "event=alarm_removed module=store id={} removed={} total={}",
            id,
            removed,
            remaining.len()
        );
        self.alarms = remaining;
        Ok(&self.alarms)
    }

    fn ensure_loaded(&self) -> StoreResult<()> {
        if self.loaded {
            Ok(())
        } else {
            warn!("event=store_not_loaded module=store");
            Err(StoreError::NotLoaded)
        }
    }

    async fn persist(&self, alarms: &[Alarm]) -> StoreResult<()> {
        let raw = schema::encode(alarms)?;
        self.storage
            .set(STORAGE_KEY, &raw)
            .await
            .map_err(StoreError::Write)
    }
}

fn merge(
    existing: &[Alarm],
    incoming: Vec<Alarm>,
    policy: DuplicatePolicy,
) -> StoreResult<Vec<Alarm>> {
    let mut merged = existing.to_vec();

    match policy {
        DuplicatePolicy::Allow => merged.extend(incoming),
        DuplicatePolicy::Reject => {
            for (i, alarm) in incoming.iter().enumerate() {
                let clashes = existing.iter().any(|a| a.id == alarm.id)
                    || incoming[..i].iter().any(|a| a.id == alarm.id);
                if clashes {
                    return Err(StoreError::DuplicateId(alarm.id.clone()));
                }
            }
            merged.extend(incoming);
        }
        DuplicatePolicy::Replace => {
            for alarm in incoming {
                match merged.iter_mut().find(|a| a.id == alarm.id) {
                    Some(slot) => *slot = alarm,
                    None => merged.push(alarm),
                }
            }
        }
    }

    Ok(merged)
}
