//! On-disk format of the alarm collection.
//!
//! Current payload is `{"version": 1, "alarms": [...]}`. Version 0 is the
//! original bare JSON array and is upgraded on load.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{StoreError, StoreResult};
use super::model::Alarm;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    alarms: &'a [Alarm],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    alarms: Vec<Alarm>,
}

#[derive(Debug, PartialEq)]
pub struct Decoded {
    pub alarms: Vec<Alarm>,
    pub version: u32,
}

impl Decoded {
    pub fn needs_migration(&self) -> bool {
        self.version < SCHEMA_VERSION
    }
}

pub fn encode(alarms: &[Alarm]) -> StoreResult<String> {
    let envelope = EnvelopeRef {
        version: SCHEMA_VERSION,
        alarms,
    };
    Ok(serde_json::to_string(&envelope)?)
}

pub fn decode(raw: &str) -> StoreResult<Decoded> {
    let value: Value = serde_json::from_str(raw)?;

    if value.is_array() {
        let alarms: Vec<Alarm> = serde_json::from_value(value)?;
        return Ok(Decoded { alarms, version: 0 });
    }
    if !value.is_object() {
        return Err(serde_json::Error::custom("expected an array or an object").into());
    }

    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| serde_json::Error::custom("missing schema version"))?;
    let version = u32::try_from(version).unwrap_or(u32::MAX);
    if version > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    let envelope: Envelope = serde_json::from_value(value)?;
    Ok(Decoded {
        alarms: envelope.alarms,
        version: envelope.version,
    })
}
