use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One timestamped prestige observation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// UTC time the observation was accepted.
    #[serde(deserialize_with = "deserialize_utc")]
    pub timestamp: DateTime<Utc>,
    pub prestige: u64,
}

impl Record {
    pub fn new(timestamp: DateTime<Utc>, prestige: u64) -> Self {
        Self { timestamp, prestige }
    }
}

/// Accepts RFC 3339 timestamps as well as the offset-less ISO-8601 form
/// (`2024-05-01T12:34:56.123456`) that older data files contain.
fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid timestamp \"{raw}\""))
    })
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// The complete ordered set of persisted records.
///
/// Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<Record>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Stable sort by timestamp; records sharing a timestamp keep append order.
    pub fn sort_chronologically(&mut self) {
        self.records.sort_by_key(|r| r.timestamp);
    }

    /// Chronologically-last record, regardless of append order.
    pub fn latest(&self) -> Option<&Record> {
        // max_by_key returns the last maximum, matching a stable sort.
        self.records.iter().max_by_key(|r| r.timestamp)
    }
}

impl From<Vec<Record>> for History {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}
