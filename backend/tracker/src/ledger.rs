//! Validated, serialized appends to the prestige history.
//!
//! Prestige only ever goes up: a candidate must be strictly greater than
//! the chronologically-latest record to be stored. The read-compare-write
//! sequence runs under one async mutex so two concurrent submissions can
//! never both read the same history and drop each other's record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use prestigebot_core::{History, HistoryStore, Record, TrackerError};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(Record),
    /// Candidate is lower than the latest recorded value. Nothing stored.
    Regression { latest: u64, candidate: u64 },
    /// Candidate equals the latest recorded value. Nothing stored.
    Duplicate { value: u64 },
}

pub struct Ledger {
    store: Arc<dyn HistoryStore>,
    write_lock: Mutex<()>,
}

impl Ledger {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Current history, sorted by timestamp.
    pub async fn history(&self) -> Result<History, TrackerError> {
        let mut history = self.store.load().await?;
        history.sort_chronologically();
        Ok(history)
    }

    pub async fn submit(&self, candidate: u64) -> Result<SubmitOutcome, TrackerError> {
        self.submit_at(candidate, Utc::now()).await
    }

    /// Same as [`Ledger::submit`] with an explicit clock reading.
    ///
    /// The stored timestamp is never earlier than the latest record's, so
    /// append order and timestamp order stay identical.
    pub async fn submit_at(
        &self,
        candidate: u64,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, TrackerError> {
        let _guard = self.write_lock.lock().await;

        let mut history = self.store.load().await?;
        history.sort_chronologically();

        let timestamp = match history.latest() {
            None => now,
            Some(latest) if candidate < latest.prestige => {
                info!(latest = latest.prestige, candidate, "Rejected prestige regression");
                return Ok(SubmitOutcome::Regression {
                    latest: latest.prestige,
                    candidate,
                });
            }
            Some(latest) if candidate == latest.prestige => {
                info!(value = candidate, "Prestige already logged");
                return Ok(SubmitOutcome::Duplicate { value: candidate });
            }
            Some(latest) => now.max(latest.timestamp),
        };

        let record = Record::new(timestamp, candidate);
        history.push(record.clone());
        self.store.save(&history).await?;

        info!(value = candidate, records = history.len(), "Accepted prestige");
        Ok(SubmitOutcome::Accepted(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryHistoryStore;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn ledger_with(values: &[u64]) -> (Arc<MemoryHistoryStore>, Ledger) {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::new(t0() + Duration::hours(i as i64), *v))
            .collect::<Vec<_>>();
        let store = Arc::new(MemoryHistoryStore::with_history(History::from(records)));
        let ledger = Ledger::new(store.clone());
        (store, ledger)
    }

    #[tokio::test]
    async fn empty_history_accepts_anything() {
        let (store, ledger) = ledger_with(&[]);
        let outcome = ledger.submit_at(100, t0()).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Accepted(Record::new(t0(), 100)));
        let stored = store.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.records()[0].prestige, 100);
    }

    #[tokio::test]
    async fn higher_value_is_appended_last() {
        let (store, ledger) = ledger_with(&[100, 500]);
        let now = t0() + Duration::days(1);
        let outcome = ledger.submit_at(501, now).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
        let stored = store.snapshot();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored.records().last(), Some(&Record::new(now, 501)));
    }

    #[tokio::test]
    async fn equal_value_is_duplicate_and_leaves_history_alone() {
        let (store, ledger) = ledger_with(&[100, 500]);
        let before = store.snapshot();

        let outcome = ledger.submit(500).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Duplicate { value: 500 });
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn lower_value_is_regression_and_leaves_history_alone() {
        let (store, ledger) = ledger_with(&[100, 500]);
        let before = store.snapshot();

        let outcome = ledger.submit(300).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Regression { latest: 500, candidate: 300 });
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn compares_against_chronological_latest() {
        // Appended out of order: the 900 record is newer by timestamp.
        let history = History::from(vec![
            Record::new(t0() + Duration::hours(5), 900),
            Record::new(t0(), 100),
        ]);
        let ledger = Ledger::new(Arc::new(MemoryHistoryStore::with_history(history)));

        let outcome = ledger.submit(500).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Regression { latest: 900, candidate: 500 });
    }

    #[tokio::test]
    async fn clock_skew_never_orders_new_record_before_latest() {
        let (store, ledger) = ledger_with(&[100]);
        let skewed = t0() - Duration::days(3);
        ledger.submit_at(200, skewed).await.unwrap();

        let stored = store.snapshot();
        let last = stored.records().last().unwrap();
        assert_eq!(last.prestige, 200);
        assert_eq!(last.timestamp, t0());
        assert_eq!(stored.latest().map(|r| r.prestige), Some(200));
    }

    #[tokio::test]
    async fn concurrent_submissions_do_not_lose_records() {
        let (store, ledger) = ledger_with(&[]);
        let ledger = Arc::new(ledger);

        let handles: Vec<_> = (1..=20u64)
            .map(|v| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.submit(v * 10).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.snapshot();
        let values: Vec<u64> = stored.records().iter().map(|r| r.prestige).collect();
        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(values, sorted, "stored values must be strictly increasing");
        sorted.dedup();
        assert_eq!(sorted.len(), values.len());
    }

    struct FailingStore;

    #[async_trait]
    impl HistoryStore for FailingStore {
        async fn load(&self) -> Result<History, TrackerError> {
            Ok(History::new())
        }
        async fn save(&self, _history: &History) -> Result<(), TrackerError> {
            Err(TrackerError::Storage("read-only filesystem".into()))
        }
    }

    #[tokio::test]
    async fn persistence_failure_is_propagated() {
        let ledger = Ledger::new(Arc::new(FailingStore));
        let err = ledger.submit(10).await.unwrap_err();
        assert!(matches!(err, TrackerError::Storage(_)));
    }
}
