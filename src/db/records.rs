//! `RecordStore` backed by the embedded database.
//!
//! All database work runs on the blocking thread pool. The upsert
//! performs its read-modify-write inside a single write transaction,
//! so concurrent submissions for the same (user, date) serialize and
//! both increments survive.

use async_trait::async_trait;
use redb::ReadableTable;
use tokio::task;

use crate::db::{tables, Db};
use crate::error::Result;
use crate::models::TimeRecord;
use crate::records::{RecordStore, UpsertOutcome};

#[async_trait]
impl RecordStore for Db {
    async fn find_by_user_and_date(
        &self,
        user_id: &str,
        date: &str,
    ) -> Result<Option<TimeRecord>> {
        let db = self.clone();
        let user_id = user_id.to_string();
        let date = date.to_string();

        task::spawn_blocking(move || -> Result<Option<TimeRecord>> {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(tables::RECORDS)?;

            match table.get((user_id.as_str(), date.as_str()))? {
                Some(guard) => {
                    let record: TimeRecord = bincode::deserialize(guard.value())?;
                    Ok(Some(record))
                }
                None => Ok(None),
            }
        })
        .await?
    }

    async fn upsert_increment(
        &self,
        user_id: &str,
        date: &str,
        time_sec: i64,
        pomodoros: i64,
    ) -> Result<UpsertOutcome> {
        let db = self.clone();
        let user_id = user_id.to_string();
        let date = date.to_string();

        task::spawn_blocking(move || -> Result<UpsertOutcome> {
            let write_txn = db.begin_write()?;
            let outcome;
            {
                let mut table = write_txn.open_table(tables::RECORDS)?;
                let key = (user_id.as_str(), date.as_str());

                let mut record = match table.get(key)? {
                    Some(guard) => {
                        outcome = UpsertOutcome::Updated;
                        bincode::deserialize::<TimeRecord>(guard.value())?
                    }
                    None => {
                        outcome = UpsertOutcome::Created;
                        TimeRecord::default()
                    }
                };

                record.time_sec += time_sec;
                record.pomodoros += pomodoros;

                let encoded = bincode::serialize(&record)?;
                table.insert(key, encoded.as_slice())?;
            }
            write_txn.commit()?;

            Ok(outcome)
        })
        .await?
    }

    async fn sum_in_range(&self, user_id: &str, start: &str, end: &str) -> Result<TimeRecord> {
        let db = self.clone();
        let user_id = user_id.to_string();
        let start = start.to_string();
        let end = end.to_string();

        task::spawn_blocking(move || -> Result<TimeRecord> {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(tables::RECORDS)?;

            let lo = (user_id.as_str(), start.as_str());
            let hi = (user_id.as_str(), end.as_str());

            let mut total = TimeRecord::default();
            for entry in table.range(lo..=hi)? {
                let (_, guard) = entry?;
                let record: TimeRecord = bincode::deserialize(guard.value())?;
                total.time_sec += record.time_sec;
                total.pomodoros += record.pomodoros;
            }

            Ok(total)
        })
        .await?
    }
}
