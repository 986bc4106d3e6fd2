// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{MONTHLY_RECORDS_KEY, read_json, write_json};
use crate::error::{LedgerError, Result};
use crate::models::MonthlyRecord;
use rusqlite::Connection;

/// The monthly ledger. Loaded once from the `monthlyRecords` blob and
/// written back in full after every mutation.
pub struct LedgerStore<'c> {
    conn: &'c Connection,
    records: Vec<MonthlyRecord>,
}

impl<'c> LedgerStore<'c> {
    pub fn load(conn: &'c Connection) -> Result<Self> {
        let records: Vec<MonthlyRecord> =
            read_json(conn, MONTHLY_RECORDS_KEY)?.unwrap_or_default();
        tracing::debug!(count = records.len(), "ledger loaded");
        Ok(LedgerStore { conn, records })
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MonthlyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_month(&self, month: &str) -> Option<&MonthlyRecord> {
        self.records.iter().find(|r| r.month == month)
    }

    pub fn latest(&self) -> Option<&MonthlyRecord> {
        crate::derive::latest_record(&self.records)
    }

    /// The last `n` months, oldest first.
    pub fn recent(&self, n: usize) -> Vec<&MonthlyRecord> {
        let mut sorted: Vec<&MonthlyRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.month.cmp(&a.month));
        sorted.truncate(n);
        sorted.reverse();
        sorted
    }

    /// Insert or replace by id. A month held by a different record is
    /// rejected rather than silently duplicated.
    pub fn upsert(&mut self, record: MonthlyRecord) -> Result<()> {
        if self
            .records
            .iter()
            .any(|r| r.month == record.month && r.id != record.id)
        {
            return Err(LedgerError::MonthTaken(record.month));
        }
        let mut next = self.records.clone();
        match next.iter().position(|r| r.id == record.id) {
            Some(idx) => {
                tracing::info!(month = %record.month, "record updated");
                next[idx] = record;
            }
            None => {
                tracing::info!(month = %record.month, items = record.items.len(), "record created");
                next.push(record);
            }
        }
        self.commit(next)
    }

    pub fn delete(&mut self, id: &str) -> Result<MonthlyRecord> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LedgerError::RecordNotFound(id.to_string()))?;
        let mut next = self.records.clone();
        let removed = next.remove(idx);
        self.commit(next)?;
        tracing::info!(month = %removed.month, "record deleted");
        Ok(removed)
    }

    /// Run `f` against the record for `month` and persist the result. The
    /// closure works on a copy so a failed edit leaves the store unchanged.
    pub fn modify_month<T>(
        &mut self,
        month: &str,
        f: impl FnOnce(&mut MonthlyRecord) -> Result<T>,
    ) -> Result<T> {
        let mut rec = self
            .find_by_month(month)
            .cloned()
            .ok_or_else(|| LedgerError::MonthNotFound(month.to_string()))?;
        let out = f(&mut rec)?;
        self.upsert(rec)?;
        Ok(out)
    }

    /// Persist `next` and only then make it the in-memory state.
    fn commit(&mut self, next: Vec<MonthlyRecord>) -> Result<()> {
        write_json(self.conn, MONTHLY_RECORDS_KEY, &next)?;
        self.records = next;
        Ok(())
    }
}
