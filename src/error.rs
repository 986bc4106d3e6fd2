// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised by the ledger core. Command handlers wrap these in
/// `anyhow` with extra context.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Month '{0}' already has a record")]
    MonthTaken(String),
    #[error("Record '{0}' not found")]
    RecordNotFound(String),
    #[error("No record for month '{0}'")]
    MonthNotFound(String),
    #[error("Item '{0}' not found")]
    ItemNotFound(String),
    #[error("No finance info has been recorded yet")]
    NoFinanceInfo,
    #[error("{0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
