// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{FINANCE_KEY, MONTHLY_RECORDS_KEY, USER_KEY, get_blob};
use crate::models::{FinanceInfo, MonthlyRecord, User};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use std::collections::HashSet;

/// Every problem found, as (issue, detail) pairs.
pub fn diagnose(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut issues = Vec::new();

    // 1) Blobs that no longer parse
    let records: Vec<MonthlyRecord> = match get_blob(conn, MONTHLY_RECORDS_KEY)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                issues.push(("corrupt_blob".into(), format!("{}: {}", MONTHLY_RECORDS_KEY, e)));
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    if let Some(raw) = get_blob(conn, FINANCE_KEY)? {
        if let Err(e) = serde_json::from_str::<FinanceInfo>(&raw) {
            issues.push(("corrupt_blob".into(), format!("{}: {}", FINANCE_KEY, e)));
        }
    }
    if let Some(raw) = get_blob(conn, USER_KEY)? {
        if let Err(e) = serde_json::from_str::<User>(&raw) {
            issues.push(("corrupt_blob".into(), format!("{}: {}", USER_KEY, e)));
        }
    }

    // 2) Month identifiers must be unique
    let mut months = HashSet::new();
    for rec in &records {
        if !months.insert(rec.month.as_str()) {
            issues.push(("duplicate_month".into(), rec.month.clone()));
        }
    }

    // 3) Cached totals must equal the item sums; item ids must be unique
    let mut item_ids = HashSet::new();
    for rec in &records {
        if rec.totals_drifted() {
            let t = crate::ledger::recompute(&rec.items);
            issues.push((
                "totals_drift".into(),
                format!(
                    "{} cached {}/{} vs items {}/{}",
                    rec.month, rec.income, rec.expense, t.income, t.expense
                ),
            ));
        }
        for item in &rec.items {
            if !item_ids.insert(item.id.as_str()) {
                issues.push(("duplicate_item_id".into(), format!("{} {}", rec.month, item.id)));
            }
        }
    }

    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows: Vec<Vec<String>> = diagnose(conn)?
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
