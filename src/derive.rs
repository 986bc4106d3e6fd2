// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Seeding a new month of the ledger.
//!
//! A new month is filled from the finance info snapshot when one exists,
//! otherwise from the latest recorded month. Either way every item gets a
//! fresh id and the inputs are left untouched.

use crate::amount::parse_monthly_amount;
use crate::error::{LedgerError, Result};
use crate::ledger::new_id;
use crate::models::{FinanceInfo, ItemKind, LineItem, MonthlyRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const INCOME_CATEGORY: &str = "income";
pub const SUBSCRIPTION_CATEGORY: &str = "subscription";
pub const FALLBACK_EXPENSE_CATEGORY: &str = "daily";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeriveSource {
    #[default]
    Auto,
    Previous,
    Finance,
    Empty,
}

impl FromStr for DeriveSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(DeriveSource::Auto),
            "previous" => Ok(DeriveSource::Previous),
            "finance" => Ok(DeriveSource::Finance),
            "empty" => Ok(DeriveSource::Empty),
            other => Err(format!(
                "Unknown source '{}', expected auto|previous|finance|empty",
                other
            )),
        }
    }
}

pub fn latest_record(records: &[MonthlyRecord]) -> Option<&MonthlyRecord> {
    records.iter().max_by(|a, b| a.month.cmp(&b.month))
}

/// Build the record for `month`: import from `finance` when given, else
/// clone the latest of `existing`, else start empty.
pub fn derive_new_month(
    month: &str,
    existing: &[MonthlyRecord],
    finance: Option<&FinanceInfo>,
) -> MonthlyRecord {
    match finance {
        Some(info) => from_finance(month, info),
        None => match latest_record(existing) {
            Some(prev) => clone_month(month, prev),
            None => MonthlyRecord::new(month, None),
        },
    }
}

/// Same as [`derive_new_month`] but lets the caller force a strategy.
pub fn derive_with_source(
    month: &str,
    existing: &[MonthlyRecord],
    finance: Option<&FinanceInfo>,
    source: DeriveSource,
) -> Result<MonthlyRecord> {
    match source {
        DeriveSource::Auto => Ok(derive_new_month(month, existing, finance)),
        DeriveSource::Previous => Ok(derive_new_month(month, existing, None)),
        DeriveSource::Finance => finance
            .map(|info| from_finance(month, info))
            .ok_or(LedgerError::NoFinanceInfo),
        DeriveSource::Empty => Ok(MonthlyRecord::new(month, None)),
    }
}

pub fn clone_month(month: &str, source: &MonthlyRecord) -> MonthlyRecord {
    let mut rec = MonthlyRecord::new(month, None);
    rec.items = source
        .items
        .iter()
        .map(|item| LineItem {
            id: new_id(),
            ..item.clone()
        })
        .collect();
    rec.refresh_totals();
    rec
}

pub fn from_finance(month: &str, info: &FinanceInfo) -> MonthlyRecord {
    let mut rec = MonthlyRecord::new(month, None);

    if info.income > Decimal::ZERO {
        rec.items.push(LineItem {
            id: new_id(),
            name: INCOME_CATEGORY.to_string(),
            amount: info.income,
            kind: ItemKind::Income,
            category: INCOME_CATEGORY.to_string(),
        });
    }

    for e in &info.expenses {
        let amount = parse_monthly_amount(&e.amount, &e.cycle);
        if amount <= Decimal::ZERO {
            continue;
        }
        let category = e
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(FALLBACK_EXPENSE_CATEGORY);
        rec.items.push(LineItem {
            id: new_id(),
            name: e.name.clone(),
            amount,
            kind: ItemKind::Expense,
            category: category.to_string(),
        });
    }

    for s in &info.subscriptions {
        let amount = parse_monthly_amount(&s.amount, &s.cycle);
        if amount <= Decimal::ZERO {
            continue;
        }
        rec.items.push(LineItem {
            id: new_id(),
            name: s.name.clone(),
            amount,
            kind: ItemKind::Expense,
            category: SUBSCRIPTION_CATEGORY.to_string(),
        });
    }

    rec.refresh_totals();
    rec
}
