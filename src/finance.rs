// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::amount::parse_monthly_amount;
use crate::db::{FINANCE_KEY, read_json, write_json};
use crate::error::{LedgerError, Result};
use crate::ledger::new_id;
use crate::models::{Expense, FinanceInfo, Investment, Subscription};
use rusqlite::Connection;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Subscription,
    Investment,
    Expense,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::Subscription => "subscription",
            EntryKind::Investment => "investment",
            EntryKind::Expense => "expense",
        })
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subscription" => Ok(EntryKind::Subscription),
            "investment" => Ok(EntryKind::Investment),
            "expense" => Ok(EntryKind::Expense),
            other => Err(format!(
                "Unknown entry kind '{}', expected subscription|investment|expense",
                other
            )),
        }
    }
}

/// Field changes for a finance entry. Fields that the entry kind does not
/// carry are rejected.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub name: Option<String>,
    pub amount: Option<String>,
    pub cycle: Option<String>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub note: Option<String>,
}

impl FinanceInfo {
    /// Expected monthly outflow from the expense list, to the whole unit.
    pub fn estimated_expense(&self) -> Decimal {
        self.expenses
            .iter()
            .map(|e| parse_monthly_amount(&e.amount, &e.cycle))
            .sum::<Decimal>()
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn balance(&self) -> Decimal {
        self.income - self.estimated_expense()
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(LedgerError::Validation(format!("{} must not be empty", field)));
    }
    Ok(v.to_string())
}

fn optional_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn not_applicable(field: &str, kind: EntryKind) -> LedgerError {
    LedgerError::Validation(format!(
        "Field '{}' does not apply to {} entries",
        field, kind
    ))
}

/// Owner of the `financeData` blob.
pub struct FinanceBook<'c> {
    conn: &'c Connection,
    info: Option<FinanceInfo>,
}

impl<'c> FinanceBook<'c> {
    pub fn load(conn: &'c Connection) -> Result<Self> {
        let info = read_json(conn, FINANCE_KEY)?;
        Ok(FinanceBook { conn, info })
    }

    pub fn info(&self) -> Option<&FinanceInfo> {
        self.info.as_ref()
    }

    fn info_mut(&mut self) -> &mut FinanceInfo {
        self.info.get_or_insert_with(FinanceInfo::default)
    }

    fn save(&self) -> Result<()> {
        match &self.info {
            Some(info) => write_json(self.conn, FINANCE_KEY, info),
            None => Ok(()),
        }
    }

    pub fn set_income(&mut self, income: Decimal) -> Result<()> {
        if income.is_sign_negative() && !income.is_zero() {
            return Err(LedgerError::Validation(format!(
                "Income must not be negative (got {})",
                income
            )));
        }
        self.info_mut().income = income;
        tracing::info!(%income, "income updated");
        self.save()
    }

    pub fn add_subscription(
        &mut self,
        name: &str,
        amount: &str,
        cycle: &str,
        currency: &str,
    ) -> Result<String> {
        let entry = Subscription {
            id: new_id(),
            name: required("Name", name)?,
            amount: required("Amount", amount)?,
            cycle: required("Cycle", cycle)?,
            currency: required("Currency", currency)?,
        };
        let id = entry.id.clone();
        self.info_mut().subscriptions.push(entry);
        self.save()?;
        Ok(id)
    }

    pub fn add_investment(
        &mut self,
        category: &str,
        name: &str,
        amount: &str,
        cycle: &str,
        note: Option<&str>,
    ) -> Result<String> {
        let entry = Investment {
            id: new_id(),
            category: required("Category", category)?,
            name: required("Name", name)?,
            amount: required("Amount", amount)?,
            cycle: required("Cycle", cycle)?,
            note: optional_note(note),
        };
        let id = entry.id.clone();
        self.info_mut().investments.push(entry);
        self.save()?;
        Ok(id)
    }

    pub fn add_expense(
        &mut self,
        name: &str,
        amount: &str,
        cycle: &str,
        note: Option<&str>,
    ) -> Result<String> {
        let entry = Expense {
            id: new_id(),
            name: required("Name", name)?,
            amount: required("Amount", amount)?,
            cycle: required("Cycle", cycle)?,
            note: optional_note(note),
        };
        let id = entry.id.clone();
        self.info_mut().expenses.push(entry);
        self.save()?;
        Ok(id)
    }

    pub fn update_entry(&mut self, kind: EntryKind, id: &str, patch: EntryPatch) -> Result<()> {
        let missing = || LedgerError::ItemNotFound(id.to_string());
        let info = self.info.as_mut().ok_or_else(missing)?;
        match kind {
            EntryKind::Subscription => {
                if patch.category.is_some() {
                    return Err(not_applicable("category", kind));
                }
                if patch.note.is_some() {
                    return Err(not_applicable("note", kind));
                }
                let s = info
                    .subscriptions
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or_else(missing)?;
                if let Some(v) = patch.name {
                    s.name = required("Name", &v)?;
                }
                if let Some(v) = patch.amount {
                    s.amount = required("Amount", &v)?;
                }
                if let Some(v) = patch.cycle {
                    s.cycle = required("Cycle", &v)?;
                }
                if let Some(v) = patch.currency {
                    s.currency = required("Currency", &v)?;
                }
            }
            EntryKind::Investment => {
                if patch.currency.is_some() {
                    return Err(not_applicable("currency", kind));
                }
                let inv = info
                    .investments
                    .iter_mut()
                    .find(|i| i.id == id)
                    .ok_or_else(missing)?;
                if let Some(v) = patch.category {
                    inv.category = required("Category", &v)?;
                }
                if let Some(v) = patch.name {
                    inv.name = required("Name", &v)?;
                }
                if let Some(v) = patch.amount {
                    inv.amount = required("Amount", &v)?;
                }
                if let Some(v) = patch.cycle {
                    inv.cycle = required("Cycle", &v)?;
                }
                if let Some(v) = patch.note {
                    inv.note = optional_note(Some(&v));
                }
            }
            EntryKind::Expense => {
                if patch.currency.is_some() {
                    return Err(not_applicable("currency", kind));
                }
                if patch.category.is_some() {
                    return Err(not_applicable("category", kind));
                }
                let e = info
                    .expenses
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(missing)?;
                if let Some(v) = patch.name {
                    e.name = required("Name", &v)?;
                }
                if let Some(v) = patch.amount {
                    e.amount = required("Amount", &v)?;
                }
                if let Some(v) = patch.cycle {
                    e.cycle = required("Cycle", &v)?;
                }
                if let Some(v) = patch.note {
                    e.note = optional_note(Some(&v));
                }
            }
        }
        tracing::info!(%kind, id, "finance entry updated");
        self.save()
    }

    pub fn remove_entry(&mut self, kind: EntryKind, id: &str) -> Result<()> {
        let info = self
            .info
            .as_mut()
            .ok_or_else(|| LedgerError::ItemNotFound(id.to_string()))?;
        let removed = match kind {
            EntryKind::Subscription => {
                let n = info.subscriptions.len();
                info.subscriptions.retain(|s| s.id != id);
                n != info.subscriptions.len()
            }
            EntryKind::Investment => {
                let n = info.investments.len();
                info.investments.retain(|i| i.id != id);
                n != info.investments.len()
            }
            EntryKind::Expense => {
                let n = info.expenses.len();
                info.expenses.retain(|e| e.id != id);
                n != info.expenses.len()
            }
        };
        if !removed {
            return Err(LedgerError::ItemNotFound(id.to_string()));
        }
        tracing::info!(%kind, id, "finance entry removed");
        self.save()
    }
}
