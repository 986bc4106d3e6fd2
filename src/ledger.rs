// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, Result};
use crate::models::{ItemKind, LineItem, MonthlyRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

pub fn recompute(items: &[LineItem]) -> Totals {
    items.iter().fold(Totals::default(), |mut acc, item| {
        match item.kind {
            ItemKind::Income => acc.income += item.amount,
            ItemKind::Expense => acc.expense += item.amount,
        }
        acc
    })
}

/// Expense totals per category, in first-seen order. Income is ignored.
pub fn category_breakdown(items: &[LineItem]) -> Vec<(String, Decimal)> {
    let mut out: Vec<(String, Decimal)> = Vec::new();
    for item in items.iter().filter(|i| i.kind == ItemKind::Expense) {
        match out.iter_mut().find(|(cat, _)| *cat == item.category) {
            Some((_, sum)) => *sum += item.amount,
            None => out.push((item.category.clone(), item.amount)),
        }
    }
    out
}

/// Field changes for an existing line item. The kind is fixed at creation.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::Validation(format!(
            "Amount must not be negative (got {})",
            amount
        )));
    }
    Ok(())
}

fn check_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

impl MonthlyRecord {
    pub fn new(month: &str, note: Option<String>) -> Self {
        MonthlyRecord {
            id: new_id(),
            month: month.to_string(),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            items: Vec::new(),
            note,
        }
    }

    pub fn totals(&self) -> Totals {
        Totals {
            income: self.income,
            expense: self.expense,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }

    pub fn refresh_totals(&mut self) {
        let t = recompute(&self.items);
        self.income = t.income;
        self.expense = t.expense;
    }

    /// True when the cached totals no longer match the items.
    pub fn totals_drifted(&self) -> bool {
        recompute(&self.items) != self.totals()
    }

    pub fn item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn add_item(
        &mut self,
        name: &str,
        amount: Decimal,
        kind: ItemKind,
        category: &str,
    ) -> Result<&LineItem> {
        check_text("Name", name)?;
        check_text("Category", category)?;
        check_amount(amount)?;
        self.items.push(LineItem {
            id: new_id(),
            name: name.trim().to_string(),
            amount,
            kind,
            category: category.trim().to_string(),
        });
        self.refresh_totals();
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> Result<&LineItem> {
        if let Some(name) = &patch.name {
            check_text("Name", name)?;
        }
        if let Some(category) = &patch.category {
            check_text("Category", category)?;
        }
        if let Some(amount) = patch.amount {
            check_amount(amount)?;
        }
        let idx = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| LedgerError::ItemNotFound(id.to_string()))?;
        {
            let item = &mut self.items[idx];
            if let Some(name) = patch.name {
                item.name = name.trim().to_string();
            }
            if let Some(amount) = patch.amount {
                item.amount = amount;
            }
            if let Some(category) = patch.category {
                item.category = category.trim().to_string();
            }
        }
        self.refresh_totals();
        Ok(&self.items[idx])
    }

    pub fn remove_item(&mut self, id: &str) -> Result<LineItem> {
        let idx = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| LedgerError::ItemNotFound(id.to_string()))?;
        let removed = self.items.remove(idx);
        self.refresh_totals();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ItemKind, category: &str, amount: i64) -> LineItem {
        LineItem {
            id: new_id(),
            name: category.to_string(),
            amount: Decimal::from(amount),
            kind,
            category: category.to_string(),
        }
    }

    #[test]
    fn recompute_sums_per_kind() {
        let items = vec![
            item(ItemKind::Income, "salary", 400000),
            item(ItemKind::Expense, "rent", 85000),
            item(ItemKind::Expense, "insurance", 44000),
            item(ItemKind::Income, "bonus", 1000),
        ];
        let t = recompute(&items);
        assert_eq!(t.income, Decimal::from(401000));
        assert_eq!(t.expense, Decimal::from(129000));
        assert_eq!(t.balance(), Decimal::from(272000));
        assert_eq!(recompute(&[]), Totals::default());
    }

    #[test]
    fn breakdown_groups_expenses_in_first_seen_order() {
        let items = vec![
            item(ItemKind::Expense, "A", 100),
            item(ItemKind::Income, "A", 9999),
            item(ItemKind::Expense, "B", 30),
            item(ItemKind::Expense, "A", 50),
            item(ItemKind::Expense, "a", 1),
        ];
        let b = category_breakdown(&items);
        assert_eq!(
            b,
            vec![
                ("A".to_string(), Decimal::from(150)),
                ("B".to_string(), Decimal::from(30)),
                ("a".to_string(), Decimal::from(1)),
            ]
        );
    }

    #[test]
    fn mutators_keep_totals_in_sync() {
        let mut rec = MonthlyRecord::new("2024-12", None);
        let salary = rec
            .add_item("Salary", Decimal::from(400000), ItemKind::Income, "income")
            .unwrap()
            .id
            .clone();
        let rent = rec
            .add_item("Rent", Decimal::from(85000), ItemKind::Expense, "housing")
            .unwrap()
            .id
            .clone();
        assert_eq!(rec.income, Decimal::from(400000));
        assert_eq!(rec.expense, Decimal::from(85000));

        rec.update_item(
            &rent,
            ItemPatch {
                amount: Some(Decimal::from(90000)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(rec.expense, Decimal::from(90000));

        rec.remove_item(&salary).unwrap();
        assert_eq!(rec.income, Decimal::ZERO);
        assert!(!rec.totals_drifted());
    }

    #[test]
    fn rejects_negative_amount_and_blank_fields() {
        let mut rec = MonthlyRecord::new("2024-12", None);
        assert!(matches!(
            rec.add_item("x", Decimal::from(-1), ItemKind::Expense, "c"),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            rec.add_item(" ", Decimal::from(1), ItemKind::Expense, "c"),
            Err(LedgerError::Validation(_))
        ));
        assert!(rec.items.is_empty());
    }

    #[test]
    fn unknown_item_id_is_reported() {
        let mut rec = MonthlyRecord::new("2024-12", None);
        assert!(matches!(
            rec.remove_item("nope"),
            Err(LedgerError::ItemNotFound(_))
        ));
    }
}
