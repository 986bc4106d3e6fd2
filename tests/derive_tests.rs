// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use assetbook::derive::{DeriveSource, derive_new_month, derive_with_source};
use assetbook::error::LedgerError;
use assetbook::models::{Expense, FinanceInfo, ItemKind, MonthlyRecord, Subscription};
use rust_decimal::Decimal;
use std::collections::HashSet;

fn month_with_items(month: &str) -> MonthlyRecord {
    let mut rec = MonthlyRecord::new(month, Some("seed".into()));
    rec.add_item("Salary", Decimal::from(400000), ItemKind::Income, "income")
        .unwrap();
    rec.add_item("Rent", Decimal::from(85000), ItemKind::Expense, "housing")
        .unwrap();
    rec.add_item("Card", Decimal::from(100000), ItemKind::Expense, "daily")
        .unwrap();
    rec
}

fn finance() -> FinanceInfo {
    FinanceInfo {
        subscriptions: vec![
            Subscription {
                id: "s1".into(),
                name: "iCloud".into(),
                amount: "450".into(),
                cycle: "每月".into(),
                currency: "¥".into(),
            },
            Subscription {
                id: "s2".into(),
                name: "Amazon".into(),
                amount: "未知".into(),
                cycle: "每年".into(),
                currency: "¥".into(),
            },
        ],
        investments: vec![],
        expenses: vec![Expense {
            id: "e1".into(),
            name: "房租".into(),
            amount: "85000".into(),
            cycle: "每月".into(),
            note: None,
        }],
        income: Decimal::from(400000),
    }
}

#[test]
fn clone_copies_totals_with_fresh_ids() {
    let older = month_with_items("2024-10");
    let mut latest = month_with_items("2024-11");
    latest
        .add_item("Tax", Decimal::from(71000), ItemKind::Expense, "tax")
        .unwrap();
    let existing = vec![latest.clone(), older.clone()];

    let rec = derive_new_month("2024-12", &existing, None);

    assert_eq!(rec.month, "2024-12");
    assert_eq!(rec.income, latest.income);
    assert_eq!(rec.expense, latest.expense);
    assert_eq!(rec.items.len(), latest.items.len());
    assert_eq!(rec.note, None);

    let old_ids: HashSet<&str> = existing
        .iter()
        .flat_map(|r| r.items.iter().map(|i| i.id.as_str()))
        .collect();
    let new_ids: HashSet<&str> = rec.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(new_ids.len(), rec.items.len());
    assert!(new_ids.is_disjoint(&old_ids));
    assert!(existing.iter().all(|r| r.id != rec.id));

    // inputs untouched
    assert_eq!(existing[0], latest);
    assert_eq!(existing[1], older);
}

#[test]
fn import_from_finance_info() {
    let info = finance();
    let rec = derive_new_month("2024-12", &[month_with_items("2024-11")], Some(&info));

    assert_eq!(rec.income, Decimal::from(400000));
    assert_eq!(rec.expense, Decimal::from(85450));
    assert_eq!(rec.items.len(), 3);

    let income = &rec.items[0];
    assert_eq!(income.kind, ItemKind::Income);
    assert_eq!(income.category, "income");

    let rent = rec.items.iter().find(|i| i.name == "房租").unwrap();
    assert_eq!(rent.category, "daily");

    let icloud = rec.items.iter().find(|i| i.name == "iCloud").unwrap();
    assert_eq!(icloud.category, "subscription");
    assert_eq!(icloud.kind, ItemKind::Expense);

    // unknown amounts contribute nothing and are skipped
    assert!(rec.items.iter().all(|i| i.name != "Amazon"));
}

#[test]
fn import_uses_note_as_category_and_normalises_quarterly() {
    let info = FinanceInfo {
        expenses: vec![
            Expense {
                id: "e1".into(),
                name: "住民税".into(),
                amount: "71000".into(),
                cycle: "每3个月".into(),
                note: Some("tax".into()),
            },
            Expense {
                id: "e2".into(),
                name: "信用卡还款".into(),
                amount: "80000-130000".into(),
                cycle: "每月".into(),
                note: Some("  ".into()),
            },
        ],
        ..Default::default()
    };
    let rec = derive_new_month("2025-01", &[], Some(&info));

    assert_eq!(rec.income, Decimal::ZERO);
    assert!(rec.items.iter().all(|i| i.kind == ItemKind::Expense));
    let tax = rec.items.iter().find(|i| i.name == "住民税").unwrap();
    assert_eq!(tax.category, "tax");
    assert_eq!(tax.amount, Decimal::new(2366667, 2));
    let card = rec.items.iter().find(|i| i.name == "信用卡还款").unwrap();
    assert_eq!(card.category, "daily");
    assert_eq!(card.amount, Decimal::from(105000));
    assert_eq!(rec.expense, Decimal::new(12866667, 2));
}

#[test]
fn zero_income_is_skipped() {
    let info = FinanceInfo::default();
    let rec = derive_new_month("2025-01", &[], Some(&info));
    assert!(rec.items.is_empty());
}

#[test]
fn no_sources_gives_empty_month() {
    let rec = derive_new_month("2025-01", &[], None);
    assert!(rec.items.is_empty());
    assert_eq!(rec.income, Decimal::ZERO);
    assert_eq!(rec.expense, Decimal::ZERO);
}

#[test]
fn explicit_source_overrides() {
    let info = finance();
    let existing = vec![month_with_items("2024-11")];

    let prev = derive_with_source("2024-12", &existing, Some(&info), DeriveSource::Previous)
        .unwrap();
    assert_eq!(prev.expense, existing[0].expense);

    let empty =
        derive_with_source("2024-12", &existing, Some(&info), DeriveSource::Empty).unwrap();
    assert!(empty.items.is_empty());

    let err = derive_with_source("2024-12", &existing, None, DeriveSource::Finance).unwrap_err();
    assert!(matches!(err, LedgerError::NoFinanceInfo));
}
