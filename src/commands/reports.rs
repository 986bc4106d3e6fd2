// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::category_breakdown;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, get_currency_symbol, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TrendRow {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Serialize)]
struct Summary {
    month: String,
    income: Decimal,
    expense: Decimal,
    balance: Decimal,
    income_items: usize,
    expense_items: usize,
    categories: Vec<CategoryRow>,
}

pub fn breakdown_rows(store: &LedgerStore<'_>, month: &str) -> Vec<CategoryRow> {
    store
        .find_by_month(month)
        .map(|rec| {
            category_breakdown(&rec.items)
                .into_iter()
                .map(|(category, amount)| CategoryRow { category, amount })
                .collect()
        })
        .unwrap_or_default()
}

pub fn trend_rows(store: &LedgerStore<'_>, months: usize) -> Vec<TrendRow> {
    store
        .recent(months)
        .into_iter()
        .map(|r| TrendRow {
            month: r.month.clone(),
            income: r.income,
            expense: r.expense,
            balance: r.balance(),
        })
        .collect()
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let store = LedgerStore::load(conn)?;
    let Some(rec) = store.find_by_month(&month) else {
        println!("No record for {}", month);
        return Ok(());
    };
    let income_items = rec
        .items
        .iter()
        .filter(|i| i.kind == crate::models::ItemKind::Income)
        .count();
    let data = Summary {
        month: rec.month.clone(),
        income: rec.income,
        expense: rec.expense,
        balance: rec.balance(),
        income_items,
        expense_items: rec.items.len() - income_items,
        categories: breakdown_rows(&store, &month),
    };
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let sym = get_currency_symbol(conn)?;
    let rows = vec![
        vec!["Income".into(), fmt_money(&data.income, &sym), data.income_items.to_string()],
        vec!["Expense".into(), fmt_money(&data.expense, &sym), data.expense_items.to_string()],
        vec!["Balance".into(), fmt_money(&data.balance, &sym), String::new()],
    ];
    println!("{}", pretty_table(&[data.month.as_str(), "Amount", "Items"], rows));
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let store = LedgerStore::load(conn)?;
    let data = breakdown_rows(&store, &month);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No expenses recorded for {}", month);
        return Ok(());
    }
    let total: Decimal = data.iter().map(|r| r.amount).sum();
    let sym = get_currency_symbol(conn)?;
    let rows = data
        .iter()
        .map(|r| {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                r.amount * Decimal::ONE_HUNDRED / total
            };
            vec![
                r.category.clone(),
                fmt_money(&r.amount, &sym),
                format!("{:.1}%", share),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&3);
    let store = LedgerStore::load(conn)?;
    let data = trend_rows(&store, months);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let sym = get_currency_symbol(conn)?;
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.month.clone(),
                fmt_money(&r.income, &sym),
                fmt_money(&r.expense, &sym),
                fmt_money(&r.balance, &sym),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
    );
    Ok(())
}
