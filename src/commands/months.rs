// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::derive::{DeriveSource, derive_with_source};
use crate::error::LedgerError;
use crate::finance::FinanceBook;
use crate::models::MonthlyRecord;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, get_currency_symbol, maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("new", sub)) => new_month(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn note_arg(sub: &clap::ArgMatches) -> Option<String> {
    sub.get_one::<String>("note")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Creates a month and returns it as stored.
pub fn create_month(
    conn: &Connection,
    month: &str,
    note: Option<String>,
    source: DeriveSource,
) -> Result<MonthlyRecord> {
    let mut store = LedgerStore::load(conn)?;
    if store.find_by_month(month).is_some() {
        return Err(LedgerError::MonthTaken(month.to_string()).into());
    }
    let finance = FinanceBook::load(conn)?;
    let mut rec = derive_with_source(month, store.records(), finance.info(), source)?;
    rec.note = note;
    store.upsert(rec.clone())?;
    Ok(rec)
}

fn new_month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let source = sub
        .get_one::<String>("source")
        .map(|s| s.parse::<DeriveSource>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();

    let origin = {
        let store = LedgerStore::load(conn)?;
        let finance = FinanceBook::load(conn)?;
        match source {
            DeriveSource::Auto if finance.info().is_some() => "finance info".to_string(),
            DeriveSource::Finance => "finance info".to_string(),
            DeriveSource::Auto | DeriveSource::Previous => match store.latest() {
                Some(prev) => format!("copied from {}", prev.month),
                None => "empty".to_string(),
            },
            DeriveSource::Empty => "empty".to_string(),
        }
    };

    let rec = create_month(conn, &month, note_arg(sub), source)
        .with_context(|| format!("Create month {}", month))?;
    println!(
        "Created {} with {} items ({})",
        rec.month,
        rec.items.len(),
        origin
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let to = sub
        .get_one::<String>("to")
        .map(|s| parse_month(s))
        .transpose()?;
    let note = sub.get_one::<String>("note").map(|s| s.trim().to_string());

    let mut store = LedgerStore::load(conn)?;
    let mut rec = store
        .find_by_month(&month)
        .cloned()
        .ok_or_else(|| LedgerError::MonthNotFound(month.clone()))?;
    if let Some(to) = to {
        rec.month = to;
    }
    if let Some(note) = note {
        rec.note = if note.is_empty() { None } else { Some(note) };
    }
    let new_month = rec.month.clone();
    store.upsert(rec)?;
    println!("Updated {} -> {}", month, new_month);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let mut store = LedgerStore::load(conn)?;
    let id = store
        .find_by_month(&month)
        .map(|r| r.id.clone())
        .ok_or_else(|| LedgerError::MonthNotFound(month.clone()))?;
    store.delete(&id)?;
    println!("Removed month {}", month);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let store = LedgerStore::load(conn)?;
    let mut records: Vec<&MonthlyRecord> = store.records().iter().collect();
    records.sort_by(|a, b| b.month.cmp(&a.month));
    if maybe_print_json(json_flag, jsonl_flag, &records)? {
        return Ok(());
    }
    let sym = get_currency_symbol(conn)?;
    let rows = records
        .iter()
        .map(|r| {
            let incomes = r
                .items
                .iter()
                .filter(|i| i.kind == crate::models::ItemKind::Income)
                .count();
            vec![
                r.month.clone(),
                fmt_money(&r.income, &sym),
                fmt_money(&r.expense, &sym),
                fmt_money(&r.balance(), &sym),
                format!("{} income / {} expense", incomes, r.items.len() - incomes),
                r.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expense", "Balance", "Items", "Note"],
            rows
        )
    );
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let store = LedgerStore::load(conn)?;
    let Some(rec) = store.find_by_month(&month) else {
        println!("No record for {}", month);
        return Ok(());
    };
    if maybe_print_json(json_flag, jsonl_flag, rec)? {
        return Ok(());
    }
    let sym = get_currency_symbol(conn)?;
    let rows = rec
        .items
        .iter()
        .map(|i| {
            vec![
                i.id.clone(),
                i.name.clone(),
                i.kind.to_string(),
                i.category.clone(),
                fmt_money(&i.amount, &sym),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Type", "Category", "Amount"], rows)
    );
    println!(
        "Income {}  Expense {}  Balance {}",
        fmt_money(&rec.income, &sym),
        fmt_money(&rec.expense, &sym),
        fmt_money(&rec.balance(), &sym)
    );
    if let Some(note) = &rec.note {
        println!("Note: {}", note);
    }
    Ok(())
}
