// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::amount::{Amount, parse_monthly_amount};
use crate::finance::{EntryKind, EntryPatch, FinanceBook};
use crate::utils::{fmt_money, get_currency_symbol, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set-income", sub)) => set_income(conn, sub)?,
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn kind_arg(sub: &clap::ArgMatches) -> Result<EntryKind> {
    sub.get_one::<String>("kind")
        .unwrap()
        .parse::<EntryKind>()
        .map_err(|e| anyhow!(e))
}

fn text<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name).map(|s| s.as_str())
}

fn need<'a>(sub: &'a clap::ArgMatches, name: &str, kind: EntryKind) -> Result<&'a str> {
    text(sub, name).with_context(|| format!("--{} is required for {} entries", name, kind))
}

fn set_income(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let income = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let mut book = FinanceBook::load(conn)?;
    book.set_income(income)?;
    println!(
        "Monthly income set to {}",
        fmt_money(&income, &get_currency_symbol(conn)?)
    );
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let mut book = FinanceBook::load(conn)?;
    let cycle = text(sub, "cycle").unwrap_or("monthly");
    let id = match kind {
        EntryKind::Subscription => {
            let currency = match text(sub, "currency") {
                Some(c) => c.to_string(),
                None => get_currency_symbol(conn)?,
            };
            book.add_subscription(
                need(sub, "name", kind)?,
                need(sub, "amount", kind)?,
                cycle,
                &currency,
            )?
        }
        EntryKind::Investment => book.add_investment(
            need(sub, "category", kind)?,
            need(sub, "name", kind)?,
            need(sub, "amount", kind)?,
            cycle,
            text(sub, "note"),
        )?,
        EntryKind::Expense => book.add_expense(
            need(sub, "name", kind)?,
            need(sub, "amount", kind)?,
            cycle,
            text(sub, "note"),
        )?,
    };
    println!("Added {} {}", kind, id);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let id = sub.get_one::<String>("id").unwrap().trim();
    let patch = EntryPatch {
        name: sub.get_one::<String>("name").cloned(),
        amount: sub.get_one::<String>("amount").cloned(),
        cycle: sub.get_one::<String>("cycle").cloned(),
        currency: sub.get_one::<String>("currency").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        note: sub.get_one::<String>("note").cloned(),
    };
    let mut book = FinanceBook::load(conn)?;
    book.update_entry(kind, id, patch)?;
    println!("Updated {} {}", kind, id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut book = FinanceBook::load(conn)?;
    book.remove_entry(kind, id)?;
    println!("Removed {} {}", kind, id);
    Ok(())
}

#[derive(Serialize)]
struct Overview<'a> {
    income: rust_decimal::Decimal,
    estimated_expense: rust_decimal::Decimal,
    balance: rust_decimal::Decimal,
    info: &'a crate::models::FinanceInfo,
}

fn describe(amount: &str, cycle: &str, sym: &str) -> String {
    match Amount::parse(amount) {
        Amount::Unknown => "-".to_string(),
        _ => fmt_money(&parse_monthly_amount(amount, cycle), sym),
    }
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let book = FinanceBook::load(conn)?;
    let Some(info) = book.info() else {
        println!("No finance info recorded yet");
        return Ok(());
    };
    let overview = Overview {
        income: info.income,
        estimated_expense: info.estimated_expense(),
        balance: info.balance(),
        info,
    };
    if maybe_print_json(json_flag, jsonl_flag, &overview)? {
        return Ok(());
    }
    let sym = get_currency_symbol(conn)?;

    println!(
        "Income {}  Estimated expense {}  Balance {}",
        fmt_money(&overview.income, &sym),
        fmt_money(&overview.estimated_expense, &sym),
        fmt_money(&overview.balance, &sym)
    );

    let subs = info
        .subscriptions
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                format!("{}{}", s.currency, s.amount),
                s.cycle.clone(),
            ]
        })
        .collect();
    println!("Subscriptions");
    println!("{}", pretty_table(&["ID", "Name", "Amount", "Cycle"], subs));

    let invs = info
        .investments
        .iter()
        .map(|i| {
            vec![
                i.id.clone(),
                i.category.clone(),
                i.name.clone(),
                i.amount.clone(),
                i.cycle.clone(),
                i.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!("Investments");
    println!(
        "{}",
        pretty_table(&["ID", "Category", "Name", "Amount", "Cycle", "Note"], invs)
    );

    let exps = info
        .expenses
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.name.clone(),
                e.amount.clone(),
                e.cycle.clone(),
                describe(&e.amount, &e.cycle, &sym),
                e.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!("Expenses");
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Amount", "Cycle", "Monthly", "Note"], exps)
    );
    Ok(())
}
