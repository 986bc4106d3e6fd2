// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::ItemPatch;
use crate::models::ItemKind;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, get_currency_symbol, parse_decimal, parse_month};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = sub
        .get_one::<String>("kind")
        .unwrap()
        .parse::<ItemKind>()
        .map_err(|e| anyhow!(e))?;
    let category = sub.get_one::<String>("category").unwrap();

    let mut store = LedgerStore::load(conn)?;
    let (id, rec_totals) = store.modify_month(&month, |rec| {
        let id = rec.add_item(name, amount, kind, category)?.id.clone();
        Ok((id, rec.totals()))
    })?;
    let sym = get_currency_symbol(conn)?;
    println!(
        "Added {} '{}' {} to {} (id {}); income {}, expense {}",
        kind,
        name.trim(),
        fmt_money(&amount, &sym),
        month,
        id,
        fmt_money(&rec_totals.income, &sym),
        fmt_money(&rec_totals.expense, &sym)
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let id = sub.get_one::<String>("id").unwrap().trim().to_string();
    let patch = ItemPatch {
        name: sub.get_one::<String>("name").cloned(),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
    };

    let mut store = LedgerStore::load(conn)?;
    let name = store.modify_month(&month, |rec| {
        Ok(rec.update_item(&id, patch)?.name.clone())
    })?;
    println!("Updated item '{}' in {}", name, month);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let id = sub.get_one::<String>("id").unwrap().trim().to_string();
    let mut store = LedgerStore::load(conn)?;
    let removed = store.modify_month(&month, |rec| rec.remove_item(&id))?;
    println!("Removed item '{}' from {}", removed.name, month);
    Ok(())
}
