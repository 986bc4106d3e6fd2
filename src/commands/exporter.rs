// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("months", sub)) => export_months(conn, sub),
        _ => Ok(()),
    }
}

fn export_months(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();

    let store = LedgerStore::load(conn)?;
    let mut records: Vec<_> = store.records().iter().collect();
    records.sort_by(|a, b| a.month.cmp(&b.month));

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["month", "item_id", "name", "type", "category", "amount"])?;
            for rec in &records {
                for item in &rec.items {
                    let kind = item.kind.to_string();
                    let amount = item.amount.to_string();
                    wtr.write_record([
                        rec.month.as_str(),
                        item.id.as_str(),
                        item.name.as_str(),
                        kind.as_str(),
                        item.category.as_str(),
                        amount.as_str(),
                    ])?;
                }
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&records)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    tracing::info!(format = %fmt, records = records.len(), "export finished");
    println!("Exported {} months to {}", records.len(), out);
    Ok(())
}
