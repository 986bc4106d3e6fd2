// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use assetbook::{cli, commands, db, logging};

fn main() -> Result<()> {
    logging::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_override = matches.get_one::<PathBuf>("db").cloned();
    let conn = db::open_or_init(db_override.as_deref())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Database initialized at {}",
                db::db_path(db_override.as_deref())?.display()
            );
        }
        Some(("login", sub)) => commands::session::login(&conn, sub)?,
        Some(("logout", _)) => commands::session::logout(&conn)?,
        Some(("whoami", _)) => commands::session::whoami(&conn)?,
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("month", sub)) => commands::months::handle(&conn, sub)?,
        Some(("item", sub)) => commands::items::handle(&conn, sub)?,
        Some(("finance", sub)) => commands::finance::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
