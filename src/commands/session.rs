// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session;
use anyhow::Result;
use rusqlite::Connection;

pub fn login(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let username = m.get_one::<String>("username").unwrap();
    let password = m.get_one::<String>("password").unwrap();
    let user = session::login(conn, username, password)?;
    println!("Logged in as {} <{}>", user.username, user.email);
    Ok(())
}

pub fn logout(conn: &Connection) -> Result<()> {
    session::logout(conn)?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(conn: &Connection) -> Result<()> {
    match session::current(conn)? {
        Some(user) => println!(
            "{} <{}> role={} since {}",
            user.username,
            user.email,
            user.role,
            user.created_at.format("%Y-%m-%d %H:%M")
        ),
        None => println!("Not logged in"),
    }
    Ok(())
}
