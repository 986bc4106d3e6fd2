// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Mock session. Any non-empty username/password pair is accepted; nothing
//! is verified and the password is never stored.

use crate::db::{USER_KEY, read_json, remove_blob, write_json};
use crate::error::{LedgerError, Result};
use crate::models::User;
use chrono::Utc;
use rusqlite::Connection;

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

pub fn login(conn: &Connection, username: &str, password: &str) -> Result<User> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Username and password must not be empty".into(),
        ));
    }
    let user = User {
        id: "1".into(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        avatar: Some(format!("{}{}", AVATAR_BASE, username)),
        role: "admin".into(),
        created_at: Utc::now(),
    };
    write_json(conn, USER_KEY, &user)?;
    tracing::info!(username, "session started");
    Ok(user)
}

pub fn logout(conn: &Connection) -> Result<()> {
    remove_blob(conn, USER_KEY)?;
    Ok(())
}

pub fn current(conn: &Connection) -> Result<Option<User>> {
    Ok(read_json(conn, USER_KEY)?)
}
