// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod amount;
pub mod cli;
pub mod commands;
pub mod db;
pub mod derive;
pub mod error;
pub mod finance;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;
