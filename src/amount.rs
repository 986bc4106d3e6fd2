// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Free-text amount handling.
//!
//! Recurring bills are recorded the way people write them down: `"450"`,
//! `"$20"`, `"80000-130000"`, or a placeholder such as `"unknown"`. The text
//! is resolved into an [`Amount`] once, and every consumer works with the
//! resolved value.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.\-]").unwrap());

/// Cycle labels that mean "every three months".
const QUARTERLY_LABELS: [&str; 4] = ["每3个月", "quarterly", "every-3-months", "every 3 months"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Known { value: Decimal },
    Range { low: Decimal, high: Decimal },
    Unknown,
}

impl Amount {
    /// Never fails: text without a usable number becomes `Unknown`.
    ///
    /// Any `-` left after cleanup separates range bounds, so the result is
    /// never negative. Only the first two bounds count and an empty bound
    /// reads as zero: `"100-"` spans 100 and 0, `"10-20-30"` spans 10 and 20.
    pub fn parse(raw: &str) -> Amount {
        let cleaned = NON_NUMERIC.replace_all(raw, "");
        if cleaned.is_empty() {
            return Amount::Unknown;
        }
        if cleaned.contains('-') {
            let mut bounds = cleaned.split('-').take(2).map(parse_bound);
            return match (bounds.next().flatten(), bounds.next().flatten()) {
                (Some(low), Some(high)) => Amount::Range { low, high },
                _ => Amount::Unknown,
            };
        }
        match cleaned.parse::<Decimal>() {
            Ok(value) => Amount::Known { value },
            Err(_) => Amount::Unknown,
        }
    }

    /// Point value used for aggregation; ranges resolve to their midpoint.
    pub fn value(&self) -> Decimal {
        match *self {
            Amount::Known { value } => value,
            Amount::Range { low, high } => (low + high) / Decimal::from(2),
            Amount::Unknown => Decimal::ZERO,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Amount::Unknown)
    }
}

fn parse_bound(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return Some(Decimal::ZERO);
    }
    s.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cycle {
    Quarterly,
    Other(String),
}

impl Cycle {
    pub fn parse(label: &str) -> Cycle {
        let trimmed = label.trim();
        if QUARTERLY_LABELS
            .iter()
            .any(|q| q.eq_ignore_ascii_case(trimmed))
        {
            Cycle::Quarterly
        } else {
            Cycle::Other(trimmed.to_string())
        }
    }

    /// Only the quarterly cycle is folded into a monthly figure; every other
    /// label is taken as already monthly.
    pub fn to_monthly(&self, value: Decimal) -> Decimal {
        match self {
            Cycle::Quarterly => value / Decimal::from(3),
            Cycle::Other(_) => value,
        }
    }
}

/// Monthly-equivalent value of a free-text amount, rounded to cents.
pub fn parse_monthly_amount(raw: &str, cycle: &str) -> Decimal {
    // Ranges collapse to their midpoint first, so a quarterly range is
    // divided by 3 like a single value.
    let value = Amount::parse(raw).value();
    Cycle::parse(cycle)
        .to_monthly(value)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
