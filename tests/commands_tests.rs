// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use assetbook::commands::{doctor, exporter, finance, items, months, reports};
use assetbook::db::{self, MONTHLY_RECORDS_KEY};
use assetbook::store::LedgerStore;
use assetbook::{cli, derive::DeriveSource};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["assetbook"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("month", sub)) => months::handle(conn, sub),
        Some(("item", sub)) => items::handle(conn, sub),
        Some(("finance", sub)) => finance::handle(conn, sub),
        Some(("report", sub)) => reports::handle(conn, sub),
        Some(("export", sub)) => exporter::handle(conn, sub),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn item_commands_keep_totals_current() {
    let conn = setup();
    run(&conn, &["month", "new", "2024-11", "--note", "first"]).unwrap();
    run(
        &conn,
        &[
            "item", "add", "--month", "2024-11", "--name", "Salary", "--amount", "400000",
            "--kind", "income", "--category", "income",
        ],
    )
    .unwrap();
    run(
        &conn,
        &[
            "item", "add", "--month", "2024-11", "--name", "Rent", "--amount", "85000",
            "--kind", "expense", "--category", "housing",
        ],
    )
    .unwrap();

    let store = LedgerStore::load(&conn).unwrap();
    let rec = store.find_by_month("2024-11").unwrap();
    assert_eq!(rec.income, Decimal::from(400000));
    assert_eq!(rec.expense, Decimal::from(85000));
    assert_eq!(rec.note.as_deref(), Some("first"));
    let rent_id = rec.items[1].id.clone();
    let salary_id = rec.items[0].id.clone();
    drop(store);

    run(
        &conn,
        &["item", "edit", "--month", "2024-11", "--id", &rent_id, "--amount", "90000"],
    )
    .unwrap();
    run(&conn, &["item", "rm", "--month", "2024-11", "--id", &salary_id]).unwrap();

    let store = LedgerStore::load(&conn).unwrap();
    let rec = store.find_by_month("2024-11").unwrap();
    assert_eq!(rec.items.len(), 1);
    assert_eq!(rec.income, Decimal::ZERO);
    assert_eq!(rec.expense, Decimal::from(90000));
}

#[test]
fn item_add_rejects_negative_amount() {
    let conn = setup();
    run(&conn, &["month", "new", "2024-11"]).unwrap();
    let err = run(
        &conn,
        &[
            "item", "add", "--month", "2024-11", "--name", "Refund", "--amount", "-5",
            "--kind", "expense", "--category", "x",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("must not be negative"));
}

#[test]
fn item_add_requires_existing_month() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "item", "add", "--month", "2024-11", "--name", "Rent", "--amount", "1",
            "--kind", "expense", "--category", "x",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("No record for month '2024-11'"));
}

#[test]
fn new_month_prefers_finance_info() {
    let conn = setup();
    run(&conn, &["finance", "set-income", "400000"]).unwrap();
    run(
        &conn,
        &["finance", "add", "expense", "--name", "房租", "--amount", "85000"],
    )
    .unwrap();
    run(
        &conn,
        &[
            "finance", "add", "subscription", "--name", "iCloud", "--amount", "450",
            "--currency", "¥",
        ],
    )
    .unwrap();

    run(&conn, &["month", "new", "2024-12"]).unwrap();
    let store = LedgerStore::load(&conn).unwrap();
    let rec = store.find_by_month("2024-12").unwrap();
    assert_eq!(rec.income, Decimal::from(400000));
    assert_eq!(rec.expense, Decimal::from(85450));
    assert!(rec
        .items
        .iter()
        .any(|i| i.name == "iCloud" && i.category == "subscription"));
}

#[test]
fn new_month_clones_previous_without_finance_info() {
    let conn = setup();
    run(&conn, &["month", "new", "2024-10"]).unwrap();
    run(
        &conn,
        &[
            "item", "add", "--month", "2024-10", "--name", "Rent", "--amount", "85000",
            "--kind", "expense", "--category", "housing",
        ],
    )
    .unwrap();
    run(&conn, &["month", "new", "2024-11"]).unwrap();

    let store = LedgerStore::load(&conn).unwrap();
    let prev = store.find_by_month("2024-10").unwrap();
    let next = store.find_by_month("2024-11").unwrap();
    assert_eq!(next.expense, prev.expense);
    assert_ne!(next.items[0].id, prev.items[0].id);
}

#[test]
fn duplicate_month_is_rejected() {
    let conn = setup();
    months::create_month(&conn, "2024-11", None, DeriveSource::Auto).unwrap();
    let err = run(&conn, &["month", "new", "2024-11"]).unwrap_err();
    assert!(format!("{:#}", err).contains("already has a record"));
    assert_eq!(LedgerStore::load(&conn).unwrap().len(), 1);
}

#[test]
fn month_edit_and_remove() {
    let conn = setup();
    run(&conn, &["month", "new", "2024-10"]).unwrap();
    run(&conn, &["month", "new", "2024-11"]).unwrap();

    let err = run(&conn, &["month", "edit", "2024-10", "--to", "2024-11"]).unwrap_err();
    assert!(err.to_string().contains("already has a record"));

    run(
        &conn,
        &["month", "edit", "2024-10", "--to", "2024-09", "--note", "moved"],
    )
    .unwrap();
    let store = LedgerStore::load(&conn).unwrap();
    assert_eq!(
        store.find_by_month("2024-09").unwrap().note.as_deref(),
        Some("moved")
    );
    drop(store);

    run(&conn, &["month", "rm", "2024-09"]).unwrap();
    let store = LedgerStore::load(&conn).unwrap();
    assert!(store.find_by_month("2024-09").is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn finance_source_without_snapshot_fails() {
    let conn = setup();
    let err = run(&conn, &["month", "new", "2024-11", "--source", "finance"]).unwrap_err();
    assert!(format!("{:#}", err).contains("No finance info"));
}

#[test]
fn report_rows() {
    let conn = setup();
    for (m, rent) in [("2024-09", "80000"), ("2024-10", "85000"), ("2024-11", "90000"), ("2024-12", "95000")] {
        run(&conn, &["month", "new", m, "--source", "empty"]).unwrap();
        run(
            &conn,
            &[
                "item", "add", "--month", m, "--name", "Salary", "--amount", "400000",
                "--kind", "income", "--category", "income",
            ],
        )
        .unwrap();
        run(
            &conn,
            &[
                "item", "add", "--month", m, "--name", "Rent", "--amount", rent, "--kind",
                "expense", "--category", "housing",
            ],
        )
        .unwrap();
    }
    run(
        &conn,
        &[
            "item", "add", "--month", "2024-12", "--name", "iCloud", "--amount", "450",
            "--kind", "expense", "--category", "subscription",
        ],
    )
    .unwrap();

    let store = LedgerStore::load(&conn).unwrap();
    let trend = reports::trend_rows(&store, 3);
    let months: Vec<&str> = trend.iter().map(|r| r.month.as_str()).collect();
    assert_eq!(months, vec!["2024-10", "2024-11", "2024-12"]);
    assert_eq!(trend[2].balance, Decimal::from(400000 - 95450));

    let breakdown = reports::breakdown_rows(&store, "2024-12");
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].category, "housing");
    assert_eq!(breakdown[1].amount, Decimal::from(450));
    assert!(reports::breakdown_rows(&store, "2030-01").is_empty());
}

#[test]
fn export_months_as_csv_and_json() {
    let conn = setup();
    run(&conn, &["month", "new", "2024-11"]).unwrap();
    run(
        &conn,
        &[
            "item", "add", "--month", "2024-11", "--name", "Rent", "--amount", "85000",
            "--kind", "expense", "--category", "housing",
        ],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("months.csv");
    let json_path = dir.path().join("months.json");

    run(
        &conn,
        &["export", "months", "--format", "csv", "--out", csv_path.to_str().unwrap()],
    )
    .unwrap();
    let text = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "month,item_id,name,type,category,amount"
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("2024-11,"));
    assert!(row.ends_with(",Rent,expense,housing,85000"));

    run(
        &conn,
        &["export", "months", "--format", "json", "--out", json_path.to_str().unwrap()],
    )
    .unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v[0]["month"], "2024-11");
    assert_eq!(v[0]["items"][0]["category"], "housing");

    let err = run(
        &conn,
        &["export", "months", "--format", "xml", "--out", json_path.to_str().unwrap()],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
}

#[test]
fn doctor_flags_drift_and_corruption() {
    let conn = setup();
    assert!(doctor::diagnose(&conn).unwrap().is_empty());

    let raw = r#"[
        {"id":"a","month":"2024-11","income":"1","expense":"0","items":[]},
        {"id":"b","month":"2024-11","income":"0","expense":"0","items":[]}
    ]"#;
    db::put_blob(&conn, MONTHLY_RECORDS_KEY, raw).unwrap();
    db::put_blob(&conn, db::USER_KEY, "nope").unwrap();

    let issues = doctor::diagnose(&conn).unwrap();
    let kinds: Vec<&str> = issues.iter().map(|(k, _)| k.as_str()).collect();
    assert!(kinds.contains(&"totals_drift"));
    assert!(kinds.contains(&"duplicate_month"));
    assert!(kinds.contains(&"corrupt_blob"));
}
