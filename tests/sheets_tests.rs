// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{category, contact, tx};
use conta::api::MemoryApi;
use conta::error::SheetError;
use conta::ledger::Ledger;
use conta::models::{ContactKind, Kind};
use conta::sheets::{export_to_csv, import_from_file, Row};
use conta::{cli, commands::exporter};
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn run_export(ledger: &mut Ledger<MemoryApi>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["conta", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("export", export_m)) => exporter::handle(ledger, export_m),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn csv_import_keeps_literal_strings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clientes.csv");
    fs::write(&path, "nome,valor\n\"Acme\",\"12.50\"\n").unwrap();

    let outcome = import_from_file(&path).unwrap();
    assert!(outcome.success);
    assert_eq!(
        outcome.data,
        vec![row(&[("nome", json!("Acme")), ("valor", json!("12.50"))])]
    );
}

#[test]
fn csv_rows_wider_than_the_header_are_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("largo.csv");
    fs::write(&path, "nome,valor\nAcme,12.50\nBeta,3,extra\nGama\n").unwrap();

    match import_from_file(&path) {
        Err(SheetError::Parse(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("linha 3:"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn csv_repeated_header_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repetido.csv");
    fs::write(&path, "nome,valor,nome\nAcme,1,Outra\n").unwrap();

    match import_from_file(&path) {
        Err(SheetError::Parse(errors)) => {
            assert_eq!(errors, vec!["coluna repetida no cabeçalho: 'nome'".to_string()]);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn json_import_requires_an_array_of_objects() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("ok.json");
    fs::write(&good, r#"[{"nome":"Acme","valor":12.5}]"#).unwrap();
    let outcome = import_from_file(&good).unwrap();
    assert_eq!(outcome.data[0]["valor"], json!(12.5));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{"nome":"Acme"}"#).unwrap();
    assert!(matches!(import_from_file(&bad), Err(SheetError::Parse(_))));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notas.pdf");
    fs::write(&path, "x").unwrap();
    assert!(matches!(
        import_from_file(&path),
        Err(SheetError::UnsupportedFormat(ext)) if ext == "pdf"
    ));
}

#[test]
fn csv_export_quotes_delimiters_and_unions_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let rows = vec![
        row(&[("nome", json!("Silva, Ltda")), ("obs", json!("disse \"ok\""))]),
        row(&[("nome", json!("Beta")), ("valor", json!(10))]),
    ];
    export_to_csv(&rows, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "nome,obs,valor\n\"Silva, Ltda\",\"disse \"\"ok\"\"\",\nBeta,,10\n"
    );
}

fn ledger() -> Ledger<MemoryApi> {
    let mut paid = tx(1, "2025-05-02", "1234.5", Kind::Income, true);
    paid.description = "Consultoria".into();
    paid.category_id = Some(10);
    paid.contact_id = Some(30);
    Ledger::new(
        MemoryApi::new()
            .with_transactions(vec![
                paid,
                tx(2, "2025-06-10", "50", Kind::Expense, false),
            ])
            .with_categories(vec![category(10, "Serviços", Kind::Income)])
            .with_contacts(vec![contact(30, "Acme", ContactKind::Client)]),
    )
}

#[test]
fn export_transactions_writes_named_columns_as_json() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    let out_str = out.to_string_lossy().to_string();
    let mut ledger = ledger();

    run_export(
        &mut ledger,
        &["transactions", "--format", "json", "--out", &out_str, "--month", "2025-05"],
    )
    .unwrap();

    let parsed: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!([{
            "Data": "2025-05-02",
            "Descrição": "Consultoria",
            "Contato": "Acme",
            "Categoria": "Serviços",
            "Centro de Custo": "",
            "Valor": 1234.5,
            "Tipo": "receita",
            "Status": "Recebido"
        }])
    );
}

#[test]
fn export_without_month_covers_everything() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    let out_str = out.to_string_lossy().to_string();
    let mut ledger = ledger();

    run_export(&mut ledger, &["transactions", "--out", &out_str]).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("Data,Descrição,Contato,Categoria,Centro de Custo,Valor,Tipo,Status"));
}

#[test]
fn unknown_export_format_is_an_error() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.pdf");
    let out_str = out.to_string_lossy().to_string();
    let mut ledger = ledger();

    let err = run_export(
        &mut ledger,
        &["transactions", "--format", "pdf", "--out", &out_str],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out.exists());
}
