// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{category, contact, cost_center, date, dec, tx};
use conta::api::{ContaApi, MemoryApi};
use conta::error::{ApiError, ValidationError};
use conta::filters::{MonthRef, TransactionFilter};
use conta::ledger::{duplicate_on, AssumeYes, Confirm, Ledger};
use conta::models::{ContactKind, Kind, TransactionDraft};
use conta::commands::{cost_centers, transactions};
use conta::cli;

struct Decline;

impl Confirm for Decline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

fn may() -> MonthRef {
    MonthRef::new(2025, 5).unwrap()
}

fn seeded() -> MemoryApi {
    MemoryApi::new()
        .with_transactions(vec![
            tx(1, "2025-05-02", "1000", Kind::Income, true),
            tx(2, "2025-05-10", "500", Kind::Income, false),
            tx(3, "2025-05-15", "300", Kind::Expense, true),
            tx(4, "2025-05-20", "200", Kind::Expense, false),
            tx(5, "2025-04-30", "999", Kind::Income, true),
        ])
        .with_categories(vec![
            category(10, "Serviços", Kind::Income),
            category(11, "Aluguel", Kind::Expense),
        ])
        .with_cost_centers(vec![cost_center(20, "Operação", Kind::Expense)])
        .with_contacts(vec![contact(30, "Acme", ContactKind::Client)])
}

fn draft(description: &str, amount: &str, kind: Kind) -> TransactionDraft {
    TransactionDraft {
        id: None,
        date: date("2025-05-12"),
        description: description.to_string(),
        contact_id: None,
        category_id: None,
        cost_center_id: None,
        amount: dec(amount),
        kind,
        paid: false,
        recurrence: Default::default(),
        notes: None,
        status: "A pagar".to_string(),
    }
}

#[test]
fn month_summary_matches_dashboard_buckets() {
    let mut ledger = Ledger::new(seeded());
    let s = ledger.month_summary(may()).unwrap();
    assert_eq!(s.received, Some(dec("1000")));
    assert_eq!(s.expected, Some(dec("500")));
    assert_eq!(s.paid, Some(dec("300")));
    assert_eq!(s.profit, Some(dec("700")));
}

#[test]
fn month_transactions_skip_other_months_and_repeated_ids() {
    let mut list = vec![
        tx(1, "2025-05-02", "10", Kind::Income, true),
        tx(1, "2025-05-03", "10", Kind::Income, true),
        tx(2, "2025-06-01", "10", Kind::Income, true),
    ];
    list.push(tx(3, "2025-05-31", "10", Kind::Expense, false));
    let mut ledger = Ledger::new(MemoryApi::new().with_transactions(list));
    let got = ledger
        .month_transactions(may(), &TransactionFilter::default())
        .unwrap();
    let ids: Vec<_> = got.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![Some(1), Some(3)]);
    assert_eq!(got[0].date, date("2025-05-02"));
}

#[test]
fn lists_are_fetched_once_until_invalidated() {
    let mut ledger = Ledger::new(seeded());
    ledger.month_summary(may()).unwrap();
    ledger.month_summary(may()).unwrap();
    assert_eq!(ledger.api().call_count("list_transactions"), 1);
    ledger.refetch_transactions().unwrap();
    assert_eq!(ledger.api().call_count("list_transactions"), 2);
}

#[test]
fn save_refetches_transactions() {
    let mut ledger = Ledger::new(seeded());
    ledger.transactions().unwrap();
    let id = ledger.save(&draft("Internet", "120.50", Kind::Expense)).unwrap();
    assert!(id.is_some());
    assert_eq!(ledger.api().call_count("list_transactions"), 2);
    let calls = ledger.api().calls();
    assert_eq!(
        &calls[calls.len() - 2..],
        &["save_transaction".to_string(), "list_transactions".to_string()]
    );
    let saved = ledger.find(id.unwrap()).unwrap().unwrap();
    assert_eq!(saved.amount, Some(dec("120.50")));
    assert_eq!(saved.description, "Internet");
}

#[test]
fn save_rejects_bad_forms_without_calling_the_api() {
    let mut ledger = Ledger::new(seeded());

    let err = ledger.save(&draft("  ", "10", Kind::Expense)).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::EmptyField(_))
    ));

    let err = ledger.save(&draft("Zero", "0", Kind::Expense)).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::NonPositiveAmount)
    ));

    let mut wrong = draft("Aluguel", "10", Kind::Income);
    wrong.category_id = Some(11);
    let err = ledger.save(&wrong).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::KindMismatch { field: "categoria", .. })
    ));

    let mut wrong = draft("Operação", "10", Kind::Income);
    wrong.cost_center_id = Some(20);
    assert!(ledger.save(&wrong).is_err());

    assert_eq!(ledger.api().call_count("save_transaction"), 0);
}

#[test]
fn server_rejection_surfaces_its_message() {
    let mut ledger = Ledger::new(seeded());
    ledger.lookups().unwrap();
    ledger.api().fail_next("Categoria inexistente");
    let err = ledger.save(&draft("Internet", "10", Kind::Expense)).unwrap_err();
    assert_eq!(err.user_message(), "Categoria inexistente");
}

#[test]
fn toggle_paid_flips_flag_and_status_label() {
    let mut ledger = Ledger::new(seeded());
    let pending_income = ledger.find(2).unwrap().unwrap();
    let updated = ledger.toggle_paid(&pending_income).unwrap();
    assert!(updated.paid);
    assert_eq!(updated.status.as_deref(), Some("Recebido"));

    let paid_expense = ledger.find(3).unwrap().unwrap();
    let updated = ledger.toggle_paid(&paid_expense).unwrap();
    assert!(!updated.paid);
    assert_eq!(updated.status.as_deref(), Some("A pagar"));

    let unpaid_expense = ledger.find(4).unwrap().unwrap();
    let updated = ledger.toggle_paid(&unpaid_expense).unwrap();
    assert!(updated.paid);
    assert_eq!(updated.status.as_deref(), Some("Pago"));

    let received_income = ledger.find(1).unwrap().unwrap();
    let updated = ledger.toggle_paid(&received_income).unwrap();
    assert!(!updated.paid);
    assert_eq!(updated.status.as_deref(), Some("A receber"));

    let stored = ledger.api().stored_transactions();
    let three = stored.iter().find(|t| t.id == Some(3)).unwrap();
    assert!(!three.paid);
    let four = stored.iter().find(|t| t.id == Some(4)).unwrap();
    assert_eq!(four.status.as_deref(), Some("Pago"));
    assert_eq!(four.amount, Some(dec("200")));
}

#[test]
fn toggle_refuses_a_record_with_unreadable_amount() {
    let mut broken = tx(8, "2025-05-05", "0", Kind::Expense, false);
    broken.amount = None;
    let mut ledger = Ledger::new(MemoryApi::new().with_transactions(vec![broken.clone()]));

    let err = ledger.toggle_paid(&broken).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::UnreadableAmount)
    ));
    assert_eq!(ledger.api().call_count("save_transaction"), 0);
    let stored = ledger.api().stored_transactions();
    assert_eq!(stored[0].amount, None);
    assert!(!stored[0].paid);
}

#[test]
fn cost_center_list_filters_by_kind() {
    let api = MemoryApi::new().with_cost_centers(vec![
        cost_center(21, "Vendas", Kind::Income),
        cost_center(22, "Operação", Kind::Expense),
        cost_center(23, "Administrativo", Kind::Expense),
    ]);
    let mut ledger = Ledger::new(api);

    let matches = cli::build_cli().get_matches_from(["conta", "cost-center", "list", "--kind", "despesa"]);
    let Some(("cost-center", cc_m)) = matches.subcommand() else {
        panic!("no cost-center subcommand");
    };
    let Some(("list", list_m)) = cc_m.subcommand() else {
        panic!("no list subcommand");
    };
    let names: Vec<String> = cost_centers::query(&mut ledger, list_m)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Administrativo", "Operação"]);

    cost_centers::handle(&mut ledger, cc_m).unwrap();
}

#[test]
fn declined_delete_leaves_everything_alone() {
    let mut ledger = Ledger::new(seeded());
    ledger.transactions().unwrap();
    assert!(!ledger.delete(3, &Decline).unwrap());
    assert_eq!(ledger.api().call_count("delete_transaction"), 0);
    assert!(ledger.find(3).unwrap().is_some());
}

#[test]
fn confirmed_delete_drops_the_record_without_refetch() {
    let mut ledger = Ledger::new(seeded());
    ledger.transactions().unwrap();
    assert!(ledger.delete(3, &AssumeYes).unwrap());
    assert!(ledger.find(3).unwrap().is_none());
    assert_eq!(ledger.api().call_count("list_transactions"), 1);
}

#[test]
fn duplicate_is_an_unpaid_copy_dated_today() {
    let original = tx(3, "2025-05-15", "300", Kind::Expense, true);
    let copy = duplicate_on(&original, date("2025-07-01"));
    assert_eq!(copy.id, None);
    assert_eq!(copy.date, date("2025-07-01"));
    assert!(!copy.paid);
    assert_eq!(copy.status, "A pagar");
    assert_eq!(copy.amount, dec("300"));
    assert_eq!(copy.description, original.description);
}

#[test]
fn list_query_applies_cli_filters() {
    let mut api = seeded();
    let mut t = tx(6, "2025-05-25", "80", Kind::Expense, true);
    t.description = "Aluguel sala".into();
    t.category_id = Some(11);
    let mut all = api.list_transactions().unwrap();
    all.push(t);
    api = MemoryApi::new()
        .with_transactions(all)
        .with_categories(vec![category(11, "Aluguel", Kind::Expense)]);
    let mut ledger = Ledger::new(api);

    let matches = cli::build_cli().get_matches_from([
        "conta", "tx", "list", "--month", "2025-05", "--kind", "despesa", "--paid", "paid",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&mut ledger, list_m).unwrap();
    let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![Some(3), Some(6)]);

    let matches = cli::build_cli().get_matches_from([
        "conta", "tx", "list", "--month", "2025-05", "--category", "Aluguel", "--search", "SALA",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&mut ledger, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Aluguel");
    assert_eq!(rows[0].status, "Pago");
}
