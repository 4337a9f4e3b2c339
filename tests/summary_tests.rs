// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{dec, tx};
use conta::filters::{dedup_by_id, filter_by_month, MonthRef};
use conta::models::Kind;
use conta::summary::{monthly_breakdown, summarize};

#[test]
fn profit_is_received_minus_paid() {
    let list = vec![
        tx(1, "2025-03-01", "250.75", Kind::Income, true),
        tx(2, "2025-03-02", "99.99", Kind::Income, false),
        tx(3, "2025-03-03", "100.25", Kind::Expense, true),
        tx(4, "2025-03-04", "40", Kind::Expense, false),
    ];
    let s = summarize(&list);
    let received = s.received.unwrap();
    let paid = s.paid.unwrap();
    assert_eq!(s.profit, Some(received - paid));
    assert_eq!(s.profit, Some(dec("150.50")));
    assert_eq!(s.expected, Some(dec("99.99")));
}

#[test]
fn cents_add_up_exactly() {
    let list = vec![
        tx(1, "2025-03-01", "0.1", Kind::Income, true),
        tx(2, "2025-03-02", "0.2", Kind::Income, true),
    ];
    assert_eq!(summarize(&list).received, Some(dec("0.3")));
}

#[test]
fn missing_amount_poisons_only_its_bucket() {
    let mut broken = tx(1, "2025-03-01", "0", Kind::Expense, true);
    broken.amount = None;
    let list = vec![broken, tx(2, "2025-03-02", "10", Kind::Income, true)];
    let s = summarize(&list);
    assert_eq!(s.paid, None);
    assert_eq!(s.profit, None);
    assert_eq!(s.received, Some(dec("10")));
    assert_eq!(s.expected, Some(dec("0")));
}

#[test]
fn month_filter_ignores_the_day() {
    let list = vec![
        tx(1, "2025-02-01", "1", Kind::Income, true),
        tx(2, "2025-02-28", "1", Kind::Income, true),
        tx(3, "2025-03-01", "1", Kind::Income, true),
        tx(4, "2024-02-15", "1", Kind::Income, true),
    ];
    let feb = MonthRef::new(2025, 2).unwrap();
    let ids: Vec<_> = filter_by_month(&list, feb).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

#[test]
fn dedup_keeps_first_and_is_idempotent() {
    let mut second = tx(1, "2025-02-02", "99", Kind::Income, true);
    second.description = "repetido".into();
    let list = vec![
        tx(1, "2025-02-01", "1", Kind::Income, true),
        second,
        tx(2, "2025-02-03", "1", Kind::Expense, false),
    ];
    let once = dedup_by_id(list);
    assert_eq!(once.len(), 2);
    assert_eq!(once[0].amount, Some(dec("1")));
    let twice = dedup_by_id(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn yearly_breakdown_groups_by_month() {
    let list = vec![
        tx(1, "2025-01-05", "100", Kind::Income, true),
        tx(2, "2025-01-20", "30", Kind::Expense, true),
        tx(3, "2025-04-02", "70", Kind::Income, false),
        tx(4, "2024-12-31", "500", Kind::Income, true),
    ];
    let by_month = monthly_breakdown(&list, 2025);
    let months: Vec<String> = by_month.keys().map(|m| m.to_string()).collect();
    assert_eq!(months, vec!["2025-01", "2025-04"]);
    let jan = &by_month[&MonthRef::new(2025, 1).unwrap()];
    assert_eq!(jan.profit, Some(dec("70")));
    let apr = &by_month[&MonthRef::new(2025, 4).unwrap()];
    assert_eq!(apr.expected, Some(dec("70")));
}
