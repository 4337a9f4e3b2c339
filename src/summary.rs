// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reduces transactions into the four dashboard totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::filters::MonthRef;
use crate::models::{Kind, Transaction};

/// Dashboard totals. A bucket is `None` once a transaction with an
/// undecodable amount has been added to it, and stays `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Income already received.
    pub received: Option<Decimal>,
    /// Income still to be received.
    pub expected: Option<Decimal>,
    /// Expenses already paid.
    pub paid: Option<Decimal>,
    /// `received - paid`.
    pub profit: Option<Decimal>,
}

impl Default for Summary {
    fn default() -> Self {
        Summary {
            received: Some(Decimal::ZERO),
            expected: Some(Decimal::ZERO),
            paid: Some(Decimal::ZERO),
            profit: Some(Decimal::ZERO),
        }
    }
}

fn add(bucket: Option<Decimal>, amount: Option<Decimal>) -> Option<Decimal> {
    Some(bucket? + amount?)
}

pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut s = Summary::default();
    for tx in transactions {
        match (tx.kind, tx.paid) {
            (Kind::Income, true) => s.received = add(s.received, tx.amount),
            (Kind::Income, false) => s.expected = add(s.expected, tx.amount),
            (Kind::Expense, true) => s.paid = add(s.paid, tx.amount),
            // unpaid expenses are not part of any bucket
            (Kind::Expense, false) => {}
        }
    }
    s.profit = match (s.received, s.paid) {
        (Some(r), Some(p)) => Some(r - p),
        _ => None,
    };
    s
}

/// One summary per month of `year` that has at least one transaction.
pub fn monthly_breakdown(transactions: &[Transaction], year: i32) -> BTreeMap<MonthRef, Summary> {
    let mut grouped: BTreeMap<MonthRef, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        let month = MonthRef::of(tx.date);
        if month.year == year {
            grouped.entry(month).or_default().push(tx);
        }
    }
    grouped
        .into_iter()
        .map(|(m, txs)| (m, summarize(txs)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(kind: Kind, amount: &str, paid: bool) -> Transaction {
        Transaction {
            id: None,
            date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            description: String::new(),
            contact_id: None,
            category_id: None,
            cost_center_id: None,
            amount: amount.parse().ok(),
            kind,
            paid,
            recurrence: Default::default(),
            notes: None,
            status: None,
        }
    }

    fn d(s: &str) -> Option<Decimal> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn worked_example() {
        let list = vec![
            tx(Kind::Income, "100", true),
            tx(Kind::Income, "50", false),
            tx(Kind::Expense, "30", true),
        ];
        let s = summarize(&list);
        assert_eq!(s.received, d("100"));
        assert_eq!(s.expected, d("50"));
        assert_eq!(s.paid, d("30"));
        assert_eq!(s.profit, d("70"));
    }

    #[test]
    fn empty_is_all_zero() {
        assert_eq!(summarize(&Vec::new()), Summary::default());
    }

    #[test]
    fn decimal_sum_has_no_float_drift() {
        let list = vec![tx(Kind::Income, "0.1", true), tx(Kind::Income, "0.2", true)];
        assert_eq!(summarize(&list).received, d("0.3"));
    }

    #[test]
    fn unparsable_amount_poisons_only_its_bucket() {
        let list = vec![
            tx(Kind::Income, "abc", false),
            tx(Kind::Income, "10", true),
            tx(Kind::Expense, "4", true),
        ];
        let s = summarize(&list);
        assert_eq!(s.expected, None);
        assert_eq!(s.received, d("10"));
        assert_eq!(s.profit, d("6"));

        let poisoned_paid = summarize(&[tx(Kind::Expense, "x", true)]);
        assert_eq!(poisoned_paid.paid, None);
        assert_eq!(poisoned_paid.profit, None);
    }

    #[test]
    fn unpaid_expense_is_ignored() {
        let s = summarize(&[tx(Kind::Expense, "99", false)]);
        assert_eq!(s, Summary::default());
    }
}
