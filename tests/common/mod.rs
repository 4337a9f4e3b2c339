// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use conta::models::{Category, Contact, ContactKind, CostCenter, Kind, Recurrence, Transaction};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn tx(id: i64, day: &str, amount: &str, kind: Kind, paid: bool) -> Transaction {
    Transaction {
        id: Some(id),
        date: date(day),
        description: format!("Lançamento {}", id),
        contact_id: None,
        category_id: None,
        cost_center_id: None,
        amount: Some(dec(amount)),
        kind,
        paid,
        recurrence: Recurrence::None,
        notes: None,
        status: None,
    }
}

pub fn category(id: i64, name: &str, kind: Kind) -> Category {
    Category {
        id: Some(id),
        name: name.to_string(),
        kind,
    }
}

pub fn cost_center(id: i64, name: &str, kind: Kind) -> CostCenter {
    CostCenter {
        id: Some(id),
        name: name.to_string(),
        kind,
    }
}

pub fn contact(id: i64, name: &str, kind: ContactKind) -> Contact {
    Contact {
        id: Some(id),
        name: name.to_string(),
        email: None,
        phone: None,
        company: None,
        kind,
    }
}
