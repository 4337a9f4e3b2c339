// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month scoping, attribute filters and id lookups over fetched lists.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::models::{Category, Contact, CostCenter, Identified, Kind, Transaction, status_label};
use crate::utils::fmt_money;

/// A calendar month, `YYYY-MM` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(MonthRef { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        MonthRef {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    /// Year and month components only; the day is irrelevant.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month '{}', expected YYYY-MM", s);
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        MonthRef::new(year, month).ok_or_else(invalid)
    }
}

// serialized as a string so it can key a JSON object
impl Serialize for MonthRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaidState {
    Paid,
    Pending,
}

impl FromStr for PaidState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" | "pago" | "recebido" => Ok(PaidState::Paid),
            "pending" | "pendente" | "a-pagar" | "a-receber" => Ok(PaidState::Pending),
            other => Err(format!("Invalid paid state '{}', expected paid|pending", other)),
        }
    }
}

/// How a category or contact filter identifies its target.
///
/// Some screens match by id and others by display name; both are kept
/// explicit here instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefMatch {
    Id(i64),
    Name(String),
}

impl FromStr for RefMatch {
    type Err = String;

    /// All-digit input is an id, anything else is a name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty reference".to_string());
        }
        Ok(match s.parse::<i64>() {
            Ok(id) => RefMatch::Id(id),
            Err(_) => RefMatch::Name(s.to_string()),
        })
    }
}

impl fmt::Display for RefMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefMatch::Id(id) => write!(f, "{}", id),
            RefMatch::Name(name) => f.write_str(name),
        }
    }
}

impl RefMatch {
    fn matches(&self, id: Option<i64>, name: Option<&str>) -> bool {
        match self {
            RefMatch::Id(want) => id == Some(*want),
            RefMatch::Name(want) => name == Some(want.as_str()),
        }
    }
}

/// Conjunctive attribute filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: Option<Kind>,
    pub paid: Option<PaidState>,
    pub category: Option<RefMatch>,
    pub contact: Option<RefMatch>,
    /// Case-insensitive substring of the description.
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction, lookups: &Lookups) -> bool {
        if self.kind.is_some_and(|k| k != tx.kind) {
            return false;
        }
        match self.paid {
            Some(PaidState::Paid) if !tx.paid => return false,
            Some(PaidState::Pending) if tx.paid => return false,
            _ => {}
        }
        if let Some(r) = &self.category {
            if !r.matches(tx.category_id, lookups.category_name(tx.category_id)) {
                return false;
            }
        }
        if let Some(r) = &self.contact {
            if !r.matches(tx.contact_id, lookups.contact_name(tx.contact_id)) {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref().map(str::to_lowercase) {
            if !needle.is_empty() && !tx.description.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

pub fn filter_by_month(list: &[Transaction], month: MonthRef) -> Vec<Transaction> {
    list.iter()
        .filter(|tx| month.contains(tx.date))
        .cloned()
        .collect()
}

/// Records in `month` that satisfy every predicate of `filter`, in input order.
pub fn filter_transactions(
    list: &[Transaction],
    month: MonthRef,
    filter: &TransactionFilter,
    lookups: &Lookups,
) -> Vec<Transaction> {
    list.iter()
        .filter(|tx| month.contains(tx.date) && filter.matches(tx, lookups))
        .cloned()
        .collect()
}

/// Drops repeated ids, keeping the first occurrence. Records without an id
/// are always kept.
pub fn dedup_by_id<T: Identified>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| item.id().is_none_or(|id| seen.insert(id)))
        .collect()
}

/// Id-keyed views of the reference lists a transaction points into.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    categories: HashMap<i64, Category>,
    contacts: HashMap<i64, Contact>,
    cost_centers: HashMap<i64, CostCenter>,
}

impl Lookups {
    pub fn new(categories: &[Category], contacts: &[Contact], cost_centers: &[CostCenter]) -> Self {
        Lookups {
            categories: index(categories),
            contacts: index(contacts),
            cost_centers: index(cost_centers),
        }
    }

    pub fn category(&self, id: Option<i64>) -> Option<&Category> {
        self.categories.get(&id?)
    }

    pub fn cost_center(&self, id: Option<i64>) -> Option<&CostCenter> {
        self.cost_centers.get(&id?)
    }

    pub fn category_name(&self, id: Option<i64>) -> Option<&str> {
        self.category(id).map(|c| c.name.as_str())
    }

    pub fn contact_name(&self, id: Option<i64>) -> Option<&str> {
        self.contacts.get(&id?).map(|c| c.name.as_str())
    }

    pub fn cost_center_name(&self, id: Option<i64>) -> Option<&str> {
        self.cost_center(id).map(|c| c.name.as_str())
    }

    /// Resolves a category given by id or name to its id.
    pub fn resolve_category(&self, r: &RefMatch) -> Option<i64> {
        match r {
            RefMatch::Id(id) => self.categories.contains_key(id).then_some(*id),
            RefMatch::Name(name) => self
                .categories
                .iter()
                .find(|(_, c)| c.name.eq_ignore_ascii_case(name))
                .map(|(id, _)| *id),
        }
    }

    pub fn resolve_contact(&self, r: &RefMatch) -> Option<i64> {
        match r {
            RefMatch::Id(id) => self.contacts.contains_key(id).then_some(*id),
            RefMatch::Name(name) => self
                .contacts
                .iter()
                .find(|(_, c)| c.name.eq_ignore_ascii_case(name))
                .map(|(id, _)| *id),
        }
    }

    pub fn resolve_cost_center(&self, r: &RefMatch) -> Option<i64> {
        match r {
            RefMatch::Id(id) => self.cost_centers.contains_key(id).then_some(*id),
            RefMatch::Name(name) => self
                .cost_centers
                .iter()
                .find(|(_, c)| c.name.eq_ignore_ascii_case(name))
                .map(|(id, _)| *id),
        }
    }
}

fn index<T: Identified + Clone>(items: &[T]) -> HashMap<i64, T> {
    items
        .iter()
        .filter_map(|item| item.id().map(|id| (id, item.clone())))
        .collect()
}

/// A transaction with its references resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: Option<i64>,
    pub date: String,
    pub description: String,
    pub contact: String,
    pub category: String,
    pub cost_center: String,
    pub amount: String,
    pub kind: String,
    pub paid: bool,
    pub status: String,
}

impl TransactionRow {
    pub fn new(tx: &Transaction, lookups: &Lookups) -> Self {
        TransactionRow {
            id: tx.id,
            date: tx.date.to_string(),
            description: tx.description.clone(),
            contact: lookups.contact_name(tx.contact_id).unwrap_or_default().to_string(),
            category: lookups.category_name(tx.category_id).unwrap_or_default().to_string(),
            cost_center: lookups
                .cost_center_name(tx.cost_center_id)
                .unwrap_or_default()
                .to_string(),
            amount: fmt_money(tx.amount),
            kind: tx.kind.to_string(),
            paid: tx.paid,
            status: tx
                .status
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| status_label(tx.kind, tx.paid).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_ref_round_trips_text() {
        let m: MonthRef = "2025-02".parse().unwrap();
        assert_eq!(m, MonthRef { year: 2025, month: 2 });
        assert_eq!(m.to_string(), "2025-02");
        assert!("2025-13".parse::<MonthRef>().is_err());
        assert!("2025".parse::<MonthRef>().is_err());
    }

    #[test]
    fn ref_match_parses_ids_and_names() {
        assert_eq!("12".parse::<RefMatch>().unwrap(), RefMatch::Id(12));
        assert_eq!(
            "Aluguel".parse::<RefMatch>().unwrap(),
            RefMatch::Name("Aluguel".into())
        );
    }
}
