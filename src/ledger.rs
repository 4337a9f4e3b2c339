// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction state: cached fetches, derived month views and the mutation
//! entry points (save, toggle paid, delete, duplicate).
//!
//! After every successful mutation the transaction cache is dropped and the
//! list fetched again, so the next view reflects the server.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::api::{ContaApi, Resource};
use crate::error::{ApiError, ValidationError};
use crate::filters::{
    Lookups, MonthRef, TransactionFilter, TransactionRow, dedup_by_id, filter_transactions,
};
use crate::models::{Category, Contact, CostCenter, Transaction, TransactionDraft, status_label};
use crate::summary::{Summary, summarize};

pub const DELETE_PROMPT: &str = "Tem certeza que deseja excluir esta transação?";

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes without asking; used for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

pub struct Ledger<A: ContaApi> {
    api: A,
    transactions: Option<Vec<Transaction>>,
    categories: Option<Vec<Category>>,
    contacts: Option<Vec<Contact>>,
    cost_centers: Option<Vec<CostCenter>>,
}

impl<A: ContaApi> Ledger<A> {
    pub fn new(api: A) -> Self {
        Ledger {
            api,
            transactions: None,
            categories: None,
            contacts: None,
            cost_centers: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn transactions(&mut self) -> Result<&[Transaction], ApiError> {
        if self.transactions.is_none() {
            self.transactions = Some(self.api.list_transactions()?);
        }
        Ok(self.transactions.as_deref().unwrap_or_default())
    }

    pub fn categories(&mut self) -> Result<&[Category], ApiError> {
        if self.categories.is_none() {
            self.categories = Some(self.api.list_categories()?);
        }
        Ok(self.categories.as_deref().unwrap_or_default())
    }

    pub fn contacts(&mut self) -> Result<&[Contact], ApiError> {
        if self.contacts.is_none() {
            self.contacts = Some(self.api.list_contacts()?);
        }
        Ok(self.contacts.as_deref().unwrap_or_default())
    }

    pub fn cost_centers(&mut self) -> Result<&[CostCenter], ApiError> {
        if self.cost_centers.is_none() {
            self.cost_centers = Some(self.api.list_cost_centers()?);
        }
        Ok(self.cost_centers.as_deref().unwrap_or_default())
    }

    pub fn invalidate(&mut self, resource: Resource) {
        match resource {
            Resource::Transactions => self.transactions = None,
            Resource::Categories => self.categories = None,
            Resource::Contacts => self.contacts = None,
            Resource::CostCenters => self.cost_centers = None,
            Resource::Recurring | Resource::Revenues | Resource::Plans => {}
        }
    }

    /// Drops the cached list and fetches it again right away.
    pub fn refetch_transactions(&mut self) -> Result<(), ApiError> {
        self.invalidate(Resource::Transactions);
        self.transactions()?;
        Ok(())
    }

    pub fn lookups(&mut self) -> Result<Lookups, ApiError> {
        let categories = self.categories()?.to_vec();
        let contacts = self.contacts()?.to_vec();
        let cost_centers = self.cost_centers()?.to_vec();
        Ok(Lookups::new(&categories, &contacts, &cost_centers))
    }

    pub fn find(&mut self, id: i64) -> Result<Option<Transaction>, ApiError> {
        Ok(self
            .transactions()?
            .iter()
            .find(|t| t.id == Some(id))
            .cloned())
    }

    /// Filtered, de-duplicated records of `month`.
    pub fn month_transactions(
        &mut self,
        month: MonthRef,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, ApiError> {
        let lookups = self.lookups()?;
        let list = self.transactions()?;
        Ok(dedup_by_id(filter_transactions(list, month, filter, &lookups)))
    }

    pub fn month_rows(
        &mut self,
        month: MonthRef,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRow>, ApiError> {
        let lookups = self.lookups()?;
        let list = self.transactions()?;
        Ok(dedup_by_id(filter_transactions(list, month, filter, &lookups))
            .iter()
            .map(|tx| TransactionRow::new(tx, &lookups))
            .collect())
    }

    pub fn month_summary(&mut self, month: MonthRef) -> Result<Summary, ApiError> {
        let list = self.transactions()?;
        Ok(summarize(list.iter().filter(|t| month.contains(t.date))))
    }

    /// Form checks run before anything is sent.
    pub fn validate(&mut self, draft: &TransactionDraft) -> Result<(), ApiError> {
        if draft.description.trim().is_empty() {
            return Err(ValidationError::EmptyField("descricao").into());
        }
        if draft.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        let lookups = self.lookups()?;
        if let Some(cat) = lookups.category(draft.category_id) {
            if cat.kind != draft.kind {
                return Err(ValidationError::KindMismatch {
                    field: "categoria",
                    expected: draft.kind,
                    found: cat.kind,
                }
                .into());
            }
        }
        if let Some(cc) = lookups.cost_center(draft.cost_center_id) {
            if cc.kind != draft.kind {
                return Err(ValidationError::KindMismatch {
                    field: "centro de custo",
                    expected: draft.kind,
                    found: cc.kind,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Insert when the draft has no id, update otherwise.
    pub fn save(&mut self, draft: &TransactionDraft) -> Result<Option<i64>, ApiError> {
        self.validate(draft)?;
        let id = self.api.save_transaction(draft)?;
        tracing::info!(
            "saved transaction {:?} ({} {})",
            id.or(draft.id),
            draft.kind,
            draft.amount
        );
        self.refetch_transactions()?;
        Ok(id.or(draft.id))
    }

    /// Flips the paid flag, recomputes the status label and persists through
    /// the save endpoint. A record whose amount never decoded is refused, since
    /// the draft would carry a made-up value.
    pub fn toggle_paid(&mut self, tx: &Transaction) -> Result<Transaction, ApiError> {
        if tx.amount.is_none() {
            return Err(ValidationError::UnreadableAmount.into());
        }
        let paid = !tx.paid;
        let status = status_label(tx.kind, paid).to_string();
        let mut draft = TransactionDraft::from_transaction(tx);
        draft.paid = paid;
        draft.status = status.clone();
        self.api.save_transaction(&draft)?;
        tracing::info!("transaction {:?} marked {}", tx.id, status);
        self.refetch_transactions()?;
        Ok(Transaction {
            paid,
            status: Some(status),
            ..tx.clone()
        })
    }

    /// Returns `Ok(false)` when the user declines; nothing is touched then.
    pub fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> Result<bool, ApiError> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(false);
        }
        self.api.delete_transaction(id)?;
        // not refetched: the backend may still list it
        if let Some(list) = self.transactions.as_mut() {
            list.retain(|t| t.id != Some(id));
        }
        Ok(true)
    }

    pub fn duplicate(&self, tx: &Transaction) -> TransactionDraft {
        duplicate_on(tx, chrono::Local::now().date_naive())
    }
}

/// Pre-filled form for a copy of `tx`: no id, dated `today`, unpaid.
pub fn duplicate_on(tx: &Transaction, today: NaiveDate) -> TransactionDraft {
    let mut draft = TransactionDraft::from_transaction(tx);
    draft.id = None;
    draft.date = today;
    draft.paid = false;
    draft.status = status_label(tx.kind, false).to_string();
    draft
}
