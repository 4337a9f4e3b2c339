// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;

use super::{ContaApi, LoginReply, ProfileUpdate, RemoteUser};
use crate::error::ApiError;
use crate::models::{
    Category, Contact, CostCenter, Identified, Plan, RecurringTransaction, Revenue, Transaction,
    TransactionDraft,
};

#[derive(Default)]
struct State {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    contacts: Vec<Contact>,
    cost_centers: Vec<CostCenter>,
    recurring: Vec<RecurringTransaction>,
    revenues: Vec<Revenue>,
    plans: Vec<Plan>,
    users: Vec<(RemoteUser, String)>,
    next_id: i64,
    calls: Vec<String>,
    fail_next: Option<String>,
}

/// In-process implementation of [`ContaApi`].
///
/// Ids are assigned from a single counter. Every call is recorded by name so
/// callers can assert on refetches, and `fail_next` makes the next call fail
/// the way a rejected server response would.
#[derive(Default)]
pub struct MemoryApi {
    state: RefCell<State>,
}

fn upsert<T: Identified>(items: &mut Vec<T>, mut item: T, fresh_id: impl FnOnce() -> i64) -> i64 {
    if let Some(id) = item.id() {
        if let Some(slot) = items.iter_mut().find(|x| x.id() == Some(id)) {
            *slot = item;
            return id;
        }
        items.push(item);
        return id;
    }
    let id = fresh_id();
    item.set_id(id);
    items.push(item);
    id
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(self, items: Vec<Transaction>) -> Self {
        {
            let mut st = self.state.borrow_mut();
            bump_past(&mut st.next_id, items.iter().filter_map(|x| x.id));
            st.transactions = items;
        }
        self
    }

    pub fn with_categories(self, items: Vec<Category>) -> Self {
        {
            let mut st = self.state.borrow_mut();
            bump_past(&mut st.next_id, items.iter().filter_map(|x| x.id));
            st.categories = items;
        }
        self
    }

    pub fn with_contacts(self, items: Vec<Contact>) -> Self {
        {
            let mut st = self.state.borrow_mut();
            bump_past(&mut st.next_id, items.iter().filter_map(|x| x.id));
            st.contacts = items;
        }
        self
    }

    pub fn with_cost_centers(self, items: Vec<CostCenter>) -> Self {
        {
            let mut st = self.state.borrow_mut();
            bump_past(&mut st.next_id, items.iter().filter_map(|x| x.id));
            st.cost_centers = items;
        }
        self
    }

    /// Registers credentials accepted by `login`.
    pub fn with_user(self, id: i64, email: &str, name: &str, password: &str) -> Self {
        self.state.borrow_mut().users.push((
            RemoteUser {
                id,
                email: email.to_string(),
                name: name.to_string(),
            },
            password.to_string(),
        ));
        self
    }

    /// The next call returns `ApiError::Rejected(message)` and changes nothing.
    pub fn fail_next(&self, message: &str) {
        self.state.borrow_mut().fail_next = Some(message.to_string());
    }

    /// Names of the calls made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.state.borrow().calls.iter().filter(|c| *c == name).count()
    }

    pub fn stored_transactions(&self) -> Vec<Transaction> {
        self.state.borrow().transactions.clone()
    }

    fn enter(&self, name: &str) -> Result<std::cell::RefMut<'_, State>, ApiError> {
        let mut st = self.state.borrow_mut();
        st.calls.push(name.to_string());
        match st.fail_next.take() {
            Some(message) => Err(ApiError::Rejected(message)),
            None => Ok(st),
        }
    }
}

fn bump_past(next_id: &mut i64, ids: impl Iterator<Item = i64>) {
    if let Some(max) = ids.max() {
        *next_id = (*next_id).max(max);
    }
}

macro_rules! save_into {
    ($self:ident, $name:literal, $field:ident, $item:expr) => {{
        let mut st = $self.enter($name)?;
        let mut next = st.next_id;
        let id = upsert(&mut st.$field, $item, || {
            next += 1;
            next
        });
        st.next_id = next;
        Ok(Some(id))
    }};
}

impl ContaApi for MemoryApi {
    fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        Ok(self.enter("list_transactions")?.transactions.clone())
    }

    fn save_transaction(&self, draft: &TransactionDraft) -> Result<Option<i64>, ApiError> {
        save_into!(self, "save_transaction", transactions, draft.clone().into_transaction())
    }

    fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        let mut st = self.enter("delete_transaction")?;
        st.transactions.retain(|t| t.id != Some(id));
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.enter("list_categories")?.categories.clone())
    }

    fn save_category(&self, category: &Category) -> Result<Option<i64>, ApiError> {
        save_into!(self, "save_category", categories, category.clone())
    }

    fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        Ok(self.enter("list_contacts")?.contacts.clone())
    }

    fn save_contact(&self, contact: &Contact) -> Result<Option<i64>, ApiError> {
        save_into!(self, "save_contact", contacts, contact.clone())
    }

    fn list_cost_centers(&self) -> Result<Vec<CostCenter>, ApiError> {
        Ok(self.enter("list_cost_centers")?.cost_centers.clone())
    }

    fn save_cost_center(&self, center: &CostCenter) -> Result<Option<i64>, ApiError> {
        save_into!(self, "save_cost_center", cost_centers, center.clone())
    }

    fn list_recurring(&self) -> Result<Vec<RecurringTransaction>, ApiError> {
        Ok(self.enter("list_recurring")?.recurring.clone())
    }

    fn save_recurring(&self, entry: &RecurringTransaction) -> Result<Option<i64>, ApiError> {
        save_into!(self, "save_recurring", recurring, entry.clone())
    }

    fn delete_recurring(&self, id: i64) -> Result<(), ApiError> {
        let mut st = self.enter("delete_recurring")?;
        st.recurring.retain(|r| r.id != Some(id));
        Ok(())
    }

    fn list_revenues(&self) -> Result<Vec<Revenue>, ApiError> {
        Ok(self.enter("list_revenues")?.revenues.clone())
    }

    fn save_revenue(&self, revenue: &Revenue) -> Result<Option<i64>, ApiError> {
        save_into!(self, "save_revenue", revenues, revenue.clone())
    }

    fn list_plans(&self) -> Result<Vec<Plan>, ApiError> {
        Ok(self.enter("list_plans")?.plans.clone())
    }

    fn save_plan(&self, plan: &Plan) -> Result<Option<i64>, ApiError> {
        save_into!(self, "save_plan", plans, plan.clone())
    }

    fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError> {
        let st = self.enter("login")?;
        st.users
            .iter()
            .find(|(u, p)| u.email.eq_ignore_ascii_case(email) && p == password)
            .map(|(u, _)| LoginReply {
                token: format!("token-{}", u.id),
                user: u.clone(),
            })
            .ok_or_else(|| ApiError::Http {
                status: 401,
                message: "E-mail ou senha inválidos".to_string(),
            })
    }

    fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        let mut st = self.enter("update_profile")?;
        let (user, password) = st
            .users
            .iter_mut()
            .find(|(u, _)| u.id == update.id)
            .ok_or(ApiError::Unauthenticated)?;
        user.name = update.name.clone();
        user.email = update.email.clone();
        if let Some(p) = &update.password {
            *password = p.clone();
        }
        Ok(())
    }
}
