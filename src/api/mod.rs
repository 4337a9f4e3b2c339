// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Remote API access.
//!
//! `ContaApi` has one method per resource and verb. `HttpApi` talks to the
//! PHP backend; `MemoryApi` keeps everything in process and is what the
//! tests run against.

mod http;
mod memory;

pub use http::{HttpApi, decode_envelope, take_payload};
pub use memory::MemoryApi;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{
    Category, Contact, CostCenter, Plan, RecurringTransaction, Revenue, Transaction,
    TransactionDraft,
};

/// Resource collections exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Transactions,
    Categories,
    Contacts,
    CostCenters,
    Recurring,
    Revenues,
    Plans,
}

impl Resource {
    /// Path segment under the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Transactions => "transacoes",
            Resource::Categories => "categorias",
            Resource::Contacts => "contatos",
            Resource::CostCenters => "centros_custo",
            Resource::Recurring => "recorrentes",
            Resource::Revenues => "receitas",
            Resource::Plans => "planos",
        }
    }

    /// Key holding the list in a successful response.
    pub fn payload_key(self) -> &'static str {
        match self {
            Resource::Recurring => "recurrings",
            other => other.path(),
        }
    }
}

/// User data returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: i64,
    pub email: String,
    #[serde(rename = "nome", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginReply {
    pub token: String,
    #[serde(rename = "usuario")]
    pub user: RemoteUser,
}

/// Body of the profile update call. Password fields are only sent when the
/// user asked to change the password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

pub trait ContaApi {
    fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError>;
    /// Upsert: an id in the draft means update, no id means insert.
    /// Returns the id the server reported, if any.
    fn save_transaction(&self, draft: &TransactionDraft) -> Result<Option<i64>, ApiError>;
    fn delete_transaction(&self, id: i64) -> Result<(), ApiError>;

    fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    fn save_category(&self, category: &Category) -> Result<Option<i64>, ApiError>;

    fn list_contacts(&self) -> Result<Vec<Contact>, ApiError>;
    fn save_contact(&self, contact: &Contact) -> Result<Option<i64>, ApiError>;

    fn list_cost_centers(&self) -> Result<Vec<CostCenter>, ApiError>;
    fn save_cost_center(&self, center: &CostCenter) -> Result<Option<i64>, ApiError>;

    fn list_recurring(&self) -> Result<Vec<RecurringTransaction>, ApiError>;
    fn save_recurring(&self, entry: &RecurringTransaction) -> Result<Option<i64>, ApiError>;
    fn delete_recurring(&self, id: i64) -> Result<(), ApiError>;

    fn list_revenues(&self) -> Result<Vec<Revenue>, ApiError>;
    fn save_revenue(&self, revenue: &Revenue) -> Result<Option<i64>, ApiError>;

    fn list_plans(&self) -> Result<Vec<Plan>, ApiError>;
    fn save_plan(&self, plan: &Plan) -> Result<Option<i64>, ApiError>;

    fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError>;
    fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError>;
}
