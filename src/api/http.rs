// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::{ContaApi, LoginReply, ProfileUpdate, Resource};
use crate::config::Config;
use crate::error::{ApiError, GENERIC_FAILURE};
use crate::models::{
    Category, Contact, CostCenter, Plan, RecurringTransaction, Revenue, Transaction,
    TransactionDraft,
};
use crate::utils::http_client;

/// Blocking client for the PHP backend. Every call is a single POST with a
/// JSON body; nothing is retried.
pub struct HttpApi {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(config: &Config, token: Option<String>) -> Result<Self, ApiError> {
        Ok(HttpApi {
            client: http_client(config.timeout())?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// JSON POST to `endpoint`, with the bearer token when one is set.
    fn request<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> reqwest::blocking::RequestBuilder {
        let url = format!("{}/{}", self.base_url, endpoint);
        let req = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(body);
        match self.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let req = self.request(endpoint, body);
        tracing::debug!("POST {}", url);
        let resp = req.send().map_err(|e| {
            tracing::error!("request to {} failed: {}", url, e);
            ApiError::from(e)
        })?;
        let status = resp.status().as_u16();
        let text = resp.text()?;
        tracing::debug!("{} -> {}: {}", url, status, text);
        decode_envelope(status, &text)
    }

    fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, ApiError> {
        let endpoint = format!("{}/listar.php", resource.path());
        let envelope = self.post(&endpoint, &json!({}))?;
        take_payload(envelope, resource.payload_key())
    }

    fn save<B: Serialize>(&self, resource: Resource, body: &B) -> Result<Option<i64>, ApiError> {
        let endpoint = format!("{}/salvar.php", resource.path());
        let envelope = self.post(&endpoint, body)?;
        Ok(reported_id(&envelope))
    }
}

/// Checks the HTTP status and the `status`/`success` discriminator, returning
/// the parsed body on success.
pub fn decode_envelope(status: u16, body: &str) -> Result<Value, ApiError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("mensagem")))
        .and_then(Value::as_str)
        .map(str::to_string);

    if !(200..300).contains(&status) {
        return Err(ApiError::Http {
            status,
            message: message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        });
    }

    let value = parsed.ok_or_else(|| ApiError::Decode(format!("corpo não é JSON: {}", body)))?;
    let status_failed = matches!(
        value.get("status").and_then(Value::as_str),
        Some("error" | "erro" | "fail")
    );
    let success_failed = value.get("success").and_then(Value::as_bool) == Some(false);
    if status_failed || success_failed {
        return Err(ApiError::Rejected(
            message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        ));
    }
    Ok(value)
}

/// Pulls the list under `key` out of an envelope. A missing or null key is
/// an empty list; records that fail to decode are logged and skipped.
pub fn take_payload<T: DeserializeOwned>(mut envelope: Value, key: &str) -> Result<Vec<T>, ApiError> {
    let items = match envelope.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ApiError::Decode(format!("'{}' não é uma lista: {}", key, other)));
        }
    };
    let mut out = Vec::with_capacity(items.len());
    for (n, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(v) => out.push(v),
            Err(e) => tracing::warn!("skipping {} record #{}: {}", key, n, e),
        }
    }
    Ok(out)
}

fn reported_id(envelope: &Value) -> Option<i64> {
    let v = envelope.get("id")?;
    v.as_i64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

impl ContaApi for HttpApi {
    fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.list(Resource::Transactions)
    }

    fn save_transaction(&self, draft: &TransactionDraft) -> Result<Option<i64>, ApiError> {
        self.save(Resource::Transactions, draft)
    }

    fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        // No delete endpoint exists on the backend yet.
        tracing::warn!("transaction {} removed locally only; backend delete is not wired", id);
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.list(Resource::Categories)
    }

    fn save_category(&self, category: &Category) -> Result<Option<i64>, ApiError> {
        self.save(Resource::Categories, category)
    }

    fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.list(Resource::Contacts)
    }

    fn save_contact(&self, contact: &Contact) -> Result<Option<i64>, ApiError> {
        self.save(Resource::Contacts, contact)
    }

    fn list_cost_centers(&self) -> Result<Vec<CostCenter>, ApiError> {
        self.list(Resource::CostCenters)
    }

    fn save_cost_center(&self, center: &CostCenter) -> Result<Option<i64>, ApiError> {
        self.save(Resource::CostCenters, center)
    }

    fn list_recurring(&self) -> Result<Vec<RecurringTransaction>, ApiError> {
        self.list(Resource::Recurring)
    }

    fn save_recurring(&self, entry: &RecurringTransaction) -> Result<Option<i64>, ApiError> {
        self.save(Resource::Recurring, entry)
    }

    fn delete_recurring(&self, id: i64) -> Result<(), ApiError> {
        tracing::warn!("recurring entry {} removed locally only; backend delete is not wired", id);
        Ok(())
    }

    fn list_revenues(&self) -> Result<Vec<Revenue>, ApiError> {
        self.list(Resource::Revenues)
    }

    fn save_revenue(&self, revenue: &Revenue) -> Result<Option<i64>, ApiError> {
        self.save(Resource::Revenues, revenue)
    }

    fn list_plans(&self) -> Result<Vec<Plan>, ApiError> {
        self.list(Resource::Plans)
    }

    fn save_plan(&self, plan: &Plan) -> Result<Option<i64>, ApiError> {
        self.save(Resource::Plans, plan)
    }

    fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError> {
        let envelope = self.post(
            "auth/login.php",
            &json!({ "email": email, "senha": password }),
        )?;
        Ok(serde_json::from_value(envelope)?)
    }

    fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        if self.token.is_none() {
            return Err(ApiError::Unauthenticated);
        }
        self.post("auth/atualizar_perfil.php", update)?;
        Ok(())
    }
}
