// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Records exchanged with the Conta Partner API.
//!
//! Field names follow the Portuguese wire payload; the PHP backend is loose
//! about scalar types (ids and amounts may arrive as strings, flags as 0/1),
//! so decoding goes through the lenient helpers at the bottom of this file.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "despesa")]
    Expense,
    #[serde(rename = "receita")]
    Income,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Expense => "despesa",
            Kind::Income => "receita",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "despesa" | "expense" => Ok(Kind::Expense),
            "receita" | "income" => Ok(Kind::Income),
            other => Err(format!("Invalid kind '{}', expected despesa|receita", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    #[default]
    #[serde(rename = "nenhuma")]
    None,
    #[serde(rename = "mensal")]
    Monthly,
    #[serde(rename = "anual")]
    Yearly,
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "nenhuma" | "none" => Ok(Recurrence::None),
            "mensal" | "monthly" => Ok(Recurrence::Monthly),
            "anual" | "yearly" => Ok(Recurrence::Yearly),
            other => Err(format!(
                "Invalid recurrence '{}', expected nenhuma|mensal|anual",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "mensal")]
    Monthly,
    #[serde(rename = "semanal")]
    Weekly,
    #[serde(rename = "anual")]
    Yearly,
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mensal" | "monthly" => Ok(Frequency::Monthly),
            "semanal" | "weekly" => Ok(Frequency::Weekly),
            "anual" | "yearly" => Ok(Frequency::Yearly),
            other => Err(format!(
                "Invalid frequency '{}', expected mensal|semanal|anual",
                other
            )),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Frequency::Monthly => "mensal",
            Frequency::Weekly => "semanal",
            Frequency::Yearly => "anual",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    #[serde(rename = "cliente")]
    Client,
    #[serde(rename = "fornecedor")]
    Supplier,
}

impl FromStr for ContactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cliente" | "client" => Ok(ContactKind::Client),
            "fornecedor" | "supplier" => Ok(ContactKind::Supplier),
            other => Err(format!(
                "Invalid contact kind '{}', expected cliente|fornecedor",
                other
            )),
        }
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContactKind::Client => "cliente",
            ContactKind::Supplier => "fornecedor",
        })
    }
}

/// Status label shown next to a transaction, derived from kind and paid flag.
pub fn status_label(kind: Kind, paid: bool) -> &'static str {
    match (kind, paid) {
        (Kind::Expense, true) => "Pago",
        (Kind::Expense, false) => "A pagar",
        (Kind::Income, true) => "Recebido",
        (Kind::Income, false) => "A receber",
    }
}

/// A transaction as returned by the API.
///
/// `amount` is `None` when the server sent something that is not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "data", deserialize_with = "de_date")]
    pub date: NaiveDate,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "contato_id", default, deserialize_with = "de_opt_id")]
    pub contact_id: Option<i64>,
    #[serde(rename = "categoria_id", default, deserialize_with = "de_opt_id")]
    pub category_id: Option<i64>,
    #[serde(rename = "centro_custo_id", default, deserialize_with = "de_opt_id")]
    pub cost_center_id: Option<i64>,
    #[serde(rename = "valor", default, deserialize_with = "de_amount")]
    pub amount: Option<Decimal>,
    #[serde(rename = "tipo")]
    pub kind: Kind,
    #[serde(rename = "pago", default, deserialize_with = "de_flag")]
    pub paid: bool,
    #[serde(rename = "recorrencia", default, deserialize_with = "de_recurrence")]
    pub recurrence: Recurrence,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Form value used to create, edit or duplicate a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "contato_id")]
    pub contact_id: Option<i64>,
    #[serde(rename = "categoria_id")]
    pub category_id: Option<i64>,
    #[serde(rename = "centro_custo_id")]
    pub cost_center_id: Option<i64>,
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "tipo")]
    pub kind: Kind,
    #[serde(rename = "pago")]
    pub paid: bool,
    #[serde(rename = "recorrencia")]
    pub recurrence: Recurrence,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: String,
}

impl TransactionDraft {
    /// Rebuilds the form value from a fetched record. A record whose amount
    /// could not be decoded comes back with a zero amount, which save rejects.
    pub fn from_transaction(tx: &Transaction) -> Self {
        TransactionDraft {
            id: tx.id,
            date: tx.date,
            description: tx.description.clone(),
            contact_id: tx.contact_id,
            category_id: tx.category_id,
            cost_center_id: tx.cost_center_id,
            amount: tx.amount.unwrap_or(Decimal::ZERO),
            kind: tx.kind,
            paid: tx.paid,
            recurrence: tx.recurrence,
            notes: tx.notes.clone(),
            status: tx
                .status
                .clone()
                .unwrap_or_else(|| status_label(tx.kind, tx.paid).to_string()),
        }
    }

    pub fn into_transaction(self) -> Transaction {
        Transaction {
            id: self.id,
            date: self.date,
            description: self.description,
            contact_id: self.contact_id,
            category_id: self.category_id,
            cost_center_id: self.cost_center_id,
            amount: Some(self.amount),
            kind: self.kind,
            paid: self.paid,
            recurrence: self.recurrence,
            notes: self.notes,
            status: Some(self.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenter {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
    #[serde(rename = "empresa", default)]
    pub company: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: ContactKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "ativo", default, deserialize_with = "de_flag")]
    pub active: bool,
}

/// Template for a repeating entry. Nothing materializes these into
/// transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor", deserialize_with = "de_decimal")]
    pub amount: Decimal,
    #[serde(rename = "tipo")]
    pub kind: Kind,
    #[serde(rename = "frequencia")]
    pub frequency: Frequency,
    #[serde(rename = "dia", default, deserialize_with = "de_opt_u32")]
    pub day: Option<u32>,
    #[serde(rename = "dia_semana", default, deserialize_with = "de_opt_u32")]
    pub weekday: Option<u32>,
    #[serde(rename = "mes", default, deserialize_with = "de_opt_u32")]
    pub month: Option<u32>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
}

/// Detailed revenue record (receita detalhada) billed to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "data", deserialize_with = "de_date")]
    pub date: NaiveDate,
    #[serde(rename = "codigo_cliente", default)]
    pub client_code: String,
    #[serde(rename = "contato_id", default, deserialize_with = "de_opt_id")]
    pub contact_id: Option<i64>,
    #[serde(rename = "servico", default)]
    pub service: String,
    #[serde(rename = "plano_id", default, deserialize_with = "de_opt_id")]
    pub plan_id: Option<i64>,
    #[serde(rename = "categoria_id", default, deserialize_with = "de_opt_id")]
    pub category_id: Option<i64>,
    #[serde(rename = "valor", deserialize_with = "de_decimal")]
    pub amount: Decimal,
    #[serde(rename = "tipo", default)]
    pub revenue_type: String,
    #[serde(rename = "modelo_cobranca", default)]
    pub billing_model: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "entregas_principais", default)]
    pub deliverables: String,
}

/// Records that carry an optional server-assigned id.
pub trait Identified {
    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> Option<i64> {
                    self.id
                }

                fn set_id(&mut self, id: i64) {
                    self.id = Some(id);
                }
            }
        )*
    };
}

identified!(
    Transaction,
    Category,
    CostCenter,
    Contact,
    Plan,
    RecurringTransaction,
    Revenue,
);

// Lenient decoders for the PHP payload.

fn value_to_decimal(v: &Value) -> Option<Decimal> {
    match v {
        Value::Number(n) => n.to_string().parse::<Decimal>().ok().or_else(|| {
            n.as_f64().and_then(|f| Decimal::try_from(f).ok())
        }),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

fn value_to_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn de_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_to_decimal(&v))
}

fn de_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    let v = Value::deserialize(d)?;
    value_to_decimal(&v)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal '{}'", v)))
}

fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_to_i64(&v))
}

fn de_opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_to_i64(&v).and_then(|n| u32::try_from(n).ok()))
}

fn de_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "sim"),
        _ => false,
    })
}

fn de_recurrence<'de, D: Deserializer<'de>>(d: D) -> Result<Recurrence, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(v.as_str()
        .and_then(|s| s.parse::<Recurrence>().ok())
        .unwrap_or_default())
}

fn de_date<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let s = String::deserialize(d)?;
    // "2025-08-10 00:00:00" and "2025-08-10T00:00:00Z" both start with the date
    let head = s.get(..10).unwrap_or(&s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_loose_php_scalars() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": "7",
            "data": "2025-03-04 00:00:00",
            "descricao": "Hosting",
            "categoria_id": "3",
            "contato_id": null,
            "valor": "199.90",
            "tipo": "despesa",
            "pago": "1",
            "recorrencia": "mensal"
        }))
        .unwrap();
        assert_eq!(tx.id, Some(7));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(tx.category_id, Some(3));
        assert_eq!(tx.contact_id, None);
        assert_eq!(tx.amount, Some("199.90".parse().unwrap()));
        assert!(tx.paid);
        assert_eq!(tx.recurrence, Recurrence::Monthly);
    }

    #[test]
    fn non_numeric_amount_decodes_to_none() {
        let tx: Transaction = serde_json::from_value(json!({
            "data": "2025-03-04",
            "valor": "abc",
            "tipo": "receita",
            "pago": 0
        }))
        .unwrap();
        assert_eq!(tx.amount, None);
        assert!(!tx.paid);
        assert_eq!(tx.recurrence, Recurrence::None);
    }

    #[test]
    fn status_label_follows_kind() {
        assert_eq!(status_label(Kind::Expense, true), "Pago");
        assert_eq!(status_label(Kind::Expense, false), "A pagar");
        assert_eq!(status_label(Kind::Income, true), "Recebido");
        assert_eq!(status_label(Kind::Income, false), "A receber");
    }
}
