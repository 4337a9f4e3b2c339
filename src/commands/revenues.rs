// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ContaApi;
use crate::commands::{opt_string, parse_opt};
use crate::error::ValidationError;
use crate::filters::{dedup_by_id, MonthRef, RefMatch};
use crate::ledger::Ledger;
use crate::models::Revenue;
use crate::notice::Notice;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

pub fn handle<A: ContaApi>(ledger: &mut Ledger<A>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("add", sub)) => add(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

/// Revenues of `month` (all when `None`), first occurrence of each id kept.
pub fn query<A: ContaApi>(ledger: &Ledger<A>, month: Option<MonthRef>) -> Result<Vec<Revenue>> {
    let all = ledger.api().list_revenues()?;
    Ok(dedup_by_id(
        all.into_iter()
            .filter(|r| month.is_none_or(|m| m.contains(r.date))),
    ))
}

fn list<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_opt::<MonthRef>(sub, "month")?;
    let data = query(ledger, month)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let lookups = ledger.lookups()?;
    let total: Decimal = data.iter().map(|r| r.amount).sum();
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.id.map(|i| i.to_string()).unwrap_or_default(),
                r.date.to_string(),
                r.client_code.clone(),
                lookups.contact_name(r.contact_id).unwrap_or_default().to_string(),
                r.service.clone(),
                format!("{:.2}", r.amount),
                r.billing_model.clone(),
                r.status.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Data", "Cliente", "Contato", "Serviço", "Valor", "Cobrança", "Status"],
            rows
        )
    );
    println!("Total: {:.2}", total);
    Ok(())
}

fn add<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let lookups = ledger.lookups()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").map(String::as_str).unwrap_or(""))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount.into());
    }
    let contact_id = match parse_opt::<RefMatch>(sub, "contact")? {
        Some(r) => Some(
            lookups
                .resolve_contact(&r)
                .ok_or_else(|| anyhow!("Contact '{}' not found", r))?,
        ),
        None => None,
    };
    let category_id = match parse_opt::<RefMatch>(sub, "category")? {
        Some(r) => Some(
            lookups
                .resolve_category(&r)
                .ok_or_else(|| anyhow!("Category '{}' not found", r))?,
        ),
        None => None,
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let revenue = Revenue {
        id: None,
        date,
        client_code: opt_string(sub, "client_code").ok_or(ValidationError::EmptyField("codigo_cliente"))?,
        contact_id,
        service: opt_string(sub, "service").ok_or(ValidationError::EmptyField("servico"))?,
        plan_id: sub.get_one::<i64>("plan").copied(),
        category_id,
        amount,
        revenue_type: opt_string(sub, "type").unwrap_or_default(),
        billing_model: opt_string(sub, "billing_model").unwrap_or_default(),
        status: opt_string(sub, "status").unwrap_or_default(),
        deliverables: opt_string(sub, "deliverables").unwrap_or_default(),
    };
    ledger.api().save_revenue(&revenue)?;
    Notice::success("Receita salva com sucesso").emit();
    Ok(())
}
