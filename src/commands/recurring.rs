// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ContaApi;
use crate::commands::{opt_string, parse_req};
use crate::error::ValidationError;
use crate::ledger::Confirm;
use crate::models::{Frequency, Kind, RecurringTransaction};
use crate::notice::Notice;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

pub fn handle<A: ContaApi>(api: &A, m: &clap::ArgMatches, confirm: &dyn Confirm) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(api, sub)?,
        Some(("list", sub)) => list(api, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("--id is required"))?;
            if confirm.confirm("Tem certeza que deseja excluir esta transação recorrente?") {
                api.delete_recurring(id)?;
                Notice::success("Transação recorrente excluída com sucesso").emit();
            } else {
                println!("Exclusão cancelada");
            }
        }
        _ => {}
    }
    Ok(())
}

/// Day/weekday/month selectors that make sense for the frequency.
fn check_schedule(entry: &RecurringTransaction) -> Result<()> {
    match entry.frequency {
        Frequency::Weekly => {
            if entry.weekday.is_none_or(|d| d > 6) {
                return Err(anyhow!("--weekday 0-6 is required for semanal"));
            }
        }
        Frequency::Monthly => {
            if entry.day.is_none_or(|d| !(1..=31).contains(&d)) {
                return Err(anyhow!("--day 1-31 is required for mensal"));
            }
        }
        Frequency::Yearly => {
            if entry.day.is_none_or(|d| !(1..=31).contains(&d))
                || entry.month.is_none_or(|m| !(1..=12).contains(&m))
            {
                return Err(anyhow!("--day 1-31 and --month 1-12 are required for anual"));
            }
        }
    }
    Ok(())
}

fn add<A: ContaApi>(api: &A, sub: &clap::ArgMatches) -> Result<()> {
    let description =
        opt_string(sub, "description").ok_or(ValidationError::EmptyField("descricao"))?;
    let amount = parse_decimal(sub.get_one::<String>("amount").map(String::as_str).unwrap_or(""))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount.into());
    }
    let entry = RecurringTransaction {
        id: None,
        description,
        amount,
        kind: parse_req::<Kind>(sub, "kind")?,
        frequency: parse_req::<Frequency>(sub, "frequency")?,
        day: sub.get_one::<u32>("day").copied(),
        weekday: sub.get_one::<u32>("weekday").copied(),
        month: sub.get_one::<u32>("month").copied(),
        category: opt_string(sub, "category"),
    };
    check_schedule(&entry)?;
    api.save_recurring(&entry)?;
    Notice::success("Transação recorrente salva com sucesso").emit();
    Ok(())
}

fn schedule_text(r: &RecurringTransaction) -> String {
    match r.frequency {
        Frequency::Weekly => format!("semanal (dia da semana {})", r.weekday.unwrap_or(0)),
        Frequency::Monthly => format!("mensal (dia {})", r.day.unwrap_or(1)),
        Frequency::Yearly => format!(
            "anual ({:02}/{:02})",
            r.day.unwrap_or(1),
            r.month.unwrap_or(1)
        ),
    }
}

fn list<A: ContaApi>(api: &A, sub: &clap::ArgMatches) -> Result<()> {
    let data = api.list_recurring()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.map(|i| i.to_string()).unwrap_or_default(),
                    r.description.clone(),
                    format!("{:.2}", r.amount),
                    r.kind.to_string(),
                    schedule_text(r),
                    r.category.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Descrição", "Valor", "Tipo", "Frequência", "Categoria"],
                rows
            )
        );
    }
    Ok(())
}
