// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ContaApi;
use crate::commands::{month_or_current, opt_string, parse_opt, parse_req};
use crate::filters::{Lookups, RefMatch, TransactionFilter, TransactionRow};
use crate::ledger::{Confirm, Ledger};
use crate::models::{Kind, Recurrence, Transaction, TransactionDraft, status_label};
use crate::notice::Notice;
use crate::summary::summarize;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};

pub fn handle<A: ContaApi>(
    ledger: &mut Ledger<A>,
    m: &clap::ArgMatches,
    confirm: &dyn Confirm,
) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("toggle-paid", sub)) => toggle_paid(ledger, sub)?,
        Some(("rm", sub)) => remove(ledger, sub, confirm)?,
        Some(("duplicate", sub)) => duplicate(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        kind: parse_opt::<Kind>(sub, "kind")?,
        paid: parse_opt(sub, "paid")?,
        category: parse_opt::<RefMatch>(sub, "category")?,
        contact: parse_opt::<RefMatch>(sub, "contact")?,
        search: opt_string(sub, "search"),
    })
}

/// Rows of the selected month after filters and id de-duplication.
pub fn query_rows<A: ContaApi>(
    ledger: &mut Ledger<A>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let month = month_or_current(sub)?;
    let filter = filter_from_args(sub)?;
    Ok(ledger.month_rows(month, &filter)?)
}

fn list<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_or_current(sub)?;
    let filter = filter_from_args(sub)?;
    let data = ledger.month_rows(month, &filter)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.map(|i| i.to_string()).unwrap_or_default(),
                    r.date.clone(),
                    r.description.clone(),
                    r.contact.clone(),
                    r.category.clone(),
                    r.cost_center.clone(),
                    r.amount.clone(),
                    r.kind.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Data",
                    "Descrição",
                    "Contato",
                    "Categoria",
                    "Centro de Custo",
                    "Valor",
                    "Tipo",
                    "Status"
                ],
                rows,
            )
        );
        let shown = ledger.month_transactions(month, &filter)?;
        let s = summarize(&shown);
        println!(
            "{}: recebido {} | a receber {} | pago {} | lucro {}",
            month,
            fmt_money(s.received),
            fmt_money(s.expected),
            fmt_money(s.paid),
            fmt_money(s.profit)
        );
    }
    Ok(())
}

fn resolve(
    raw: Option<String>,
    what: &str,
    find: impl Fn(&RefMatch) -> Option<i64>,
) -> Result<Option<i64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let r: RefMatch = raw.parse().map_err(|e: String| anyhow!(e))?;
    find(&r)
        .map(Some)
        .ok_or_else(|| anyhow!("{} '{}' not found", what, raw))
}

/// Applies the form arguments present in `sub` on top of `draft`.
fn apply_form(draft: &mut TransactionDraft, sub: &clap::ArgMatches, lookups: &Lookups) -> Result<()> {
    if let Some(d) = sub.get_one::<String>("date") {
        draft.date = parse_date(d)?;
    }
    if let Some(desc) = sub.get_one::<String>("description") {
        draft.description = desc.trim().to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        draft.amount = parse_decimal(a)?;
    }
    if let Some(kind) = parse_opt::<Kind>(sub, "kind")? {
        draft.kind = kind;
    }
    if let Some(id) = resolve(opt_string(sub, "category"), "Category", |r| {
        lookups.resolve_category(r)
    })? {
        draft.category_id = Some(id);
    }
    if let Some(id) = resolve(opt_string(sub, "contact"), "Contact", |r| {
        lookups.resolve_contact(r)
    })? {
        draft.contact_id = Some(id);
    }
    if let Some(id) = resolve(opt_string(sub, "cost_center"), "Cost center", |r| {
        lookups.resolve_cost_center(r)
    })? {
        draft.cost_center_id = Some(id);
    }
    if let Some(paid) = sub.get_one::<bool>("paid") {
        draft.paid = *paid;
    }
    if let Some(rec) = parse_opt::<Recurrence>(sub, "recurrence")? {
        draft.recurrence = rec;
    }
    if let Some(notes) = sub.get_one::<String>("notes") {
        draft.notes = Some(notes.clone()).filter(|n| !n.trim().is_empty());
    }
    draft.status = status_label(draft.kind, draft.paid).to_string();
    Ok(())
}

fn add<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let lookups = ledger.lookups()?;
    let kind: Kind = parse_req(sub, "kind")?;
    let mut draft = TransactionDraft {
        id: None,
        date: chrono::Local::now().date_naive(),
        description: String::new(),
        contact_id: None,
        category_id: None,
        cost_center_id: None,
        amount: rust_decimal::Decimal::ZERO,
        kind,
        paid: false,
        recurrence: Recurrence::None,
        notes: None,
        status: String::new(),
    };
    apply_form(&mut draft, sub, &lookups)?;
    let id = ledger.save(&draft)?;
    Notice::success("Transação salva com sucesso").emit();
    if let Some(id) = id {
        println!("Recorded transaction {} ({} {} on {})", id, draft.kind, draft.amount, draft.date);
    }
    Ok(())
}

fn find<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<Transaction> {
    let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("--id is required"))?;
    ledger
        .find(id)?
        .ok_or_else(|| anyhow!("Transaction {} not found", id))
}

fn edit<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let tx = find(ledger, sub)?;
    let lookups = ledger.lookups()?;
    let mut draft = TransactionDraft::from_transaction(&tx);
    apply_form(&mut draft, sub, &lookups)?;
    ledger.save(&draft)?;
    Notice::success("Transação atualizada com sucesso").emit();
    Ok(())
}

fn toggle_paid<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let tx = find(ledger, sub)?;
    let updated = ledger.toggle_paid(&tx)?;
    Notice::success(format!(
        "Transação marcada como {}",
        updated.status.as_deref().unwrap_or_default()
    ))
    .emit();
    Ok(())
}

fn remove<A: ContaApi>(
    ledger: &mut Ledger<A>,
    sub: &clap::ArgMatches,
    confirm: &dyn Confirm,
) -> Result<()> {
    let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("--id is required"))?;
    if ledger.delete(id, confirm)? {
        Notice::success("Transação excluída com sucesso").emit();
    } else {
        println!("Exclusão cancelada");
    }
    Ok(())
}

fn duplicate<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let tx = find(ledger, sub)?;
    let draft = ledger.duplicate(&tx);
    if sub.get_flag("save") {
        let id = ledger.save(&draft)?;
        Notice::success("Transação duplicada com sucesso").emit();
        if let Some(id) = id {
            println!("Copy saved as transaction {}", id);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&draft)?);
    }
    Ok(())
}
