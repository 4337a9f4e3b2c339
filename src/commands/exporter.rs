// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ContaApi;
use crate::commands::{parse_opt, revenues};
use crate::filters::{dedup_by_id, filter_by_month, MonthRef};
use crate::ledger::Ledger;
use crate::sheets::{export, revenues_to_rows, transactions_to_rows, ExportFormat};
use anyhow::{anyhow, Context, Result};
use std::path::Path;

pub fn handle<A: ContaApi>(ledger: &mut Ledger<A>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        Some(("revenues", sub)) => export_revenues(ledger, sub),
        _ => Ok(()),
    }
}

fn target(sub: &clap::ArgMatches) -> Result<(ExportFormat, &str)> {
    let format = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("csv")
        .parse::<ExportFormat>()
        .map_err(|e| anyhow!(e))?;
    let out = sub
        .get_one::<String>("out")
        .context("--out is required")?;
    Ok((format, out.as_str()))
}

fn export_transactions<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let (format, out) = target(sub)?;
    let month = parse_opt::<MonthRef>(sub, "month")?;
    let lookups = ledger.lookups()?;
    let all = ledger.transactions()?;
    let data = match month {
        Some(month) => dedup_by_id(filter_by_month(all, month)),
        None => dedup_by_id(all.iter().cloned()),
    };
    let rows = transactions_to_rows(&data, &lookups);
    export(&rows, Path::new(out), format, "Transações")
        .with_context(|| format!("Export to {}", out))?;
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

fn export_revenues<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let (format, out) = target(sub)?;
    let data = revenues::query(ledger, None)?;
    let lookups = ledger.lookups()?;
    let rows = revenues_to_rows(&data, &lookups);
    export(&rows, Path::new(out), format, "Receitas")
        .with_context(|| format!("Export to {}", out))?;
    println!("Exported {} revenues to {}", rows.len(), out);
    Ok(())
}
