// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ContaApi;
use crate::commands::month_or_current;
use crate::ledger::Ledger;
use crate::summary::monthly_breakdown;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    match sub.get_one::<i32>("year") {
        Some(year) => yearly(ledger, sub, *year),
        None => monthly(ledger, sub),
    }
}

fn monthly<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_or_current(sub)?;
    let summary = ledger.month_summary(month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let data = vec![vec![
            month.to_string(),
            fmt_money(summary.received),
            fmt_money(summary.expected),
            fmt_money(summary.paid),
            fmt_money(summary.profit),
        ]];
        println!(
            "{}",
            pretty_table(
                &["Mês", "Recebido", "A receber", "Pago", "Lucro"],
                data
            )
        );
    }
    Ok(())
}

fn yearly<A: ContaApi>(ledger: &mut Ledger<A>, sub: &clap::ArgMatches, year: i32) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let breakdown = monthly_breakdown(ledger.transactions()?, year);
    if !maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        let data: Vec<Vec<String>> = breakdown
            .iter()
            .map(|(m, s)| {
                vec![
                    m.to_string(),
                    fmt_money(s.received),
                    fmt_money(s.expected),
                    fmt_money(s.paid),
                    fmt_money(s.profit),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Mês", "Recebido", "A receber", "Pago", "Lucro"],
                data
            )
        );
    }
    Ok(())
}
