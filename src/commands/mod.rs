// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod categories;
pub mod contacts;
pub mod cost_centers;
pub mod dashboard;
pub mod exporter;
pub mod importer;
pub mod plans;
pub mod recurring;
pub mod revenues;
pub mod transactions;

use anyhow::{anyhow, Result};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::filters::MonthRef;
use crate::ledger::Confirm;

/// Asks on stderr and reads the answer from stdin. Anything but s/y is no.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [s/N] ", prompt);
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(
            line.trim().to_lowercase().as_str(),
            "s" | "sim" | "y" | "yes"
        )
    }
}

/// Parses an optional string argument through the type's `FromStr`.
pub(crate) fn parse_opt<T>(sub: &clap::ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    sub.get_one::<String>(name)
        .map(|s| s.parse::<T>().map_err(|e| anyhow!(e)))
        .transpose()
}

pub(crate) fn parse_req<T>(sub: &clap::ArgMatches, name: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    parse_opt(sub, name)?.ok_or_else(|| anyhow!("--{} is required", name.replace('_', "-")))
}

pub(crate) fn opt_string(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub(crate) fn month_or_current(sub: &clap::ArgMatches) -> Result<MonthRef> {
    Ok(parse_opt::<MonthRef>(sub, "month")?.unwrap_or_else(MonthRef::current))
}
