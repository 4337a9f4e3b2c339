// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::sheets::{cell_text, columns, import_from_file};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let path = sub
        .get_one::<String>("path")
        .context("--path is required")?
        .trim();
    let outcome =
        import_from_file(Path::new(path)).with_context(|| format!("Import {}", path))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &outcome.data)? {
        return Ok(());
    }
    let headers = columns(&outcome.data);
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let rows = outcome
        .data
        .iter()
        .map(|row| headers.iter().map(|h| cell_text(row.get(h))).collect())
        .collect();
    println!("{}", pretty_table(&header_refs, rows));
    println!("Imported {} rows from {}", outcome.data.len(), path);
    Ok(())
}
