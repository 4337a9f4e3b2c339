// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ContaApi, Resource};
use crate::commands::{parse_opt, parse_req};
use crate::ledger::Ledger;
use crate::models::{Category, Kind};
use crate::notice::Notice;
use crate::utils::{maybe_print_json, pretty_table};
use crate::error::ValidationError;
use anyhow::Result;

pub fn handle<A: ContaApi>(ledger: &mut Ledger<A>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").map(|s| s.trim()).unwrap_or_default();
            if name.is_empty() {
                return Err(ValidationError::EmptyField("nome").into());
            }
            let kind: Kind = parse_req(sub, "kind")?;
            ledger.api().save_category(&Category {
                id: None,
                name: name.to_string(),
                kind,
            })?;
            ledger.invalidate(Resource::Categories);
            Notice::success(format!("Categoria '{}' criada com sucesso", name)).emit();
        }
        Some(("list", sub)) => {
            let kind = parse_opt::<Kind>(sub, "kind")?;
            let mut data: Vec<Category> = ledger
                .categories()?
                .iter()
                .filter(|c| kind.is_none_or(|k| c.kind == k))
                .cloned()
                .collect();
            data.sort_by(|a, b| a.name.cmp(&b.name));
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.map(|i| i.to_string()).unwrap_or_default(),
                            c.name.clone(),
                            c.kind.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Categoria", "Tipo"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
