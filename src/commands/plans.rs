// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ContaApi;
use crate::commands::opt_string;
use crate::error::ValidationError;
use crate::models::Plan;
use crate::notice::Notice;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<A: ContaApi>(api: &A, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = opt_string(sub, "name").ok_or(ValidationError::EmptyField("nome"))?;
            api.save_plan(&Plan {
                id: None,
                name: name.clone(),
                description: opt_string(sub, "description").unwrap_or_default(),
                active: !sub.get_flag("inactive"),
            })?;
            Notice::success(format!("Plano '{}' criado com sucesso", name)).emit();
        }
        Some(("list", sub)) => {
            let data = api.list_plans()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.map(|i| i.to_string()).unwrap_or_default(),
                            p.name.clone(),
                            p.description.clone(),
                            if p.active { "sim" } else { "não" }.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Plano", "Descrição", "Ativo"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
