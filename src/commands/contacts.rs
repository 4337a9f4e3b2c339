// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ContaApi, Resource};
use crate::commands::{opt_string, parse_opt, parse_req};
use crate::error::ValidationError;
use crate::ledger::Ledger;
use crate::models::{Contact, ContactKind};
use crate::notice::Notice;
use crate::utils::{maybe_print_json, pretty_table, validate_email};
use anyhow::Result;

pub fn handle<A: ContaApi>(ledger: &mut Ledger<A>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = opt_string(sub, "name").ok_or(ValidationError::EmptyField("nome"))?;
            let kind: ContactKind = parse_req(sub, "kind")?;
            let email = opt_string(sub, "email");
            if let Some(e) = &email {
                validate_email(e)?;
            }
            ledger.api().save_contact(&Contact {
                id: None,
                name: name.clone(),
                email,
                phone: opt_string(sub, "phone"),
                company: opt_string(sub, "company"),
                kind,
            })?;
            ledger.invalidate(Resource::Contacts);
            Notice::success(format!("Contato '{}' criado com sucesso", name)).emit();
        }
        Some(("list", sub)) => {
            let kind = parse_opt::<ContactKind>(sub, "kind")?;
            let mut data: Vec<Contact> = ledger
                .contacts()?
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
                            c.email.clone().unwrap_or_default(),
                            c.phone.clone().unwrap_or_default(),
                            c.company.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Nome", "Tipo", "E-mail", "Telefone", "Empresa"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
