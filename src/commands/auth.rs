// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ContaApi;
use crate::commands::opt_string;
use crate::notice::Notice;
use crate::session::{KeyValueStore, ProfileChange, SessionContext};
use crate::utils::pretty_table;
use anyhow::{anyhow, Result};

pub fn login<S: KeyValueStore, A: ContaApi>(
    session: &mut SessionContext<S>,
    api: &A,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let email = sub.get_one::<String>("email").ok_or_else(|| anyhow!("--email is required"))?;
    let password = sub
        .get_one::<String>("password")
        .ok_or_else(|| anyhow!("--password is required"))?;
    session.login(api, email, password)?;
    Notice::success(format!("Bem-vindo, {}", session.session().name)).emit();
    Ok(())
}

pub fn logout<S: KeyValueStore>(session: &mut SessionContext<S>) -> Result<()> {
    session.logout()?;
    Notice::success("Sessão encerrada").emit();
    Ok(())
}

pub fn whoami<S: KeyValueStore>(session: &SessionContext<S>) -> Result<()> {
    let s = session.session();
    if !s.authenticated {
        println!("Not logged in");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["ID", "Nome", "E-mail"],
            vec![vec![s.id.to_string(), s.name.clone(), s.email.clone()]],
        )
    );
    Ok(())
}

pub fn profile<S: KeyValueStore, A: ContaApi>(
    session: &mut SessionContext<S>,
    api: &A,
    m: &clap::ArgMatches,
) -> Result<()> {
    if let Some(("update", sub)) = m.subcommand() {
        let change = ProfileChange {
            name: opt_string(sub, "name").unwrap_or_default(),
            email: opt_string(sub, "email").unwrap_or_default(),
            new_password: sub.get_one::<String>("password").cloned(),
            confirm_password: sub.get_one::<String>("confirm_password").cloned(),
        };
        session.update_profile(api, &change)?;
        Notice::success("Perfil atualizado com sucesso").emit();
    }
    Ok(())
}
