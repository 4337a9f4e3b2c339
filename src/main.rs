// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use conta::api::HttpApi;
use conta::commands::{self, StdinConfirm};
use conta::config::Config;
use conta::error::ApiError;
use conta::ledger::{AssumeYes, Confirm, Ledger};
use conta::notice::Notice;
use conta::session::{FileStore, SessionContext};
use conta::{cli, logging};

fn main() {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_flag("verbose"));
    if let Err(e) = run(&matches) {
        Notice::from_error(&e).emit();
        std::process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let config = Config::load(matches.get_one::<String>("api_url").map(String::as_str))?;
    let mut session = SessionContext::open(FileStore::new(config.session_path.clone()))?;
    let api = HttpApi::new(&config, session.token().map(str::to_string))?;
    let confirm: &dyn Confirm = if matches.get_flag("yes") {
        &AssumeYes
    } else {
        &StdinConfirm
    };

    match matches.subcommand() {
        Some(("login", sub)) => return commands::auth::login(&mut session, &api, sub),
        Some(("logout", _)) => return commands::auth::logout(&mut session),
        Some(("whoami", _)) => return commands::auth::whoami(&session),
        Some(("import", sub)) => return commands::importer::handle(sub),
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        Some(_) => {}
    }

    // everything below talks to the backend on the user's behalf
    if !session.session().authenticated {
        return Err(ApiError::Unauthenticated.into());
    }
    let mut ledger = Ledger::new(api);
    match matches.subcommand() {
        Some(("profile", sub)) => commands::auth::profile(&mut session, ledger.api(), sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&mut ledger, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub, confirm)?,
        Some(("revenue", sub)) => commands::revenues::handle(&mut ledger, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(ledger.api(), sub, confirm)?,
        Some(("category", sub)) => commands::categories::handle(&mut ledger, sub)?,
        Some(("cost-center", sub)) => commands::cost_centers::handle(&mut ledger, sub)?,
        Some(("contact", sub)) => commands::contacts::handle(&mut ledger, sub)?,
        Some(("plan", sub)) => commands::plans::handle(ledger.api(), sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
