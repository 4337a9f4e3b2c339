// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn kind_arg(required: bool) -> Arg {
    Arg::new("kind")
        .long("kind")
        .required(required)
        .help("despesa|receita")
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("YYYY-MM (defaults to the current month)")
}

/// Fields of the transaction form. On `add` the core ones are required;
/// on `edit` everything is optional and overrides the stored record.
fn transaction_form(cmd: Command, creating: bool) -> Command {
    cmd.arg(Arg::new("date").long("date").help("YYYY-MM-DD (defaults to today)"))
        .arg(Arg::new("description").long("description").required(creating))
        .arg(Arg::new("amount").long("amount").required(creating))
        .arg(kind_arg(creating))
        .arg(Arg::new("category").long("category").help("Category id or name"))
        .arg(Arg::new("contact").long("contact").help("Contact id or name"))
        .arg(Arg::new("cost_center").long("cost-center").help("Cost center id or name"))
        .arg(
            Arg::new("paid")
                .long("paid")
                .value_parser(value_parser!(bool))
                .help("true|false"),
        )
        .arg(
            Arg::new("recurrence")
                .long("recurrence")
                .help("nenhuma|mensal|anual"),
        )
        .arg(Arg::new("notes").long("notes"))
}

pub fn build_cli() -> Command {
    Command::new("conta")
        .about("Conta Partner B2B: transactions, revenues and recurring entries from the terminal")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api_url")
                .long("api-url")
                .env("CONTA_API_URL")
                .global(true)
                .help("Base URL of the Conta Partner API"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("yes")
                .long("yes")
                .short('y')
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Skip confirmation prompts"),
        )
        .subcommand(
            Command::new("login")
                .about("Authenticate and store the session")
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .env("CONTA_PASSWORD")
                        .required(true)
                        .hide_env_values(true),
                ),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("profile").subcommand(
                Command::new("update")
                    .arg(Arg::new("name").long("name").required(true))
                    .arg(Arg::new("email").long("email").required(true))
                    .arg(Arg::new("password").long("password"))
                    .arg(Arg::new("confirm_password").long("confirm-password")),
            ),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Received, expected, paid and profit for a month")
                .arg(month_arg())
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32))
                        .conflicts_with("month")
                        .help("Show a month-by-month breakdown for the year"),
                ),
        ))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(kind_arg(false))
                        .arg(Arg::new("paid").long("paid").help("paid|pending"))
                        .arg(Arg::new("category").long("category").help("Category id or name"))
                        .arg(Arg::new("contact").long("contact").help("Contact id or name"))
                        .arg(Arg::new("search").long("search")),
                ))
                .subcommand(transaction_form(Command::new("add"), true))
                .subcommand(transaction_form(Command::new("edit").arg(id_arg()), false))
                .subcommand(Command::new("toggle-paid").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(
                    Command::new("duplicate").arg(id_arg()).arg(
                        Arg::new("save")
                            .long("save")
                            .action(ArgAction::SetTrue)
                            .help("Persist the copy instead of only showing it"),
                    ),
                ),
        )
        .subcommand(
            Command::new("revenue")
                .about("Detailed revenues")
                .subcommand(json_flags(Command::new("list").arg(
                    Arg::new("month").long("month").help("YYYY-MM"),
                )))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("client_code").long("client-code").required(true))
                        .arg(Arg::new("service").long("service").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("contact").long("contact"))
                        .arg(Arg::new("plan").long("plan").value_parser(value_parser!(i64)))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type").default_value("recorrente"))
                        .arg(
                            Arg::new("billing_model")
                                .long("billing-model")
                                .default_value("mensal"),
                        )
                        .arg(Arg::new("status").long("status").default_value("ativo"))
                        .arg(Arg::new("deliverables").long("deliverables")),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring entry templates")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(kind_arg(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .help("mensal|semanal|anual"),
                        )
                        .arg(Arg::new("day").long("day").value_parser(value_parser!(u32)))
                        .arg(
                            Arg::new("weekday")
                                .long("weekday")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .subcommand(json_flags(Command::new("list").arg(kind_arg(false))))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(kind_arg(true)),
                ),
        )
        .subcommand(
            Command::new("cost-center")
                .subcommand(json_flags(Command::new("list").arg(kind_arg(false))))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(kind_arg(true)),
                ),
        )
        .subcommand(
            Command::new("contact")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("kind").long("kind").help("cliente|fornecedor")),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("cliente|fornecedor"),
                        )
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("company").long("company")),
                ),
        )
        .subcommand(
            Command::new("plan")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("inactive")
                                .long("inactive")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(json_flags(
            Command::new("import")
                .about("Read a CSV/XLSX/JSON sheet into header-keyed rows")
                .arg(Arg::new("path").long("path").required(true)),
        ))
        .subcommand(
            Command::new("export")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|xlsx|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(Arg::new("month").long("month").help("YYYY-MM; all months if omitted")),
                )
                .subcommand(
                    Command::new("revenues")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|xlsx|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}
