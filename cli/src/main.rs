// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

mod args;
mod basket;
mod error;
mod user;
mod wallet;

use std::path::Path;

use clap::{Arg, SubCommand};
use log::LevelFilter;

use crate::args::{BuyArgs, QueryArgs, SellArgs};
use crate::error::CliError;
use crate::user::UserConfig;

const DEFAULT_ORG_ROOT: &str = "organization";
const DEFAULT_FIXTURES: &str = "test-network";

fn run() -> Result<(), CliError> {
    let app = clap_app!(fruitbasket =>
        (version: crate_version!())
        (about: "Sell, buy and query fruit baskets")
        (@setting SubcommandRequiredElseHelp)
        (@arg verbose: -v --verbose +multiple
         "increase output verbosity"))
    .arg(
        Arg::with_name("org_root")
            .long("org-root")
            .takes_value(true)
            .default_value(DEFAULT_ORG_ROOT)
            .help("directory holding each organization's wallets and connection profiles"),
    )
    .subcommand(
        SubCommand::with_name("add-to-wallet")
            .about("add the current user's identity to their wallet")
            .arg(
                Arg::with_name("fixtures")
                    .long("fixtures")
                    .takes_value(true)
                    .default_value(DEFAULT_FIXTURES)
                    .help("test network directory holding the users' credentials"),
            ),
    )
    .subcommand(
        SubCommand::with_name("sell")
            .about("list a fruit basket for sale")
            .arg(
                Arg::with_name("fields")
                    .multiple(true)
                    .help("id=<id> fruitname=<name> price=<price>"),
            ),
    )
    .subcommand(
        SubCommand::with_name("buy")
            .about("buy a fruit basket")
            .arg(
                Arg::with_name("fields")
                    .multiple(true)
                    .help("seller=<name> id=<id> price=<price>"),
            ),
    )
    .subcommand(
        SubCommand::with_name("query")
            .about("show a fruit basket")
            .arg(Arg::with_name("seller").help("seller of the basket, or 'all'"))
            .arg(Arg::with_name("id").help("id of the basket")),
    );

    let matches = app.get_matches();

    let logger = simple_logger::SimpleLogger::new().with_utc_timestamps();
    let logger = match matches.occurrences_of("verbose") {
        0 => logger.with_level(LevelFilter::Warn),
        1 => logger.with_level(LevelFilter::Info),
        2 => logger.with_level(LevelFilter::Debug),
        _ => logger.with_level(LevelFilter::Trace),
    };
    logger.init()?;

    let org_root = Path::new(matches.value_of("org_root").unwrap_or(DEFAULT_ORG_ROOT));

    match matches.subcommand() {
        ("add-to-wallet", Some(add_matches)) => {
            let fixtures = Path::new(add_matches.value_of("fixtures").unwrap_or(DEFAULT_FIXTURES));
            let user = UserConfig::from_env()?;
            wallet::add_to_wallet(&user, org_root, fixtures)?;
            println!("done");
        }
        ("sell", Some(sell_matches)) => {
            let fields = sell_matches
                .values_of("fields")
                .map(|values| values.collect::<Vec<_>>())
                .unwrap_or_default();
            let args = SellArgs::parse(&fields)?;
            let user = UserConfig::from_env()?;
            basket::do_sell(&user, org_root, &args)?;
            println!("Sell program complete.");
        }
        ("buy", Some(buy_matches)) => {
            let fields = buy_matches
                .values_of("fields")
                .map(|values| values.collect::<Vec<_>>())
                .unwrap_or_default();
            let args = BuyArgs::parse(&fields)?;
            let user = UserConfig::from_env()?;
            basket::do_buy(&user, org_root, &args)?;
            println!("Buy program complete.");
        }
        ("query", Some(query_matches)) => {
            let args = QueryArgs::parse(
                query_matches.value_of("seller"),
                query_matches.value_of("id"),
            )?;
            let user = UserConfig::from_env()?;
            basket::do_query(&user, org_root, &args)?;
            println!("Query program complete.");
        }
        _ => {
            return Err(CliError::User(
                "a subcommand is required, see --help".into(),
            ))
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
