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

//! Parsing of the `key=value` arguments of the sell, buy and query commands.

use rand::Rng;

use crate::error::CliError;

/// Exclusive upper bound of the ids generated for baskets listed without one.
const MAX_DEFAULT_ID: u32 = 1000;
const DEFAULT_FRUIT_NAME: &str = "fruit";
const DEFAULT_PRICE: f64 = 0.0;

/// Arguments of `sell`. The seller and owner are always the current user.
///
/// Defaults: a random id below 1000, fruit name `fruit`, price `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SellArgs {
    pub id: String,
    pub fruit_name: String,
    pub price: f64,
}

impl SellArgs {
    pub fn parse<S: AsRef<str>>(fields: &[S]) -> Result<Self, CliError> {
        let mut args = SellArgs {
            id: random_id(),
            fruit_name: DEFAULT_FRUIT_NAME.to_string(),
            price: DEFAULT_PRICE,
        };

        for field in fields {
            match split_field(field.as_ref())? {
                ("id", value) => args.id = parse_id(value)?,
                ("fruitname", value) => args.fruit_name = value.to_string(),
                ("price", value) => args.price = parse_price(value)?,
                (key, _) => return Err(unknown_field("sell", key)),
            }
        }

        Ok(args)
    }
}

/// Arguments of `buy`. The new owner is always the current user.
///
/// `seller` is required. Defaults: a random id below 1000, price `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyArgs {
    pub seller: String,
    pub id: String,
    pub price: f64,
}

impl BuyArgs {
    pub fn parse<S: AsRef<str>>(fields: &[S]) -> Result<Self, CliError> {
        let mut seller = None;
        let mut id = None;
        let mut price = DEFAULT_PRICE;

        for field in fields {
            match split_field(field.as_ref())? {
                ("seller", value) => {
                    seller = Some(value.to_string()).filter(|seller| !seller.is_empty())
                }
                ("id", value) => id = Some(parse_id(value)?),
                ("price", value) => price = parse_price(value)?,
                (key, _) => return Err(unknown_field("buy", key)),
            }
        }

        Ok(BuyArgs {
            seller: seller.ok_or_else(|| {
                CliError::User("the seller of the basket must be given as seller=<name>".into())
            })?,
            id: id.unwrap_or_else(random_id),
            price,
        })
    }
}

/// Arguments of `query`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryArgs {
    pub seller: String,
    pub id: String,
}

impl QueryArgs {
    pub fn parse(seller: Option<&str>, id: Option<&str>) -> Result<Self, CliError> {
        match (seller, id) {
            (Some("all"), _) => Err(CliError::User(
                "QueryAll has not been implemented yet.".into(),
            )),
            (Some(seller), Some(id)) if !seller.is_empty() && !id.is_empty() => Ok(QueryArgs {
                seller: seller.to_string(),
                id: id.to_string(),
            }),
            _ => Err(CliError::User(
                "invalid parameters. Seller name and basket ID must be provided correctly".into(),
            )),
        }
    }
}

fn split_field(field: &str) -> Result<(&str, &str), CliError> {
    let mut parts = field.splitn(2, '=');
    match (parts.next(), parts.next()) {
        (Some(key), Some(value)) => Ok((key, value)),
        _ => Err(CliError::User(format!(
            "expected an argument of the form key=value, got {:?}",
            field
        ))),
    }
}

fn unknown_field(command: &str, key: &str) -> CliError {
    CliError::User(format!("unknown {} argument: {}", command, key))
}

fn parse_id(value: &str) -> Result<String, CliError> {
    if value.is_empty() || value.contains(':') {
        return Err(CliError::User(format!("invalid basket id: {:?}", value)));
    }
    Ok(value.to_string())
}

fn parse_price(value: &str) -> Result<f64, CliError> {
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(CliError::User(format!("invalid price: {:?}", value))),
    }
}

fn random_id() -> String {
    rand::thread_rng().gen_range(0, MAX_DEFAULT_ID).to_string()
}
