// Copyright 2019 Cargill Incorporated
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

//! The fruit basket contract.
//!
//! Sellers list baskets of fruit at an asking price and buyers bid for them. Each basket is a
//! record in the `org.fruitbasket.fruitbasketlist` list, keyed by the seller and an id chosen by
//! the seller.

mod basket;
mod error;
mod handler;
mod list;

pub use crate::families::fruit_basket::basket::{FruitBasket, FruitBasketState};
pub use crate::families::fruit_basket::error::FruitBasketError;
pub use crate::families::fruit_basket::handler::FruitBasketContract;
pub use crate::families::fruit_basket::list::FruitBasketList;

/// Name the contract is deployed under.
pub const CHAINCODE_NAME: &str = "fruitbasket";
pub const CONTRACT_NAME: &str = "org.fruitbasket.fruitcontract";
pub const LIST_NAME: &str = "org.fruitbasket.fruitbasketlist";
pub const FRUIT_BASKET_CLASS: &str = "org.fruitbasket.fruitbasket";
