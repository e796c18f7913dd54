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

use std::error::Error as StdError;

use crate::contract::context::StateListError;
use crate::contract::state::StateError;
use crate::handler::ApplyError;

#[derive(Debug)]
pub enum FruitBasketError {
    /// The buyer already owns the basket.
    SelfPurchase(String),
    /// The bid is below the basket's price.
    PriceTooLow {
        key: String,
        price: f64,
        bid: f64,
    },
    InvalidArgument(String),
    StateError(StateError),
    StateListError(StateListError),
}

impl StdError for FruitBasketError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            FruitBasketError::SelfPurchase(_) => None,
            FruitBasketError::PriceTooLow { .. } => None,
            FruitBasketError::InvalidArgument(_) => None,
            FruitBasketError::StateError(ref err) => Some(err),
            FruitBasketError::StateListError(ref err) => Some(err),
        }
    }
}

impl std::fmt::Display for FruitBasketError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            FruitBasketError::SelfPurchase(_) => write!(f, "You can't buy your own basket!"),
            FruitBasketError::PriceTooLow { ref key, .. } => {
                write!(f, "FruitBasket {} is not that cheap!", key)
            }
            FruitBasketError::InvalidArgument(ref msg) => write!(f, "Invalid argument: {}", msg),
            FruitBasketError::StateError(ref err) => write!(f, "{}", err),
            FruitBasketError::StateListError(ref err) => write!(f, "{}", err),
        }
    }
}

impl From<StateError> for FruitBasketError {
    fn from(e: StateError) -> Self {
        FruitBasketError::StateError(e)
    }
}

impl From<StateListError> for FruitBasketError {
    fn from(e: StateListError) -> Self {
        FruitBasketError::StateListError(e)
    }
}

impl From<FruitBasketError> for ApplyError {
    fn from(e: FruitBasketError) -> Self {
        match e {
            FruitBasketError::StateListError(StateListError::TransactionContextError(err)) => {
                ApplyError::from(err)
            }
            _ => ApplyError::InvalidTransaction(e.to_string()),
        }
    }
}
