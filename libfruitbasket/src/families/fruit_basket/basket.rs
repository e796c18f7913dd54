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

use serde::{Deserialize, Serialize};

use crate::contract::state::{make_key, State, StateError, StateSet};
use crate::families::fruit_basket::FRUIT_BASKET_CLASS;

/// A basket of fruit listed for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FruitBasket {
    key: String,
    seller: String,
    id: String,
    owner: String,
    fruit_name: String,
    price: f64,
}

impl FruitBasket {
    /// Creates a basket keyed by `seller` and `id`.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InvalidKeyPart` if the seller or id contain the key delimiter.
    pub fn new(
        seller: &str,
        id: &str,
        owner: &str,
        fruit_name: &str,
        price: f64,
    ) -> Result<Self, StateError> {
        Ok(FruitBasket {
            key: make_key(&[seller, id])?,
            seller: seller.to_string(),
            id: id.to_string(),
            owner: owner.to_string(),
            fruit_name: fruit_name.to_string(),
            price,
        })
    }

    pub fn seller(&self) -> &str {
        &self.seller
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn fruit_name(&self) -> &str {
        &self.fruit_name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }
}

impl State for FruitBasket {
    const CLASS: &'static str = FRUIT_BASKET_CLASS;

    fn key(&self) -> &str {
        &self.key
    }
}

/// Every record class stored in the fruit basket list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "class")]
pub enum FruitBasketState {
    #[serde(rename = "org.fruitbasket.fruitbasket")]
    FruitBasket(FruitBasket),
}

impl FruitBasketState {
    pub fn into_fruit_basket(self) -> FruitBasket {
        match self {
            FruitBasketState::FruitBasket(basket) => basket,
        }
    }
}

impl StateSet for FruitBasketState {
    const CLASSES: &'static [&'static str] = &[FRUIT_BASKET_CLASS];
}
