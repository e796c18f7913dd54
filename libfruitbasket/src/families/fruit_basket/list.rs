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

use crate::contract::context::{StateList, StateListError};
use crate::families::fruit_basket::basket::{FruitBasket, FruitBasketState};
use crate::families::fruit_basket::LIST_NAME;
use crate::handler::TransactionContext;

/// The list of every fruit basket in world state.
pub struct FruitBasketList<'a> {
    list: StateList<'a, FruitBasketState>,
}

impl<'a> FruitBasketList<'a> {
    pub fn new(context: &'a dyn TransactionContext) -> Result<Self, StateListError> {
        Ok(FruitBasketList {
            list: StateList::new(context, LIST_NAME)?,
        })
    }

    pub fn add_fruit_basket(&self, basket: &FruitBasket) -> Result<(), StateListError> {
        self.list.add_state(basket)
    }

    pub fn get_fruit_basket(&self, key: &str) -> Result<FruitBasket, StateListError> {
        Ok(self.list.get_state(key)?.into_fruit_basket())
    }

    pub fn update_fruit_basket(&self, basket: &FruitBasket) -> Result<(), StateListError> {
        self.list.update_state(basket)
    }
}
