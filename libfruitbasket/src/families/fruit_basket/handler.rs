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

//! Defines the fruit basket implementation of `SmartContract`.
//!
//! The following are the functions that can be invoked on the [`FruitBasketContract`], with
//! their arguments:
//!
//! instantiate - no arguments
//! sell - seller, id, owner, fruitName, price
//! buy - seller, id, newOwner, biddingPrice
//! queryBasket - seller, id

use crate::contract::state::{make_key, State};
use crate::contract::SmartContract;
use crate::families::fruit_basket::basket::FruitBasket;
use crate::families::fruit_basket::error::FruitBasketError;
use crate::families::fruit_basket::list::FruitBasketList;
use crate::families::fruit_basket::CONTRACT_NAME;
use crate::handler::{ApplyError, TransactionContext};

/// The fruit basket smart contract.
pub struct FruitBasketContract {
    contract_name: String,
}

impl Default for FruitBasketContract {
    fn default() -> Self {
        FruitBasketContract::new()
    }
}

impl FruitBasketContract {
    pub fn new() -> Self {
        FruitBasketContract {
            contract_name: CONTRACT_NAME.to_string(),
        }
    }

    /// Performs any setup of the ledger the contract needs. There is none.
    pub fn instantiate(&self, _context: &dyn TransactionContext) -> Result<(), FruitBasketError> {
        info!("Instantiate the contract");
        Ok(())
    }

    /// Lists a new basket for sale. The new basket is owned by its seller, whatever `owner` is
    /// given.
    ///
    /// # Errors
    ///
    /// Fails if a basket already exists for `seller` and `id`.
    pub fn sell(
        &self,
        context: &dyn TransactionContext,
        seller: &str,
        id: &str,
        owner: &str,
        fruit_name: &str,
        price: f64,
    ) -> Result<FruitBasket, FruitBasketError> {
        let list = FruitBasketList::new(context)?;

        let mut basket = FruitBasket::new(seller, id, owner, fruit_name, price)?;
        basket.set_owner(seller);

        list.add_fruit_basket(&basket)?;
        debug!("Listed fruit basket {}", basket.key());
        Ok(basket)
    }

    /// Transfers a basket to `new_owner` at the bidding price.
    ///
    /// # Errors
    ///
    /// Fails if the basket does not exist, if `new_owner` already owns it or if the basket's
    /// price is greater than the bid.
    pub fn buy(
        &self,
        context: &dyn TransactionContext,
        seller: &str,
        id: &str,
        new_owner: &str,
        bidding_price: f64,
    ) -> Result<FruitBasket, FruitBasketError> {
        let list = FruitBasketList::new(context)?;

        let key = make_key(&[seller, id])?;
        let mut basket = list.get_fruit_basket(&key)?;

        if basket.owner() == new_owner {
            warn!("{} tried to buy their own basket {}", new_owner, key);
            return Err(FruitBasketError::SelfPurchase(key));
        }
        if basket.price() > bidding_price {
            return Err(FruitBasketError::PriceTooLow {
                key,
                price: basket.price(),
                bid: bidding_price,
            });
        }

        basket.set_owner(new_owner);
        basket.set_price(bidding_price);

        list.update_fruit_basket(&basket)?;
        debug!("Fruit basket {} bought by {}", key, new_owner);
        Ok(basket)
    }

    /// Reads a basket by seller and id.
    pub fn query_basket(
        &self,
        context: &dyn TransactionContext,
        seller: &str,
        id: &str,
    ) -> Result<FruitBasket, FruitBasketError> {
        let list = FruitBasketList::new(context)?;
        Ok(list.get_fruit_basket(&make_key(&[seller, id])?)?)
    }
}

impl SmartContract for FruitBasketContract {
    fn get_contract_name(&self) -> &str {
        &self.contract_name
    }

    fn invoke(
        &self,
        function: &str,
        args: &[String],
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError> {
        let context: &dyn TransactionContext = context;
        let basket = match (function, args) {
            ("instantiate", _) => {
                self.instantiate(context)?;
                return Ok(vec![]);
            }
            ("sell", [seller, id, owner, fruit_name, price]) => {
                self.sell(context, seller, id, owner, fruit_name, parse_price(price)?)?
            }
            ("buy", [seller, id, new_owner, bidding_price]) => {
                self.buy(context, seller, id, new_owner, parse_price(bidding_price)?)?
            }
            ("queryBasket", [seller, id]) => self.query_basket(context, seller, id)?,
            ("sell", _) | ("buy", _) | ("queryBasket", _) => {
                return Err(ApplyError::InvalidTransaction(format!(
                    "Incorrect number of arguments for {}: {}",
                    function,
                    args.len()
                )));
            }
            _ => {
                return Err(ApplyError::InvalidTransaction(format!(
                    "Function {} not found in contract {}",
                    function, self.contract_name
                )));
            }
        };

        Ok(basket.to_bytes().map_err(FruitBasketError::from)?)
    }
}

fn parse_price(price: &str) -> Result<f64, FruitBasketError> {
    match price.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FruitBasketError::InvalidArgument(format!(
            "price is not a number: {}",
            price
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::context::SimulationContext;
    use crate::contract::context::StateListError;
    use crate::contract::state::deserialize;
    use crate::families::fruit_basket::FruitBasketState;
    use crate::state::hashmap::HashMapState;
    use crate::state::Write;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    /// A sold basket is owned by its seller and can be queried back
    fn test_sell_then_query() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let contract = FruitBasketContract::new();

        let sold = contract
            .sell(&context, "isabella", "1", "someone", "apple", 5.0)
            .expect("Unable to sell");
        assert_eq!(sold.owner(), "isabella");

        let queried = contract
            .query_basket(&context, "isabella", "1")
            .expect("Unable to query");
        assert_eq!(queried, sold);
        assert_eq!(queried.fruit_name(), "apple");
        assert_eq!(queried.price(), 5.0);
    }

    #[test]
    fn test_sell_twice() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let contract = FruitBasketContract::new();

        contract
            .sell(&context, "isabella", "1", "isabella", "apple", 5.0)
            .expect("Unable to sell");
        match contract.sell(&context, "isabella", "1", "isabella", "pear", 3.0) {
            Err(FruitBasketError::StateListError(StateListError::KeyAlreadyExists(key))) => {
                assert_eq!(key, "isabella:1")
            }
            res => panic!("Expected KeyAlreadyExists, got {:?}", res),
        }
    }

    #[test]
    /// Buying transfers the basket at the bid price, after which the new owner cannot buy it
    /// again.
    fn test_buy() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let contract = FruitBasketContract::new();

        contract
            .sell(&context, "isabella", "1", "isabella", "apple", 5.0)
            .expect("Unable to sell");

        let bought = contract
            .buy(&context, "isabella", "1", "balaji", 5.0)
            .expect("Unable to buy");
        assert_eq!(bought.owner(), "balaji");
        assert_eq!(bought.price(), 5.0);
        assert_eq!(bought.fruit_name(), "apple");
        assert_eq!(bought.seller(), "isabella");

        match contract.buy(&context, "isabella", "1", "balaji", 5.0) {
            Err(FruitBasketError::SelfPurchase(key)) => assert_eq!(key, "isabella:1"),
            res => panic!("Expected SelfPurchase, got {:?}", res),
        }

        let resold = contract
            .buy(&context, "isabella", "1", "isabella", 7.5)
            .expect("Unable to buy");
        assert_eq!(resold.owner(), "isabella");
        assert_eq!(resold.price(), 7.5);
    }

    #[test]
    /// The owner can never buy their own basket, however much they bid
    fn test_buy_own_basket() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let contract = FruitBasketContract::new();

        contract
            .sell(&context, "isabella", "1", "isabella", "apple", 5.0)
            .expect("Unable to sell");

        for bid in &[0.0, 5.0, 1000.0] {
            match contract.buy(&context, "isabella", "1", "isabella", *bid) {
                Err(err @ FruitBasketError::SelfPurchase(_)) => {
                    assert_eq!(err.to_string(), "You can't buy your own basket!")
                }
                res => panic!("Expected SelfPurchase, got {:?}", res),
            }
        }
    }

    #[test]
    fn test_buy_below_price() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let contract = FruitBasketContract::new();

        contract
            .sell(&context, "isabella", "1", "isabella", "apple", 5.0)
            .expect("Unable to sell");

        match contract.buy(&context, "isabella", "1", "balaji", 4.99) {
            Err(err @ FruitBasketError::PriceTooLow { .. }) => {
                assert_eq!(err.to_string(), "FruitBasket isabella:1 is not that cheap!")
            }
            res => panic!("Expected PriceTooLow, got {:?}", res),
        }

        let basket = contract
            .query_basket(&context, "isabella", "1")
            .expect("Unable to query");
        assert_eq!(basket.owner(), "isabella");
    }

    #[test]
    fn test_missing_basket() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let contract = FruitBasketContract::new();

        match contract.query_basket(&context, "nobody", "1") {
            Err(FruitBasketError::StateListError(StateListError::KeyNotFound(key))) => {
                assert_eq!(key, "nobody:1")
            }
            res => panic!("Expected KeyNotFound, got {:?}", res),
        }
        let bought = contract.buy(&context, "nobody", "1", "balaji", 1.0);
        assert!(bought.is_err());
    }

    #[test]
    /// Invoking by function name returns the serialized basket
    fn test_invoke() {
        let state = HashMapState::new();
        let contract = FruitBasketContract::new();

        let mut context = SimulationContext::new(&state);
        assert!(contract
            .invoke("instantiate", &[], &mut context)
            .expect("Unable to instantiate")
            .is_empty());
        let response = contract
            .invoke(
                "sell",
                &args(&["isabella", "1", "isabella", "apple", "5"]),
                &mut context,
            )
            .expect("Unable to sell");
        state
            .commit(&context.into_changes())
            .expect("Unable to commit");

        let sold = deserialize::<FruitBasketState>(&response)
            .expect("Invalid response")
            .into_fruit_basket();
        assert_eq!(sold.owner(), "isabella");

        let mut context = SimulationContext::new(&state);
        let response = contract
            .invoke("queryBasket", &args(&["isabella", "1"]), &mut context)
            .expect("Unable to query");
        let queried = deserialize::<FruitBasketState>(&response)
            .expect("Invalid response")
            .into_fruit_basket();
        assert_eq!(queried, sold);
    }

    #[test]
    fn test_invoke_invalid() {
        let state = HashMapState::new();
        let contract = FruitBasketContract::new();
        let mut context = SimulationContext::new(&state);

        match contract.invoke("steal", &[], &mut context) {
            Err(ApplyError::InvalidTransaction(_)) => (),
            res => panic!("Expected InvalidTransaction, got {:?}", res),
        }
        match contract.invoke("queryBasket", &args(&["isabella"]), &mut context) {
            Err(ApplyError::InvalidTransaction(_)) => (),
            res => panic!("Expected InvalidTransaction, got {:?}", res),
        }
        for price in &["cheap", "NaN", "inf", ""] {
            match contract.invoke(
                "sell",
                &args(&["isabella", "1", "isabella", "apple", *price]),
                &mut context,
            ) {
                Err(ApplyError::InvalidTransaction(msg)) => assert!(msg.contains("price")),
                res => panic!("Expected InvalidTransaction, got {:?}", res),
            }
        }
        assert!(context.into_changes().is_empty());
    }
}
