/*
 * Copyright 2021 Cargill Incorporated
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * -----------------------------------------------------------------------------
 */

//! Fruit basket trading on a key-value world state.
//!
//! The crate is layered the same way a chaincode host is:
//!
//! - [`contract`] holds the record model (`State`), the list helper (`StateList`) and the
//!   `SmartContract` trait.
//! - [`families::fruit_basket`] is the contract itself: `sell`, `buy` and `queryBasket`.
//! - [`handler`] and [`context`] are the seam between a contract and the store it runs against.
//! - [`state`] provides the stores, [`wallet`] the identities and [`gateway`] the client session
//!   used to submit invocations.

pub mod context;
pub mod contract;
pub mod families;
#[cfg(feature = "gateway")]
pub mod gateway;
pub mod handler;
pub mod protocol;
pub mod state;
#[cfg(feature = "wallet")]
pub mod wallet;

#[macro_use]
extern crate log;
