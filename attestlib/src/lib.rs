// SPDX-License-Identifier: Apache-2.0 or MIT

//! Challenge-response device attestation engine. A responder proves its
//! identity and measurement state by signing the exact byte transcript of
//! the exchange; the requester verifies it, and inside an established
//! session the roles can reverse for mutual authentication.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate log;

#[macro_use]
extern crate bitflags;

extern crate codec;

pub mod protocol;
#[macro_use]
pub mod error;
pub mod common;
pub mod config;
pub mod crypto;
pub mod message;
pub mod requester;
pub mod responder;
pub mod secret;
