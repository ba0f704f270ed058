// SPDX-License-Identifier: Apache-2.0 or MIT

mod context;

mod challenge_rsp;
mod encap_rsp;

mod error_rsp;

pub use context::ResponderContext;
