// SPDX-License-Identifier: Apache-2.0 or MIT

mod context;

mod challenge_req;
mod encap_challenge_auth;
mod encap_error;
mod encap_req;
mod handle_error_response;

pub use context::RequesterContext;
