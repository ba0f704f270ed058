// SPDX-License-Identifier: Apache-2.0 or MIT

// Since crypto implementations are null, all variables will be unused.
#![allow(unused_variables)]

pub mod hash_impl;
pub mod rand_impl;
