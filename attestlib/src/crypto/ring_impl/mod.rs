// SPDX-License-Identifier: Apache-2.0 or MIT

pub mod hash_impl;
pub mod rand_impl;
