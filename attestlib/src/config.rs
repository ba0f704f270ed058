// SPDX-License-Identifier: Apache-2.0 or MIT

/// Largest protocol message this library will assemble or accept.
pub const MAX_ATTEST_MSG_SIZE: usize = 0x1000;

/// Upper bound for one provisioned certificate chain, wire form.
pub const MAX_CERT_CHAIN_DATA_SIZE: usize = 0x1000;
