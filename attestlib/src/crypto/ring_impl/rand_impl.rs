// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::crypto::AttestCryptoRandom;
use crate::error::{AttestResult, ATTEST_STATUS_LOW_ENTROPY};

pub static DEFAULT: AttestCryptoRandom = AttestCryptoRandom {
    get_random_cb: get_random,
};

fn get_random(data: &mut [u8]) -> AttestResult<usize> {
    use ring::rand::SecureRandom;

    let rng = ring::rand::SystemRandom::new();
    rng.fill(data).map_err(|_| ATTEST_STATUS_LOW_ENTROPY)?;

    Ok(data.len())
}
