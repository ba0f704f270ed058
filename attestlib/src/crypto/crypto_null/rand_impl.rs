// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::crypto::AttestCryptoRandom;
use crate::error::AttestResult;

pub static DEFAULT: AttestCryptoRandom = AttestCryptoRandom {
    get_random_cb: get_random,
};

fn get_random(data: &mut [u8]) -> AttestResult<usize> {
    unimplemented!()
}
