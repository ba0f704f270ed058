// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::crypto::AttestHash;
use crate::protocol::{AttestBaseHashAlgo, AttestDigestStruct};

pub static DEFAULT: AttestHash = AttestHash {
    hash_all_cb: hash_all,
};

fn hash_all(base_hash_algo: AttestBaseHashAlgo, data: &[u8]) -> Option<AttestDigestStruct> {
    unimplemented!()
}
