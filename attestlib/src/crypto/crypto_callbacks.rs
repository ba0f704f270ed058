// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::error::AttestResult;
use crate::protocol::{
    AttestBaseAsymAlgo, AttestBaseHashAlgo, AttestDigestStruct, AttestSignatureStruct,
};

#[derive(Clone)]
pub struct AttestHash {
    pub hash_all_cb: fn(base_hash_algo: AttestBaseHashAlgo, data: &[u8]) -> Option<AttestDigestStruct>,
}

#[derive(Clone)]
pub struct AttestAsymVerify {
    pub verify_cb: fn(
        base_hash_algo: AttestBaseHashAlgo,
        base_asym_algo: AttestBaseAsymAlgo,
        public_cert_der: &[u8],
        data: &[u8],
        signature: &AttestSignatureStruct,
    ) -> AttestResult,
}

#[derive(Clone)]
pub struct AttestCryptoRandom {
    pub get_random_cb: fn(data: &mut [u8]) -> AttestResult<usize>,
}
