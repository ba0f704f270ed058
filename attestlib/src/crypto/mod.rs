// SPDX-License-Identifier: Apache-2.0 or MIT

//! Pluggable cryptographic primitives. Implementations are registered once
//! per process; unregistered primitives fall back to a compiled-in default
//! (`ring`-backed when the `ring-crypto` feature is on, panicking stubs
//! otherwise; signature verification always requires registration).

mod crypto_callbacks;

#[cfg(not(feature = "ring-crypto"))]
mod crypto_null;

#[cfg(feature = "ring-crypto")]
mod ring_impl;

pub use crypto_callbacks::{AttestAsymVerify, AttestCryptoRandom, AttestHash};

use conquer_once::spin::OnceCell;

static CRYPTO_HASH: OnceCell<AttestHash> = OnceCell::uninit();
static CRYPTO_ASYM_VERIFY: OnceCell<AttestAsymVerify> = OnceCell::uninit();
static CRYPTO_RAND: OnceCell<AttestCryptoRandom> = OnceCell::uninit();

pub mod hash {
    use super::CRYPTO_HASH;
    use crate::crypto::AttestHash;
    use crate::protocol::{AttestBaseHashAlgo, AttestDigestStruct};

    #[cfg(not(feature = "ring-crypto"))]
    use super::crypto_null::hash_impl::DEFAULT;

    #[cfg(feature = "ring-crypto")]
    use super::ring_impl::hash_impl::DEFAULT;

    pub fn register(context: AttestHash) -> bool {
        CRYPTO_HASH.try_init_once(|| context).is_ok()
    }

    pub fn hash_all(
        base_hash_algo: AttestBaseHashAlgo,
        data: &[u8],
    ) -> Option<AttestDigestStruct> {
        (CRYPTO_HASH
            .try_get_or_init(|| DEFAULT.clone())
            .ok()?
            .hash_all_cb)(base_hash_algo, data)
    }
}

pub mod asym_verify {
    use super::CRYPTO_ASYM_VERIFY;
    use crate::crypto::AttestAsymVerify;
    use crate::error::AttestResult;
    use crate::error::ATTEST_STATUS_INVALID_STATE_LOCAL;
    use crate::protocol::{AttestBaseAsymAlgo, AttestBaseHashAlgo, AttestSignatureStruct};

    pub fn register(context: AttestAsymVerify) -> bool {
        CRYPTO_ASYM_VERIFY.try_init_once(|| context).is_ok()
    }

    // Chain parsing and key extraction live with the credential store; there
    // is no built-in verifier to fall back to.
    static UNIMPLEMENTED: AttestAsymVerify = AttestAsymVerify {
        verify_cb: |_base_hash_algo: AttestBaseHashAlgo,
                    _base_asym_algo: AttestBaseAsymAlgo,
                    _public_cert_der: &[u8],
                    _data: &[u8],
                    _signature: &AttestSignatureStruct|
         -> AttestResult { unimplemented!() },
    };

    pub fn verify(
        base_hash_algo: AttestBaseHashAlgo,
        base_asym_algo: AttestBaseAsymAlgo,
        public_cert_der: &[u8],
        data: &[u8],
        signature: &AttestSignatureStruct,
    ) -> AttestResult {
        (CRYPTO_ASYM_VERIFY
            .try_get_or_init(|| UNIMPLEMENTED.clone())
            .map_err(|_| ATTEST_STATUS_INVALID_STATE_LOCAL)?
            .verify_cb)(
            base_hash_algo,
            base_asym_algo,
            public_cert_der,
            data,
            signature,
        )
    }
}

pub mod rand {
    use super::CRYPTO_RAND;
    use crate::crypto::AttestCryptoRandom;
    use crate::error::{AttestResult, ATTEST_STATUS_LOW_ENTROPY};

    #[cfg(not(feature = "ring-crypto"))]
    use super::crypto_null::rand_impl::DEFAULT;

    #[cfg(feature = "ring-crypto")]
    use super::ring_impl::rand_impl::DEFAULT;

    pub fn register(context: AttestCryptoRandom) -> bool {
        CRYPTO_RAND.try_init_once(|| context).is_ok()
    }

    pub fn get_random(data: &mut [u8]) -> AttestResult<usize> {
        (CRYPTO_RAND
            .try_get_or_init(|| DEFAULT.clone())
            .map_err(|_| ATTEST_STATUS_LOW_ENTROPY)?
            .get_random_cb)(data)
    }
}
