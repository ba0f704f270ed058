// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::protocol::{
    AttestBaseAsymAlgo, AttestBaseHashAlgo, AttestDigestStruct, AttestSignatureStruct,
    AttestVersion,
};

/// Signing with a provisioned private key. The key never enters this
/// library; the credential store implements the callback.
#[derive(Clone)]
pub struct AttestSecretAsymSign {
    pub sign_cb: fn(
        base_hash_algo: AttestBaseHashAlgo,
        base_asym_algo: AttestBaseAsymAlgo,
        data: &[u8],
    ) -> Option<AttestSignatureStruct>,
}

#[derive(Clone)]
pub struct AttestSecretMeasurement {
    pub generate_measurement_summary_hash_cb: fn(
        version: AttestVersion,
        base_hash_algo: AttestBaseHashAlgo,
    ) -> Option<AttestDigestStruct>,
}
