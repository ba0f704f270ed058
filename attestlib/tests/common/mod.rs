// SPDX-License-Identifier: Apache-2.0 or MIT

#![allow(unused)]

use attestlib::common::{AttestConfigInfo, AttestProvisionInfo};
use attestlib::crypto::AttestAsymVerify;
use attestlib::error::{AttestResult, ATTEST_STATUS_CRYPTO_ERROR, ATTEST_STATUS_VERIF_FAIL};
use attestlib::protocol::*;
use attestlib::secret::{AttestSecretAsymSign, AttestSecretMeasurement};
use attestlib::{crypto, secret};

/// Deterministic stand-in for a private key: the "signature" is the
/// negotiated hash of the signed data, repeated out to the algorithm's
/// signature length. The paired verifier recomputes and compares, so a
/// signature checks out exactly when the transcript bytes match.
pub static FAKE_ASYM_SIGN: AttestSecretAsymSign = AttestSecretAsymSign {
    sign_cb: fake_asym_sign,
};

pub static FAKE_ASYM_VERIFY: AttestAsymVerify = AttestAsymVerify {
    verify_cb: fake_asym_verify,
};

pub static FAKE_MEASUREMENT: AttestSecretMeasurement = AttestSecretMeasurement {
    generate_measurement_summary_hash_cb: fake_measurement_summary_hash,
};

fn fake_asym_sign(
    base_hash_algo: AttestBaseHashAlgo,
    base_asym_algo: AttestBaseAsymAlgo,
    data: &[u8],
) -> Option<AttestSignatureStruct> {
    let digest = crypto::hash::hash_all(base_hash_algo, data)?;
    let signature_size = base_asym_algo.get_size() as usize;
    if signature_size == 0 {
        return None;
    }
    let mut signature = [0u8; ATTEST_MAX_ASYM_KEY_SIZE];
    for (chunk_index, byte) in signature[..signature_size].iter_mut().enumerate() {
        *byte = digest.as_ref()[chunk_index % digest.as_ref().len()];
    }
    Some(AttestSignatureStruct {
        data_size: signature_size as u16,
        data: signature,
    })
}

fn fake_asym_verify(
    base_hash_algo: AttestBaseHashAlgo,
    base_asym_algo: AttestBaseAsymAlgo,
    _public_cert_der: &[u8],
    data: &[u8],
    signature: &AttestSignatureStruct,
) -> AttestResult {
    let expected = fake_asym_sign(base_hash_algo, base_asym_algo, data)
        .ok_or(ATTEST_STATUS_CRYPTO_ERROR)?;
    if expected.as_ref() == signature.as_ref() {
        Ok(())
    } else {
        Err(ATTEST_STATUS_VERIF_FAIL)
    }
}

fn fake_measurement_summary_hash(
    _version: AttestVersion,
    base_hash_algo: AttestBaseHashAlgo,
) -> Option<AttestDigestStruct> {
    crypto::hash::hash_all(base_hash_algo, b"fake measurement summary")
}

/// Register the fake credential-store callbacks. First registration wins per
/// process, which is exactly what every test in a binary wants.
pub fn register_fake_secrets() {
    secret::asym_sign::register(FAKE_ASYM_SIGN.clone());
    crypto::asym_verify::register(FAKE_ASYM_VERIFY.clone());
    secret::measurement::register(FAKE_MEASUREMENT.clone());
}

pub const CERT_CHAIN_SLOT0: &[u8] = b"slot0 certificate chain bytes";
pub const CERT_CHAIN_SLOT1: &[u8] = b"slot1 certificate chain bytes, a different identity";

pub fn create_info() -> (AttestConfigInfo, AttestProvisionInfo) {
    let mut config_info = AttestConfigInfo::default();
    config_info.version = [
        Some(AttestVersion::AttestVersion10),
        Some(AttestVersion::AttestVersion11),
    ];
    config_info.req_capabilities = AttestRequestCapabilityFlags::CERT_CAP
        | AttestRequestCapabilityFlags::CHAL_CAP
        | AttestRequestCapabilityFlags::MUT_AUTH_CAP
        | AttestRequestCapabilityFlags::ENCAP_CAP;
    config_info.rsp_capabilities = AttestResponseCapabilityFlags::CERT_CAP
        | AttestResponseCapabilityFlags::CHAL_CAP
        | AttestResponseCapabilityFlags::MEAS_CAP
        | AttestResponseCapabilityFlags::ENCAP_CAP;
    config_info.base_hash_algo = AttestBaseHashAlgo::SHA_256;
    config_info.base_asym_algo = AttestBaseAsymAlgo::ECDSA_ECC_NIST_P256;

    let mut provision_info = AttestProvisionInfo::default();
    provision_info.my_cert_chain[0] = Some(AttestCertChainData::from(CERT_CHAIN_SLOT0));
    provision_info.my_cert_chain[1] = Some(AttestCertChainData::from(CERT_CHAIN_SLOT1));
    provision_info.slot_count = 2;
    provision_info.provisioned_slot_id = 1;

    (config_info, provision_info)
}

/// Fill in the negotiation results the way a finished handshake would.
pub fn setup_negotiated(context: &mut attestlib::common::AttestContext) {
    context.negotiate_info.version_sel = AttestVersion::AttestVersion11;
    context.negotiate_info.req_capabilities_sel = context.config_info.req_capabilities;
    context.negotiate_info.rsp_capabilities_sel = context.config_info.rsp_capabilities;
    context.negotiate_info.base_hash_sel = context.config_info.base_hash_algo;
    context.negotiate_info.base_asym_sel = context.config_info.base_asym_algo;
}
