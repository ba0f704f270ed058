// SPDX-License-Identifier: Apache-2.0 or MIT

//! A signing failure must surface to the peer as an unsupported-request
//! error PDU carrying the challenge-auth code. Runs in its own process so
//! the failing signer owns the callback registration.

mod common;

use attestlib::config::MAX_ATTEST_MSG_SIZE;
use attestlib::error::ATTEST_STATUS_CRYPTO_ERROR;
use attestlib::protocol::{AttestBaseAsymAlgo, AttestBaseHashAlgo, AttestSignatureStruct};
use attestlib::responder::ResponderContext;
use attestlib::secret;
use attestlib::secret::AttestSecretAsymSign;
use codec::Writer;
use common::{create_info, setup_negotiated};

static FAILING_ASYM_SIGN: AttestSecretAsymSign = AttestSecretAsymSign {
    sign_cb: |_base_hash_algo: AttestBaseHashAlgo,
              _base_asym_algo: AttestBaseAsymAlgo,
              _data: &[u8]|
     -> Option<AttestSignatureStruct> { None },
};

#[test]
fn test_signing_failure_reported_as_unsupported_request() {
    assert!(secret::asym_sign::register(FAILING_ASYM_SIGN.clone()));

    let (config_info, provision_info) = create_info();
    let mut context = ResponderContext::new(config_info, provision_info).unwrap();
    setup_negotiated(&mut context.common);

    let request = [0x11, 0x83, 0x00, 0x00];
    let mut response_buffer = [0u8; MAX_ATTEST_MSG_SIZE];
    let mut writer = Writer::init(&mut response_buffer);
    let (status, rsp) = context.write_challenge_response(&request, &mut writer);

    assert_eq!(status, Err(ATTEST_STATUS_CRYPTO_ERROR));
    // error PDU referencing the challenge-auth code
    assert_eq!(rsp.unwrap(), &[0x11, 0x7F, 0x07, 0x03]);
}
