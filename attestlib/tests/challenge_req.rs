// SPDX-License-Identifier: Apache-2.0 or MIT

mod common;

use attestlib::config::MAX_ATTEST_MSG_SIZE;
use attestlib::error::{
    ATTEST_STATUS_ERROR_PEER, ATTEST_STATUS_INVALID_MSG_FIELD, ATTEST_STATUS_INVALID_MSG_SIZE,
    ATTEST_STATUS_INVALID_PARAMETER, ATTEST_STATUS_UNSUPPORTED_CAP, ATTEST_STATUS_VERIF_FAIL,
};
use attestlib::protocol::*;
use attestlib::requester::RequesterContext;
use attestlib::responder::ResponderContext;
use codec::Writer;
use common::{
    create_info, register_fake_secrets, setup_negotiated, CERT_CHAIN_SLOT0, CERT_CHAIN_SLOT1,
};

fn negotiated_pair() -> (RequesterContext, ResponderContext) {
    register_fake_secrets();

    let (config_info, provision_info) = create_info();
    let mut responder = ResponderContext::new(config_info, provision_info).unwrap();
    setup_negotiated(&mut responder.common);

    let (config_info, provision_info) = create_info();
    let mut requester = RequesterContext::new(config_info, provision_info).unwrap();
    setup_negotiated(&mut requester.common);
    requester.common.peer_info.peer_cert_chain[0] =
        Some(AttestCertChainData::from(CERT_CHAIN_SLOT0));
    requester.common.peer_info.peer_cert_chain[1] =
        Some(AttestCertChainData::from(CERT_CHAIN_SLOT1));
    requester.common.peer_info.peer_provisioned_slot_id = 1;

    (requester, responder)
}

fn run_exchange(
    requester: &mut RequesterContext,
    responder: &mut ResponderContext,
    slot: SlotSelector,
) -> (Vec<u8>, Vec<u8>) {
    let mut send_buffer = [0u8; MAX_ATTEST_MSG_SIZE];
    let send_used = requester.encode_challenge(slot, &mut send_buffer).unwrap();

    let mut response_buffer = [0u8; MAX_ATTEST_MSG_SIZE];
    let mut writer = Writer::init(&mut response_buffer);
    let (status, rsp) = responder.write_challenge_response(&send_buffer[..send_used], &mut writer);
    assert!(status.is_ok());
    (send_buffer[..send_used].to_vec(), rsp.unwrap().to_vec())
}

#[test]
fn test_encode_challenge_wire_form() {
    let (mut requester, _) = negotiated_pair();

    let mut send_buffer = [0u8; MAX_ATTEST_MSG_SIZE];
    let used = requester
        .encode_challenge(SlotSelector::Explicit(0), &mut send_buffer)
        .unwrap();
    assert_eq!(&send_buffer[..used], &[0x11, 0x83, 0x00, 0x00]);

    let used = requester
        .encode_challenge(SlotSelector::Provisioned, &mut send_buffer)
        .unwrap();
    assert_eq!(&send_buffer[..used], &[0x11, 0x83, 0xFF, 0x00]);
}

#[test]
fn test_encode_challenge_rejects_wild_slot() {
    let (mut requester, _) = negotiated_pair();

    let mut send_buffer = [0u8; MAX_ATTEST_MSG_SIZE];
    assert_eq!(
        requester.encode_challenge(SlotSelector::Explicit(9), &mut send_buffer),
        Err(ATTEST_STATUS_INVALID_PARAMETER)
    );
}

#[test]
fn test_round_trip_explicit_slot() {
    let (mut requester, mut responder) = negotiated_pair();
    let (send, receive) = run_exchange(&mut requester, &mut responder, SlotSelector::Explicit(0));

    assert!(requester
        .handle_challenge_auth_response(SlotSelector::Explicit(0), &send, &receive)
        .is_ok());

    // both ends hold the identical transcript afterwards
    assert_eq!(
        requester.common.auth_transcript(false).as_ref(),
        responder.common.auth_transcript(false).as_ref()
    );
}

#[test]
fn test_round_trip_sentinel_slot() {
    let (mut requester, mut responder) = negotiated_pair();
    let (send, receive) = run_exchange(&mut requester, &mut responder, SlotSelector::Provisioned);

    assert!(requester
        .handle_challenge_auth_response(SlotSelector::Provisioned, &send, &receive)
        .is_ok());
}

#[test]
fn test_tampered_nonce_fails_verification() {
    let (mut requester, mut responder) = negotiated_pair();
    let (send, mut receive) =
        run_exchange(&mut requester, &mut responder, SlotSelector::Explicit(0));

    receive[4 + 32] ^= 0x01;
    assert_eq!(
        requester.handle_challenge_auth_response(SlotSelector::Explicit(0), &send, &receive),
        Err(ATTEST_STATUS_VERIF_FAIL)
    );
}

#[test]
fn test_wrong_cert_digest_fails_verification() {
    let (mut requester, mut responder) = negotiated_pair();
    let (send, mut receive) =
        run_exchange(&mut requester, &mut responder, SlotSelector::Explicit(0));

    receive[4] ^= 0x01;
    assert_eq!(
        requester.handle_challenge_auth_response(SlotSelector::Explicit(0), &send, &receive),
        Err(ATTEST_STATUS_VERIF_FAIL)
    );
}

#[test]
fn test_wrong_slot_mask_rejected() {
    let (mut requester, mut responder) = negotiated_pair();
    let (send, mut receive) =
        run_exchange(&mut requester, &mut responder, SlotSelector::Explicit(0));

    receive[3] = 0x02;
    assert_eq!(
        requester.handle_challenge_auth_response(SlotSelector::Explicit(0), &send, &receive),
        Err(ATTEST_STATUS_INVALID_MSG_FIELD)
    );
}

#[test]
fn test_trailing_bytes_rejected() {
    let (mut requester, mut responder) = negotiated_pair();
    let (send, mut receive) =
        run_exchange(&mut requester, &mut responder, SlotSelector::Explicit(0));

    receive.push(0x00);
    assert_eq!(
        requester.handle_challenge_auth_response(SlotSelector::Explicit(0), &send, &receive),
        Err(ATTEST_STATUS_INVALID_MSG_SIZE)
    );
}

#[test]
fn test_error_pdu_is_mapped_not_parsed_as_response() {
    let (mut requester, _) = negotiated_pair();

    let send = [0x11, 0x83, 0x00, 0x00];
    let unsupported = [0x11, 0x7F, 0x07, 0x83];
    assert_eq!(
        requester.handle_challenge_auth_response(SlotSelector::Explicit(0), &send, &unsupported),
        Err(ATTEST_STATUS_UNSUPPORTED_CAP)
    );

    let invalid = [0x11, 0x7F, 0x01, 0x00];
    assert_eq!(
        requester.handle_challenge_auth_response(SlotSelector::Explicit(0), &send, &invalid),
        Err(ATTEST_STATUS_ERROR_PEER)
    );
}

#[test]
fn test_unexpected_response_code_rejected() {
    let (mut requester, _) = negotiated_pair();

    let send = [0x11, 0x83, 0x00, 0x00];
    // a version response where challenge-auth was expected
    let unexpected = [0x11, 0x04, 0x00, 0x00];
    assert_eq!(
        requester.handle_challenge_auth_response(SlotSelector::Explicit(0), &send, &unexpected),
        Err(ATTEST_STATUS_ERROR_PEER)
    );
}
