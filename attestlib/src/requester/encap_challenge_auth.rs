// SPDX-License-Identifier: Apache-2.0 or MIT

//! Role reversal: inside an established session the responder may challenge
//! the requester for mutual authentication. The engine below is the same
//! validate/accumulate/assemble/sign pipeline as the normal responder path,
//! run against the encapsulated exchange transcript.

use crate::common::AttestCodec;
use crate::error::{ATTEST_STATUS_BUFFER_FULL, ATTEST_STATUS_CRYPTO_ERROR};
use crate::message::{
    AttestChallengeRequestPayload, AttestErrorCode, AttestMessageHeader,
    AttestRequestResponseCode, CHALLENGE_REQUEST_SIZE,
};
use crate::protocol::{AttestRequestCapabilityFlags, SlotSelector};
use crate::requester::RequesterContext;
use codec::{Codec, Reader, Writer};

impl RequesterContext {
    /// Answer an encapsulated CHALLENGE. `encap_response` is dedicated to
    /// the inner message; on any rejection it ends up holding a well-formed
    /// error PDU instead of a challenge-auth response.
    pub fn encap_handle_challenge(&mut self, encap_request: &[u8], encap_response: &mut Writer) {
        // first failure wins: capability, then exact size, then slot
        if !self
            .common
            .negotiate_info
            .req_capabilities_sel
            .contains(AttestRequestCapabilityFlags::CHAL_CAP)
        {
            self.encode_encap_error_response(
                AttestErrorCode::AttestErrorUnsupportedRequest,
                AttestRequestResponseCode::AttestRequestChallenge.get_u8(),
                encap_response,
            );
            return;
        }

        if encap_request.len() != CHALLENGE_REQUEST_SIZE {
            self.encode_encap_error_response(
                AttestErrorCode::AttestErrorInvalidRequest,
                0,
                encap_response,
            );
            return;
        }

        let mut reader = Reader::init(encap_request);
        let _header = AttestMessageHeader::read(&mut reader);
        let challenge = if let Some(challenge) =
            AttestChallengeRequestPayload::attest_read(&mut self.common, &mut reader)
        {
            debug!("!!! encap challenge : {:02x?}\n", challenge);
            challenge
        } else {
            error!("!!! encap challenge : fail !!!\n");
            self.encode_encap_error_response(
                AttestErrorCode::AttestErrorInvalidRequest,
                0,
                encap_response,
            );
            return;
        };

        let slot = challenge.slot;
        if let SlotSelector::Explicit(index) = slot {
            if index >= self.common.provision_info.slot_count {
                self.encode_encap_error_response(
                    AttestErrorCode::AttestErrorInvalidRequest,
                    0,
                    encap_response,
                );
                return;
            }
        }
        let effective_slot_id = self.common.effective_slot_id(slot);
        if self.common.provision_info.my_cert_chain[effective_slot_id as usize].is_none() {
            self.encode_encap_error_response(
                AttestErrorCode::AttestErrorInvalidRequest,
                0,
                encap_response,
            );
            return;
        }

        // the encapsulated exchange never carries a measurement summary
        self.common.runtime_info.need_measurement_summary_hash = false;

        let mut transcript = self.common.begin_auth_exchange(true);
        if transcript.append_message(encap_request).is_none() {
            self.encode_encap_error_response(
                AttestErrorCode::AttestErrorInvalidRequest,
                0,
                encap_response,
            );
            return;
        }

        match self
            .common
            .write_challenge_auth_response(slot, &mut transcript, encap_response)
        {
            Ok(_) => {
                self.common.commit_auth_exchange(true, transcript);
                info!("send encap challenge_auth\n");
            }
            Err(status) if status == ATTEST_STATUS_CRYPTO_ERROR => {
                self.encode_encap_error_response(
                    AttestErrorCode::AttestErrorUnsupportedRequest,
                    AttestRequestResponseCode::AttestResponseChallengeAuth.get_u8(),
                    encap_response,
                );
            }
            Err(status) if status == ATTEST_STATUS_BUFFER_FULL => {
                self.encode_encap_error_response(
                    AttestErrorCode::AttestErrorInvalidRequest,
                    0,
                    encap_response,
                );
            }
            Err(_) => {
                self.encode_encap_error_response(
                    AttestErrorCode::AttestErrorUnspecified,
                    0,
                    encap_response,
                );
            }
        }
    }
}
