// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::{AttestCodec, AttestConnectionState};
use crate::error::{
    AttestResult, ATTEST_STATUS_BUFFER_FULL, ATTEST_STATUS_BUFFER_TOO_SMALL,
    ATTEST_STATUS_CRYPTO_ERROR, ATTEST_STATUS_INVALID_MSG_FIELD, ATTEST_STATUS_INVALID_MSG_SIZE,
    ATTEST_STATUS_INVALID_STATE_LOCAL, ATTEST_STATUS_UNSUPPORTED_CAP,
};
use crate::message::{
    AttestChallengeRequestPayload, AttestErrorCode, AttestMessageHeader,
    AttestRequestResponseCode, CHALLENGE_REQUEST_SIZE,
};
use crate::protocol::{AttestResponseCapabilityFlags, SlotSelector};
use crate::responder::ResponderContext;
use codec::{Codec, Reader, Writer};

impl ResponderContext {
    /// Process a CHALLENGE request. A PDU (success or error) is produced in
    /// every case except a caller-contract violation (`writer` smaller than
    /// `challenge_auth_response_size`), which is a recoverable error with no
    /// bytes.
    pub fn handle_challenge<'a>(
        &mut self,
        bytes: &[u8],
        writer: &'a mut Writer<'_>,
    ) -> (AttestResult, Option<&'a [u8]>) {
        let (status, rsp_slice) = self.write_challenge_response(bytes, writer);
        if rsp_slice.is_none() {
            return (status, None);
        }
        (Ok(()), rsp_slice)
    }

    pub fn write_challenge_response<'a>(
        &mut self,
        bytes: &[u8],
        writer: &'a mut Writer<'_>,
    ) -> (AttestResult, Option<&'a [u8]>) {
        // first failure wins: capability, then exact size, then slot
        if !self
            .common
            .negotiate_info
            .rsp_capabilities_sel
            .contains(AttestResponseCapabilityFlags::CHAL_CAP)
        {
            self.write_error(
                AttestErrorCode::AttestErrorUnsupportedRequest,
                AttestRequestResponseCode::AttestRequestChallenge.get_u8(),
                writer,
            );
            return (
                Err(ATTEST_STATUS_UNSUPPORTED_CAP),
                Some(writer.used_slice()),
            );
        }

        if bytes.len() != CHALLENGE_REQUEST_SIZE {
            self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
            return (
                Err(ATTEST_STATUS_INVALID_MSG_SIZE),
                Some(writer.used_slice()),
            );
        }

        let mut reader = Reader::init(bytes);
        let _header = AttestMessageHeader::read(&mut reader);
        let challenge =
            AttestChallengeRequestPayload::attest_read(&mut self.common, &mut reader);
        let challenge = if let Some(challenge) = challenge {
            debug!("!!! challenge : {:02x?}\n", challenge);
            challenge
        } else {
            error!("!!! challenge : fail !!!\n");
            self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
            return (
                Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                Some(writer.used_slice()),
            );
        };

        let slot = challenge.slot;
        if let SlotSelector::Explicit(index) = slot {
            if index >= self.common.provision_info.slot_count {
                self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
                return (
                    Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                    Some(writer.used_slice()),
                );
            }
        }
        let effective_slot_id = self.common.effective_slot_id(slot);
        if self.common.provision_info.my_cert_chain[effective_slot_id as usize].is_none() {
            self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
            return (
                Err(ATTEST_STATUS_INVALID_STATE_LOCAL),
                Some(writer.used_slice()),
            );
        }

        self.common.runtime_info.need_measurement_summary_hash =
            self.common.config_info.measurement_summary;

        let mut transcript = self.common.begin_auth_exchange(false);
        if transcript.append_message(bytes).is_none() {
            self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
            return (Err(ATTEST_STATUS_BUFFER_FULL), Some(writer.used_slice()));
        }

        match self
            .common
            .write_challenge_auth_response(slot, &mut transcript, writer)
        {
            Ok(_) => {
                self.common.commit_auth_exchange(false, transcript);
                self.common
                    .runtime_info
                    .set_connection_state(AttestConnectionState::AttestConnectionAuthenticated);
                info!("send challenge_auth\n");
                (Ok(()), Some(writer.used_slice()))
            }
            Err(status) if status == ATTEST_STATUS_BUFFER_TOO_SMALL => {
                // caller-contract violation; no PDU, the caller re-sizes and
                // retries
                (Err(status), None)
            }
            Err(status) if status == ATTEST_STATUS_CRYPTO_ERROR => {
                // from the peer's view a signing failure is indistinguishable
                // from the feature being unsupported
                self.write_error(
                    AttestErrorCode::AttestErrorUnsupportedRequest,
                    AttestRequestResponseCode::AttestResponseChallengeAuth.get_u8(),
                    writer,
                );
                (Err(status), Some(writer.used_slice()))
            }
            Err(status) if status == ATTEST_STATUS_BUFFER_FULL => {
                self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
                (Err(status), Some(writer.used_slice()))
            }
            Err(status) => {
                self.write_error(AttestErrorCode::AttestErrorUnspecified, 0, writer);
                (Err(status), Some(writer.used_slice()))
            }
        }
    }
}
