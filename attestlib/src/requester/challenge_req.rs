// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::{AttestCodec, AttestConnectionState};
use crate::error::{
    AttestResult, ATTEST_STATUS_BUFFER_FULL, ATTEST_STATUS_ERROR_PEER,
    ATTEST_STATUS_INVALID_MSG_FIELD, ATTEST_STATUS_INVALID_PARAMETER,
};
use crate::message::{
    AttestChallengeRequestPayload, AttestMessage, AttestMessageHeader, AttestMessagePayload,
    AttestRequestResponseCode,
};
use crate::protocol::{SlotSelector, MAX_SLOT_COUNT};
use crate::requester::RequesterContext;
use codec::{Codec, Reader, Writer};

impl RequesterContext {
    /// Encode a CHALLENGE for the peer's `slot` into `buf`, returning the
    /// encoded length. The caller transmits the bytes and feeds them back to
    /// [`RequesterContext::handle_challenge_auth_response`] unchanged; the
    /// signature covers them.
    pub fn encode_challenge(&mut self, slot: SlotSelector, buf: &mut [u8]) -> AttestResult<usize> {
        info!("send challenge\n");

        if let SlotSelector::Explicit(index) = slot {
            if index as usize >= MAX_SLOT_COUNT {
                return Err(ATTEST_STATUS_INVALID_PARAMETER);
            }
        }

        let mut writer = Writer::init(buf);
        let request = AttestMessage {
            header: AttestMessageHeader {
                version: self.common.negotiate_info.version_sel,
                request_response_code: AttestRequestResponseCode::AttestRequestChallenge,
            },
            payload: AttestMessagePayload::ChallengeRequest(AttestChallengeRequestPayload {
                slot,
            }),
        };
        request.attest_encode(&mut self.common, &mut writer)
    }

    /// Verify the CHALLENGE_AUTH received for a CHALLENGE this endpoint
    /// issued. `send_buffer` are the exact request bytes, `receive_buffer`
    /// the exact response bytes; the transcript is their concatenation minus
    /// the trailing signature field.
    pub fn handle_challenge_auth_response(
        &mut self,
        slot: SlotSelector,
        send_buffer: &[u8],
        receive_buffer: &[u8],
    ) -> AttestResult {
        self.common.runtime_info.need_measurement_summary_hash =
            self.common.config_info.measurement_summary;

        let mut reader = Reader::init(receive_buffer);
        let message_header =
            AttestMessageHeader::read(&mut reader).ok_or(ATTEST_STATUS_INVALID_MSG_FIELD)?;
        match message_header.request_response_code {
            AttestRequestResponseCode::AttestResponseChallengeAuth => {
                let mut transcript = self.common.begin_auth_exchange(false);
                transcript
                    .append_message(send_buffer)
                    .ok_or(ATTEST_STATUS_BUFFER_FULL)?;

                let result = self.common.verify_challenge_auth_response(
                    slot,
                    &mut transcript,
                    receive_buffer,
                );
                match result {
                    Ok(()) => {
                        info!("verify challenge_auth signature pass\n");
                        self.common.commit_auth_exchange(false, transcript);
                        self.common.runtime_info.set_connection_state(
                            AttestConnectionState::AttestConnectionAuthenticated,
                        );
                        Ok(())
                    }
                    Err(status) => {
                        error!("verify challenge_auth signature fail\n");
                        Err(status)
                    }
                }
            }
            AttestRequestResponseCode::AttestResponseError => {
                self.handle_error_response(receive_buffer)
            }
            _ => Err(ATTEST_STATUS_ERROR_PEER),
        }
    }
}
