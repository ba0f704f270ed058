// SPDX-License-Identifier: Apache-2.0 or MIT

//! Responder side of mutual authentication: wrap a CHALLENGE for the
//! requester inside the encapsulated-request flow, then verify the delivered
//! CHALLENGE_AUTH against the requester's certificate chain.

use crate::common::AttestCodec;
use crate::error::{
    AttestResult, ATTEST_STATUS_BUFFER_FULL, ATTEST_STATUS_INVALID_MSG_FIELD,
    ATTEST_STATUS_INVALID_STATE_PEER, ATTEST_STATUS_UNSUPPORTED_CAP,
};
use crate::message::{
    AttestChallengeRequestPayload, AttestDeliverEncapsulatedResponsePayload,
    AttestEncapsulatedRequestPayload, AttestEncapsulatedResponseAckPayload,
    AttestEncapsulatedResponseAckPayloadType, AttestErrorCode, AttestGetEncapsulatedRequestPayload,
    AttestMessage, AttestMessageHeader, AttestMessagePayload, AttestRequestResponseCode,
};
use crate::protocol::{
    AttestRequestCapabilityFlags, AttestResponseCapabilityFlags, SlotSelector,
};
use crate::responder::ResponderContext;
use codec::{Codec, Reader, Writer};

impl ResponderContext {
    fn encap_mutual_auth_supported(&self) -> bool {
        self.common
            .negotiate_info
            .req_capabilities_sel
            .contains(AttestRequestCapabilityFlags::ENCAP_CAP | AttestRequestCapabilityFlags::MUT_AUTH_CAP)
            && self
                .common
                .negotiate_info
                .rsp_capabilities_sel
                .contains(AttestResponseCapabilityFlags::ENCAP_CAP)
    }

    /// Answer GET_ENCAPSULATED_REQUEST with an ENCAPSULATED_REQUEST carrying
    /// a CHALLENGE for `slot` of the requester's identity store. Begins the
    /// encapsulated exchange: the embedded challenge bytes open the
    /// transcript the delivered CHALLENGE_AUTH must be signed over.
    pub fn handle_get_encapsulated_request<'a>(
        &mut self,
        slot: SlotSelector,
        bytes: &[u8],
        writer: &'a mut Writer<'_>,
    ) -> (AttestResult, Option<&'a [u8]>) {
        if !self.encap_mutual_auth_supported() {
            self.write_error(
                AttestErrorCode::AttestErrorUnsupportedRequest,
                AttestRequestResponseCode::AttestRequestGetEncapsulatedRequest.get_u8(),
                writer,
            );
            return (
                Err(ATTEST_STATUS_UNSUPPORTED_CAP),
                Some(writer.used_slice()),
            );
        }

        let mut reader = Reader::init(bytes);
        let message_header = AttestMessageHeader::read(&mut reader);
        if let Some(message_header) = message_header {
            if message_header.version != self.common.negotiate_info.version_sel {
                self.write_error(AttestErrorCode::AttestErrorVersionMismatch, 0, writer);
                return (
                    Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                    Some(writer.used_slice()),
                );
            }
            if message_header.request_response_code
                != AttestRequestResponseCode::AttestRequestGetEncapsulatedRequest
            {
                self.write_error(AttestErrorCode::AttestErrorUnexpectedRequest, 0, writer);
                return (
                    Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                    Some(writer.used_slice()),
                );
            }
        } else {
            self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
            return (
                Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                Some(writer.used_slice()),
            );
        }
        if AttestGetEncapsulatedRequestPayload::attest_read(&mut self.common, &mut reader)
            .is_none()
        {
            self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
            return (
                Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                Some(writer.used_slice()),
            );
        }

        let request_id = self.common.runtime_info.encap_request_id.wrapping_add(1);
        self.common.runtime_info.encap_request_id = request_id;

        let encap_request = AttestMessage {
            header: AttestMessageHeader {
                version: self.common.negotiate_info.version_sel,
                request_response_code:
                    AttestRequestResponseCode::AttestResponseEncapsulatedRequest,
            },
            payload: AttestMessagePayload::EncapsulatedRequest(
                AttestEncapsulatedRequestPayload { request_id },
            ),
        };
        if encap_request.attest_encode(&mut self.common, writer).is_err() {
            self.write_error(AttestErrorCode::AttestErrorUnspecified, 0, writer);
            return (Err(ATTEST_STATUS_BUFFER_FULL), Some(writer.used_slice()));
        }

        // the embedded CHALLENGE, also the first bytes of the encapsulated
        // exchange transcript
        let challenge_offset = writer.used();
        let challenge = AttestMessage {
            header: AttestMessageHeader {
                version: self.common.negotiate_info.version_sel,
                request_response_code: AttestRequestResponseCode::AttestRequestChallenge,
            },
            payload: AttestMessagePayload::ChallengeRequest(AttestChallengeRequestPayload {
                slot,
            }),
        };
        if challenge.attest_encode(&mut self.common, writer).is_err() {
            self.write_error(AttestErrorCode::AttestErrorUnspecified, 0, writer);
            return (Err(ATTEST_STATUS_BUFFER_FULL), Some(writer.used_slice()));
        }

        let mut transcript = self.common.begin_auth_exchange(true);
        if transcript
            .append_message(&writer.used_slice()[challenge_offset..])
            .is_none()
        {
            self.write_error(AttestErrorCode::AttestErrorUnspecified, 0, writer);
            return (Err(ATTEST_STATUS_BUFFER_FULL), Some(writer.used_slice()));
        }
        self.common.commit_auth_exchange(true, transcript);
        self.common.runtime_info.encap_challenge_slot = Some(slot);

        info!("send encapsulated challenge\n");
        (Ok(()), Some(writer.used_slice()))
    }

    /// Process DELIVER_ENCAPSULATED_RESPONSE carrying the requester's
    /// CHALLENGE_AUTH. On success the response is an ENCAPSULATED_RESPONSE_ACK
    /// and the requester counts as mutually authenticated.
    pub fn handle_deliver_encapsulated_response<'a>(
        &mut self,
        bytes: &[u8],
        writer: &'a mut Writer<'_>,
    ) -> (AttestResult, Option<&'a [u8]>) {
        let slot = match self.common.runtime_info.encap_challenge_slot {
            Some(slot) => slot,
            None => {
                self.write_error(AttestErrorCode::AttestErrorUnexpectedRequest, 0, writer);
                return (
                    Err(ATTEST_STATUS_INVALID_STATE_PEER),
                    Some(writer.used_slice()),
                );
            }
        };

        let mut reader = Reader::init(bytes);
        let message_header = AttestMessageHeader::read(&mut reader);
        if let Some(message_header) = message_header {
            if message_header.version != self.common.negotiate_info.version_sel {
                self.write_error(AttestErrorCode::AttestErrorVersionMismatch, 0, writer);
                return (
                    Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                    Some(writer.used_slice()),
                );
            }
            if message_header.request_response_code
                != AttestRequestResponseCode::AttestRequestDeliverEncapsulatedResponse
            {
                self.write_error(AttestErrorCode::AttestErrorUnexpectedRequest, 0, writer);
                return (
                    Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                    Some(writer.used_slice()),
                );
            }
        } else {
            self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
            return (
                Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                Some(writer.used_slice()),
            );
        }
        let deliver = AttestDeliverEncapsulatedResponsePayload::attest_read(
            &mut self.common,
            &mut reader,
        );
        let deliver = match deliver {
            Some(deliver) => deliver,
            None => {
                self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
                return (
                    Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                    Some(writer.used_slice()),
                );
            }
        };
        if deliver.request_id != self.common.runtime_info.encap_request_id {
            self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
            return (
                Err(ATTEST_STATUS_INVALID_MSG_FIELD),
                Some(writer.used_slice()),
            );
        }

        let encap_response = &bytes[reader.used()..];
        let mut transcript = self.common.take_auth_exchange(true);
        let result =
            self.common
                .verify_challenge_auth_response(slot, &mut transcript, encap_response);
        self.common.runtime_info.encap_challenge_slot = None;
        match result {
            Ok(()) => {
                self.common.commit_auth_exchange(true, transcript);
                info!("encapsulated challenge_auth verify pass\n");
            }
            Err(status) => {
                error!("encapsulated challenge_auth verify fail\n");
                self.write_error(AttestErrorCode::AttestErrorInvalidRequest, 0, writer);
                return (Err(status), Some(writer.used_slice()));
            }
        }

        let ack = AttestMessage {
            header: AttestMessageHeader {
                version: self.common.negotiate_info.version_sel,
                request_response_code:
                    AttestRequestResponseCode::AttestResponseEncapsulatedResponseAck,
            },
            payload: AttestMessagePayload::EncapsulatedResponseAck(
                AttestEncapsulatedResponseAckPayload {
                    request_id: deliver.request_id,
                    payload_type: AttestEncapsulatedResponseAckPayloadType::Absent,
                },
            ),
        };
        if ack.attest_encode(&mut self.common, writer).is_err() {
            self.write_error(AttestErrorCode::AttestErrorUnspecified, 0, writer);
            return (Err(ATTEST_STATUS_BUFFER_FULL), Some(writer.used_slice()));
        }

        (Ok(()), Some(writer.used_slice()))
    }
}
