// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::AttestCodec;
use crate::config;
use crate::error::{
    AttestResult, ATTEST_STATUS_BUFFER_FULL, ATTEST_STATUS_INVALID_MSG_FIELD,
    ATTEST_STATUS_INVALID_MSG_SIZE,
};
use crate::message::{
    AttestDeliverEncapsulatedResponsePayload, AttestEncapsulatedRequestPayload,
    AttestEncapsulatedResponseAckPayload, AttestEncapsulatedResponseAckPayloadType,
    AttestErrorCode, AttestMessage, AttestMessageHeader, AttestMessagePayload,
    AttestRequestResponseCode, ENCAPSULATED_RESPONSE_ACK_HEADER_SIZE,
};
use crate::requester::RequesterContext;
use codec::{Codec, Reader, Writer};

impl RequesterContext {
    /// Process an ENCAPSULATED_REQUEST and produce the matching
    /// DELIVER_ENCAPSULATED_RESPONSE into `writer`.
    pub fn handle_encapsulated_request<'a>(
        &mut self,
        bytes: &[u8],
        writer: &'a mut Writer<'_>,
    ) -> AttestResult<&'a [u8]> {
        let mut reader = Reader::init(bytes);
        let header =
            AttestMessageHeader::read(&mut reader).ok_or(ATTEST_STATUS_INVALID_MSG_SIZE)?;
        if self.common.negotiate_info.version_sel != header.version
            || header.request_response_code
                != AttestRequestResponseCode::AttestResponseEncapsulatedRequest
        {
            return Err(ATTEST_STATUS_INVALID_MSG_FIELD);
        }
        let encapsulated_request =
            AttestEncapsulatedRequestPayload::attest_read(&mut self.common, &mut reader)
                .ok_or(ATTEST_STATUS_INVALID_MSG_SIZE)?;

        self.process_encapsulated_request(
            encapsulated_request.request_id,
            &bytes[reader.used()..],
            writer,
        )
    }

    /// Process an ENCAPSULATED_RESPONSE_ACK that carries a follow-up request.
    /// Returns `Ok(None)` when the ack closes the flow, `Ok(Some(response))`
    /// when another DELIVER_ENCAPSULATED_RESPONSE was produced.
    pub fn handle_encapsulated_response_ack<'a>(
        &mut self,
        bytes: &[u8],
        writer: &'a mut Writer<'_>,
    ) -> AttestResult<Option<&'a [u8]>> {
        let mut reader = Reader::init(bytes);
        let header =
            AttestMessageHeader::read(&mut reader).ok_or(ATTEST_STATUS_INVALID_MSG_SIZE)?;
        if self.common.negotiate_info.version_sel != header.version
            || header.request_response_code
                != AttestRequestResponseCode::AttestResponseEncapsulatedResponseAck
        {
            return Err(ATTEST_STATUS_INVALID_MSG_FIELD);
        }
        let ack_header =
            AttestEncapsulatedResponseAckPayload::attest_read(&mut self.common, &mut reader)
                .ok_or(ATTEST_STATUS_INVALID_MSG_SIZE)?;

        match ack_header.payload_type {
            AttestEncapsulatedResponseAckPayloadType::Absent => {
                if bytes.len() == ENCAPSULATED_RESPONSE_ACK_HEADER_SIZE {
                    Ok(None)
                } else {
                    Err(ATTEST_STATUS_INVALID_MSG_SIZE)
                }
            }
            AttestEncapsulatedResponseAckPayloadType::Present => self
                .process_encapsulated_request(
                    ack_header.request_id,
                    &bytes[reader.used()..],
                    writer,
                )
                .map(Some),
            AttestEncapsulatedResponseAckPayloadType::Unknown(_) => {
                Err(ATTEST_STATUS_INVALID_MSG_FIELD)
            }
        }
    }

    /// Wrap the embedded request's answer in DELIVER_ENCAPSULATED_RESPONSE.
    /// The inner handler writes into a dedicated scratch area so a rejected
    /// request yields a clean embedded error PDU.
    pub fn process_encapsulated_request<'a>(
        &mut self,
        request_id: u8,
        encap_request: &[u8],
        writer: &'a mut Writer<'_>,
    ) -> AttestResult<&'a [u8]> {
        let mut inner_response = [0u8; config::MAX_ATTEST_MSG_SIZE];
        let mut inner_writer = Writer::init(&mut inner_response);

        let encap_header = AttestMessageHeader::read_bytes(encap_request)
            .ok_or(ATTEST_STATUS_INVALID_MSG_FIELD)?;
        match encap_header.request_response_code {
            AttestRequestResponseCode::AttestRequestChallenge => {
                self.encap_handle_challenge(encap_request, &mut inner_writer)
            }
            _ => self.encode_encap_error_response(
                AttestErrorCode::AttestErrorUnexpectedRequest,
                0,
                &mut inner_writer,
            ),
        }

        let deliver = AttestMessage {
            header: AttestMessageHeader {
                version: self.common.negotiate_info.version_sel,
                request_response_code:
                    AttestRequestResponseCode::AttestRequestDeliverEncapsulatedResponse,
            },
            payload: AttestMessagePayload::DeliverEncapsulatedResponse(
                AttestDeliverEncapsulatedResponsePayload { request_id },
            ),
        };
        deliver.attest_encode(&mut self.common, writer)?;
        writer
            .extend_from_slice(inner_writer.used_slice())
            .ok_or(ATTEST_STATUS_BUFFER_FULL)?;

        Ok(writer.used_slice())
    }
}
