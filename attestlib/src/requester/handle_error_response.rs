// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::AttestCodec;
use crate::error::{
    AttestResult, ATTEST_STATUS_ERROR_PEER, ATTEST_STATUS_INVALID_MSG_FIELD,
    ATTEST_STATUS_UNSUPPORTED_CAP,
};
use crate::message::{
    AttestErrorCode, AttestErrorResponsePayload, AttestMessageHeader, AttestRequestResponseCode,
};
use crate::requester::RequesterContext;
use codec::{Codec, Reader};

impl RequesterContext {
    /// Decode a peer error PDU and map it onto a status. An error PDU never
    /// maps to success.
    pub fn handle_error_response(&mut self, receive_buffer: &[u8]) -> AttestResult {
        let mut reader = Reader::init(receive_buffer);
        let message_header =
            AttestMessageHeader::read(&mut reader).ok_or(ATTEST_STATUS_INVALID_MSG_FIELD)?;
        if message_header.request_response_code != AttestRequestResponseCode::AttestResponseError {
            return Err(ATTEST_STATUS_INVALID_MSG_FIELD);
        }

        let payload = AttestErrorResponsePayload::attest_read(&mut self.common, &mut reader)
            .ok_or(ATTEST_STATUS_INVALID_MSG_FIELD)?;
        error!(
            "peer error response: {:?}, data {:#04x}\n",
            payload.error_code, payload.error_data
        );

        match payload.error_code {
            AttestErrorCode::AttestErrorUnsupportedRequest => Err(ATTEST_STATUS_UNSUPPORTED_CAP),
            _ => Err(ATTEST_STATUS_ERROR_PEER),
        }
    }
}
