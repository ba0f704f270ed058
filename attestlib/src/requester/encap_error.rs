// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::AttestCodec;
use crate::message::{
    AttestErrorCode, AttestErrorResponsePayload, AttestMessage, AttestMessageHeader,
    AttestMessagePayload, AttestRequestResponseCode,
};
use crate::requester::RequesterContext;
use codec::Writer;

impl RequesterContext {
    /// Replace whatever is in `writer` with a well-formed error PDU for the
    /// encapsulated flow.
    pub fn encode_encap_error_response(
        &mut self,
        error_code: AttestErrorCode,
        error_data: u8,
        writer: &mut Writer,
    ) {
        writer.clear();
        let error = AttestMessage {
            header: AttestMessageHeader {
                version: self.common.negotiate_info.version_sel,
                request_response_code: AttestRequestResponseCode::AttestResponseError,
            },
            payload: AttestMessagePayload::ErrorResponse(AttestErrorResponsePayload {
                error_code,
                error_data,
            }),
        };
        if error.attest_encode(&mut self.common, writer).is_err() {
            error!("failed to encode encapsulated error response\n");
        }
    }
}
