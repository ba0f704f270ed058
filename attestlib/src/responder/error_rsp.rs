// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::AttestCodec;
use crate::message::{
    AttestErrorCode, AttestErrorResponsePayload, AttestMessage, AttestMessageHeader,
    AttestMessagePayload, AttestRequestResponseCode,
};
use crate::responder::ResponderContext;
use codec::Writer;

impl ResponderContext {
    /// Replace whatever is in `writer` with a well-formed error PDU. Every
    /// rejection path reports through the same response channel as success.
    pub fn write_error(
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
            error!("failed to encode error response\n");
        }
    }
}
