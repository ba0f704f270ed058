// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::{AttestCodec, AttestContext};
use crate::error::{AttestResult, ATTEST_STATUS_BUFFER_FULL};
use codec::enum_builder;
use codec::{Codec, Reader, Writer};

enum_builder! {
    @U8
    EnumName: AttestErrorCode;
    EnumVal{
        AttestErrorInvalidRequest => 0x1,
        AttestErrorUnexpectedRequest => 0x4,
        AttestErrorUnspecified => 0x5,
        AttestErrorUnsupportedRequest => 0x7,
        AttestErrorVersionMismatch => 0x41
    }
}
impl Default for AttestErrorCode {
    fn default() -> AttestErrorCode {
        AttestErrorCode::Unknown(0)
    }
}

/// Error PDU body: a 1-byte error kind and a 1-byte auxiliary value (for the
/// kinds used here, e.g. the message code that could not be processed). No
/// further payload.
#[derive(Debug, Clone, Default)]
pub struct AttestErrorResponsePayload {
    pub error_code: AttestErrorCode,
    pub error_data: u8,
}

impl AttestCodec for AttestErrorResponsePayload {
    fn attest_encode(
        &self,
        _context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> AttestResult<usize> {
        let mut cnt = 0usize;
        cnt += self
            .error_code
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param1
        cnt += self
            .error_data
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param2
        Ok(cnt)
    }

    fn attest_read(
        _context: &mut AttestContext,
        r: &mut Reader,
    ) -> Option<AttestErrorResponsePayload> {
        let error_code = AttestErrorCode::read(r)?; // param1
        let error_data = u8::read(r)?; // param2

        Some(AttestErrorResponsePayload {
            error_code,
            error_data,
        })
    }
}

#[cfg(test)]
#[path = "mod_test.common.inc.rs"]
mod testlib;
