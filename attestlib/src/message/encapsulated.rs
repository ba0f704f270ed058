// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::{AttestCodec, AttestContext};
use crate::error::{AttestResult, ATTEST_STATUS_BUFFER_FULL};
use codec::enum_builder;
use codec::{Codec, Reader, Writer};

pub const ENCAPSULATED_RESPONSE_ACK_HEADER_SIZE: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct AttestGetEncapsulatedRequestPayload {}

impl AttestCodec for AttestGetEncapsulatedRequestPayload {
    fn attest_encode(
        &self,
        _context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> AttestResult<usize> {
        let mut cnt = 0usize;
        cnt += 0u8.encode(bytes).map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param1
        cnt += 0u8.encode(bytes).map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param2
        Ok(cnt)
    }

    fn attest_read(
        _context: &mut AttestContext,
        r: &mut Reader,
    ) -> Option<AttestGetEncapsulatedRequestPayload> {
        u8::read(r)?; // param1
        u8::read(r)?; // param2

        Some(AttestGetEncapsulatedRequestPayload {})
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttestEncapsulatedRequestPayload {
    pub request_id: u8,
}

impl AttestCodec for AttestEncapsulatedRequestPayload {
    fn attest_encode(
        &self,
        _context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> AttestResult<usize> {
        let mut cnt = 0usize;
        cnt += self
            .request_id
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param1
        cnt += 0u8.encode(bytes).map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param2
        Ok(cnt)
    }

    fn attest_read(
        _context: &mut AttestContext,
        r: &mut Reader,
    ) -> Option<AttestEncapsulatedRequestPayload> {
        let request_id = u8::read(r)?; // param1
        u8::read(r)?; // param2

        Some(AttestEncapsulatedRequestPayload { request_id })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttestDeliverEncapsulatedResponsePayload {
    pub request_id: u8,
}

impl AttestCodec for AttestDeliverEncapsulatedResponsePayload {
    fn attest_encode(
        &self,
        _context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> AttestResult<usize> {
        let mut cnt = 0usize;
        cnt += self
            .request_id
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param1
        cnt += 0u8.encode(bytes).map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param2
        Ok(cnt)
    }

    fn attest_read(
        _context: &mut AttestContext,
        r: &mut Reader,
    ) -> Option<AttestDeliverEncapsulatedResponsePayload> {
        let request_id = u8::read(r)?; // param1
        u8::read(r)?; // param2

        Some(AttestDeliverEncapsulatedResponsePayload { request_id })
    }
}

enum_builder! {
    @U8
    EnumName: AttestEncapsulatedResponseAckPayloadType;
    EnumVal{
        Absent => 0x0,
        Present => 0x1
    }
}
impl Default for AttestEncapsulatedResponseAckPayloadType {
    fn default() -> AttestEncapsulatedResponseAckPayloadType {
        AttestEncapsulatedResponseAckPayloadType::Absent
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttestEncapsulatedResponseAckPayload {
    pub request_id: u8,
    pub payload_type: AttestEncapsulatedResponseAckPayloadType,
}

impl AttestCodec for AttestEncapsulatedResponseAckPayload {
    fn attest_encode(
        &self,
        _context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> AttestResult<usize> {
        let mut cnt = 0usize;
        cnt += self
            .request_id
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param1
        cnt += self
            .payload_type
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param2
        Ok(cnt)
    }

    fn attest_read(
        _context: &mut AttestContext,
        r: &mut Reader,
    ) -> Option<AttestEncapsulatedResponseAckPayload> {
        let request_id = u8::read(r)?; // param1
        let payload_type = AttestEncapsulatedResponseAckPayloadType::read(r)?; // param2

        Some(AttestEncapsulatedResponseAckPayload {
            request_id,
            payload_type,
        })
    }
}

#[cfg(test)]
#[path = "mod_test.common.inc.rs"]
mod testlib;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{AttestConfigInfo, AttestProvisionInfo};
    use testlib::create_attest_context;

    #[test]
    fn test_case0_encapsulated_request_payload() {
        let u8_slice = &mut [0u8; 2];
        let mut writer = Writer::init(u8_slice);
        let value = AttestEncapsulatedRequestPayload { request_id: 0xa };

        create_attest_context!(context);

        assert!(value.attest_encode(&mut context, &mut writer).is_ok());
        let mut reader = Reader::init(u8_slice);
        let payload =
            AttestEncapsulatedRequestPayload::attest_read(&mut context, &mut reader).unwrap();
        assert_eq!(payload.request_id, 0xa);
    }

    #[test]
    fn test_case0_encapsulated_response_ack_payload() {
        let u8_slice = &mut [0u8; 2];
        let mut writer = Writer::init(u8_slice);
        let value = AttestEncapsulatedResponseAckPayload {
            request_id: 0x1,
            payload_type: AttestEncapsulatedResponseAckPayloadType::Absent,
        };

        create_attest_context!(context);

        assert!(value.attest_encode(&mut context, &mut writer).is_ok());
        let mut reader = Reader::init(u8_slice);
        let payload =
            AttestEncapsulatedResponseAckPayload::attest_read(&mut context, &mut reader).unwrap();
        assert_eq!(payload.request_id, 0x1);
        assert_eq!(
            payload.payload_type,
            AttestEncapsulatedResponseAckPayloadType::Absent
        );
    }
}
