// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::{AttestCodec, AttestContext};
use crate::error::{AttestResult, ATTEST_STATUS_BUFFER_FULL};
use crate::protocol::AttestVersion;
use codec::enum_builder;
use codec::{Codec, Reader, Writer};

pub mod challenge;
pub mod encapsulated;
pub mod error;

pub use challenge::*;
pub use encapsulated::*;
pub use error::*;

enum_builder! {
    @U8
    EnumName: AttestRequestResponseCode;
    EnumVal{
        // responses
        AttestResponseChallengeAuth => 0x03,
        AttestResponseEncapsulatedRequest => 0x6A,
        AttestResponseEncapsulatedResponseAck => 0x6B,
        AttestResponseError => 0x7F,

        // requests
        AttestRequestChallenge => 0x83,
        AttestRequestGetEncapsulatedRequest => 0xEA,
        AttestRequestDeliverEncapsulatedResponse => 0xEB
    }
}
impl Default for AttestRequestResponseCode {
    fn default() -> AttestRequestResponseCode {
        AttestRequestResponseCode::Unknown(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttestMessageHeader {
    pub version: AttestVersion,
    pub request_response_code: AttestRequestResponseCode,
}

impl Codec for AttestMessageHeader {
    fn encode(&self, bytes: &mut Writer) -> Result<usize, codec::EncodeErr> {
        let mut cnt = 0usize;
        cnt += self.version.encode(bytes)?;
        cnt += self.request_response_code.encode(bytes)?;
        Ok(cnt)
    }

    fn read(r: &mut Reader) -> Option<AttestMessageHeader> {
        let version = AttestVersion::read(r)?;
        let request_response_code = AttestRequestResponseCode::read(r)?;
        Some(AttestMessageHeader {
            version,
            request_response_code,
        })
    }
}

#[derive(Debug)]
pub struct AttestMessage {
    pub header: AttestMessageHeader,
    pub payload: AttestMessagePayload,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
pub enum AttestMessagePayload {
    ChallengeRequest(AttestChallengeRequestPayload),
    ChallengeAuthResponse(AttestChallengeAuthResponsePayload),

    GetEncapsulatedRequest(AttestGetEncapsulatedRequestPayload),
    EncapsulatedRequest(AttestEncapsulatedRequestPayload),
    DeliverEncapsulatedResponse(AttestDeliverEncapsulatedResponsePayload),
    EncapsulatedResponseAck(AttestEncapsulatedResponseAckPayload),

    ErrorResponse(AttestErrorResponsePayload),
}

impl AttestCodec for AttestMessage {
    fn attest_encode(
        &self,
        context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> AttestResult<usize> {
        let mut cnt = 0usize;
        cnt += self
            .header
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?;
        cnt += match &self.payload {
            AttestMessagePayload::ChallengeRequest(payload) => {
                payload.attest_encode(context, bytes)?
            }
            AttestMessagePayload::ChallengeAuthResponse(payload) => {
                payload.attest_encode(context, bytes)?
            }
            AttestMessagePayload::GetEncapsulatedRequest(payload) => {
                payload.attest_encode(context, bytes)?
            }
            AttestMessagePayload::EncapsulatedRequest(payload) => {
                payload.attest_encode(context, bytes)?
            }
            AttestMessagePayload::DeliverEncapsulatedResponse(payload) => {
                payload.attest_encode(context, bytes)?
            }
            AttestMessagePayload::EncapsulatedResponseAck(payload) => {
                payload.attest_encode(context, bytes)?
            }
            AttestMessagePayload::ErrorResponse(payload) => {
                payload.attest_encode(context, bytes)?
            }
        };
        Ok(cnt)
    }

    fn attest_read(context: &mut AttestContext, r: &mut Reader) -> Option<AttestMessage> {
        let header = AttestMessageHeader::read(r)?;

        let payload = match header.request_response_code {
            AttestRequestResponseCode::AttestRequestChallenge => {
                Some(AttestMessagePayload::ChallengeRequest(
                    AttestChallengeRequestPayload::attest_read(context, r)?,
                ))
            }
            AttestRequestResponseCode::AttestResponseChallengeAuth => {
                Some(AttestMessagePayload::ChallengeAuthResponse(
                    AttestChallengeAuthResponsePayload::attest_read(context, r)?,
                ))
            }
            AttestRequestResponseCode::AttestRequestGetEncapsulatedRequest => {
                Some(AttestMessagePayload::GetEncapsulatedRequest(
                    AttestGetEncapsulatedRequestPayload::attest_read(context, r)?,
                ))
            }
            AttestRequestResponseCode::AttestResponseEncapsulatedRequest => {
                Some(AttestMessagePayload::EncapsulatedRequest(
                    AttestEncapsulatedRequestPayload::attest_read(context, r)?,
                ))
            }
            AttestRequestResponseCode::AttestRequestDeliverEncapsulatedResponse => {
                Some(AttestMessagePayload::DeliverEncapsulatedResponse(
                    AttestDeliverEncapsulatedResponsePayload::attest_read(context, r)?,
                ))
            }
            AttestRequestResponseCode::AttestResponseEncapsulatedResponseAck => {
                Some(AttestMessagePayload::EncapsulatedResponseAck(
                    AttestEncapsulatedResponseAckPayload::attest_read(context, r)?,
                ))
            }
            AttestRequestResponseCode::AttestResponseError => {
                Some(AttestMessagePayload::ErrorResponse(
                    AttestErrorResponsePayload::attest_read(context, r)?,
                ))
            }
            AttestRequestResponseCode::Unknown(_) => None,
        }?;

        Some(AttestMessage { header, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_header_round_trip() {
        let buf = &mut [0u8; 2];
        let mut writer = Writer::init(buf);
        let value = AttestMessageHeader {
            version: AttestVersion::AttestVersion11,
            request_response_code: AttestRequestResponseCode::AttestRequestChallenge,
        };
        assert!(value.encode(&mut writer).is_ok());
        assert_eq!(buf, &[0x11, 0x83]);

        let mut reader = Reader::init(buf);
        let header = AttestMessageHeader::read(&mut reader).unwrap();
        assert_eq!(header.version, AttestVersion::AttestVersion11);
        assert_eq!(
            header.request_response_code,
            AttestRequestResponseCode::AttestRequestChallenge
        );
    }

    #[test]
    fn test_message_round_trip_dispatch() {
        use crate::common::{AttestConfigInfo, AttestContext, AttestProvisionInfo};
        use crate::protocol::SlotSelector;

        let mut context =
            AttestContext::new(AttestConfigInfo::default(), AttestProvisionInfo::default())
                .unwrap();

        let buf = &mut [0u8; 4];
        let mut writer = Writer::init(buf);
        let message = AttestMessage {
            header: AttestMessageHeader {
                version: AttestVersion::AttestVersion10,
                request_response_code: AttestRequestResponseCode::AttestRequestChallenge,
            },
            payload: AttestMessagePayload::ChallengeRequest(AttestChallengeRequestPayload {
                slot: SlotSelector::Explicit(1),
            }),
        };
        assert_eq!(message.attest_encode(&mut context, &mut writer), Ok(4));

        let mut reader = Reader::init(buf);
        let message = AttestMessage::attest_read(&mut context, &mut reader).unwrap();
        match message.payload {
            AttestMessagePayload::ChallengeRequest(payload) => {
                assert_eq!(payload.slot, SlotSelector::Explicit(1));
            }
            _ => panic!("wrong payload variant"),
        }
    }

    #[test]
    fn test_message_read_unknown_code() {
        use crate::common::{AttestConfigInfo, AttestContext, AttestProvisionInfo};

        let mut context =
            AttestContext::new(AttestConfigInfo::default(), AttestProvisionInfo::default())
                .unwrap();
        let mut reader = Reader::init(&[0x10, 0x42, 0x00, 0x00]);
        assert!(AttestMessage::attest_read(&mut context, &mut reader).is_none());
    }

    #[test]
    fn test_code_wire_values() {
        assert_eq!(
            AttestRequestResponseCode::AttestResponseChallengeAuth.get_u8(),
            0x03
        );
        assert_eq!(AttestRequestResponseCode::AttestResponseError.get_u8(), 0x7F);
        assert_eq!(AttestRequestResponseCode::AttestRequestChallenge.get_u8(), 0x83);
    }
}
