// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::opaque::AttestOpaqueStruct;
use crate::common::{AttestCodec, AttestContext};
use crate::error::{AttestResult, ATTEST_STATUS_BUFFER_FULL};
use crate::protocol::{
    AttestDigestStruct, AttestNonceStruct, AttestSignatureStruct, SlotSelector,
};
use codec::{Codec, Reader, Writer};

/// A CHALLENGE request is exactly one header: version, code, slot, reserved.
pub const CHALLENGE_REQUEST_SIZE: usize = 4;

pub const CHALLENGE_AUTH_HEADER_SIZE: usize = 4;

#[derive(Debug, Clone)]
pub struct AttestChallengeRequestPayload {
    pub slot: SlotSelector,
}

impl Default for AttestChallengeRequestPayload {
    fn default() -> Self {
        AttestChallengeRequestPayload {
            slot: SlotSelector::Provisioned,
        }
    }
}

impl AttestCodec for AttestChallengeRequestPayload {
    fn attest_encode(
        &self,
        _context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> AttestResult<usize> {
        let mut cnt = 0usize;
        cnt += self
            .slot
            .to_wire()
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param1
        cnt += 0u8.encode(bytes).map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param2, reserved
        Ok(cnt)
    }

    fn attest_read(
        _context: &mut AttestContext,
        r: &mut Reader,
    ) -> Option<AttestChallengeRequestPayload> {
        let slot = SlotSelector::from_wire(u8::read(r)?); // param1
        u8::read(r)?; // param2, reserved, ignored

        Some(AttestChallengeRequestPayload { slot })
    }
}

const CHALLENGE_AUTH_ATTRIBUTE_SLOT_ID_MASK: u8 = 0x0F;
const CHALLENGE_AUTH_ATTRIBUTE_BASIC_MUT_AUTH: u8 = 0x10;
const CHALLENGE_AUTH_ATTRIBUTE_RESERVED_MASK: u8 = 0xE0;

/// The packed attribute byte of a challenge-auth response: slot id in bits
/// 3:0, basic mutual-auth request at bit 4, remaining bits reserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttestChallengeAuthAttribute {
    pub slot_id: u8,
    pub basic_mut_auth_req: bool,
}

impl AttestChallengeAuthAttribute {
    pub fn pack(&self) -> u8 {
        let mut value = self.slot_id & CHALLENGE_AUTH_ATTRIBUTE_SLOT_ID_MASK;
        if self.basic_mut_auth_req {
            value |= CHALLENGE_AUTH_ATTRIBUTE_BASIC_MUT_AUTH;
        }
        value
    }

    /// Rejects set reserved bits.
    pub fn unpack(value: u8) -> Option<AttestChallengeAuthAttribute> {
        if value & CHALLENGE_AUTH_ATTRIBUTE_RESERVED_MASK != 0 {
            return None;
        }
        Some(AttestChallengeAuthAttribute {
            slot_id: value & CHALLENGE_AUTH_ATTRIBUTE_SLOT_ID_MASK,
            basic_mut_auth_req: value & CHALLENGE_AUTH_ATTRIBUTE_BASIC_MUT_AUTH != 0,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttestChallengeAuthResponsePayload {
    pub attribute: AttestChallengeAuthAttribute,
    pub slot_mask: u8,
    pub cert_chain_hash: AttestDigestStruct,
    pub nonce: AttestNonceStruct,
    pub measurement_summary_hash: AttestDigestStruct,
    pub opaque: AttestOpaqueStruct,
    pub signature: AttestSignatureStruct,
}

impl AttestCodec for AttestChallengeAuthResponsePayload {
    fn attest_encode(
        &self,
        context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> AttestResult<usize> {
        let mut cnt = 0usize;
        cnt += self
            .attribute
            .pack()
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param1
        cnt += self
            .slot_mask
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?; // param2
        cnt += self.cert_chain_hash.attest_encode(context, bytes)?;
        cnt += self
            .nonce
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?;
        if context.runtime_info.need_measurement_summary_hash {
            cnt += self.measurement_summary_hash.attest_encode(context, bytes)?;
        }
        cnt += self.opaque.attest_encode(context, bytes)?;
        cnt += self.signature.attest_encode(context, bytes)?;
        Ok(cnt)
    }

    fn attest_read(
        context: &mut AttestContext,
        r: &mut Reader,
    ) -> Option<AttestChallengeAuthResponsePayload> {
        let attribute = AttestChallengeAuthAttribute::unpack(u8::read(r)?)?; // param1
        let slot_mask = u8::read(r)?; // param2
        let cert_chain_hash = AttestDigestStruct::attest_read(context, r)?;
        let nonce = AttestNonceStruct::read(r)?;
        let measurement_summary_hash = if context.runtime_info.need_measurement_summary_hash {
            AttestDigestStruct::attest_read(context, r)?
        } else {
            AttestDigestStruct::default()
        };
        let opaque = AttestOpaqueStruct::attest_read(context, r)?;
        let signature = AttestSignatureStruct::attest_read(context, r)?;
        Some(AttestChallengeAuthResponsePayload {
            attribute,
            slot_mask,
            cert_chain_hash,
            nonce,
            measurement_summary_hash,
            opaque,
            signature,
        })
    }
}

#[cfg(test)]
#[path = "mod_test.common.inc.rs"]
mod testlib;
