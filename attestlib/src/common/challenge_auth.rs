// SPDX-License-Identifier: Apache-2.0 or MIT

//! The challenge-auth engine shared by both roles: exact response layout,
//! signature binding over the exchange transcript, and the mirror-image
//! verification. The normal responder path and the encapsulated
//! (role-reversed) path drive the same code; only the transcript instance
//! differs.

use crate::common::{AttestCodec, AttestContext, ManagedBufferAuth};
use crate::crypto;
use crate::error::{
    AttestResult, ATTEST_STATUS_BUFFER_FULL, ATTEST_STATUS_BUFFER_TOO_SMALL,
    ATTEST_STATUS_CRYPTO_ERROR, ATTEST_STATUS_INVALID_MSG_FIELD, ATTEST_STATUS_INVALID_MSG_SIZE,
    ATTEST_STATUS_INVALID_PARAMETER, ATTEST_STATUS_INVALID_STATE_LOCAL,
    ATTEST_STATUS_MEAS_INTERNAL_ERROR, ATTEST_STATUS_VERIF_FAIL,
};
use crate::message::{
    AttestChallengeAuthAttribute, AttestChallengeAuthResponsePayload, AttestMessage,
    AttestMessageHeader, AttestMessagePayload, AttestRequestResponseCode,
    CHALLENGE_AUTH_HEADER_SIZE,
};
use crate::protocol::{
    AttestDigestStruct, AttestNonceStruct, AttestSignatureStruct, SlotSelector,
    ATTEST_MAX_ASYM_KEY_SIZE, ATTEST_NONCE_SIZE, MAX_SLOT_COUNT,
};
use crate::secret;
use codec::{Codec, Reader, Writer};

impl AttestContext {
    /// Exact challenge-auth response length for this session. Fully
    /// determined by the negotiated hash and signature sizes and the
    /// provisioned opaque data; callers size their buffer from this.
    pub fn challenge_auth_response_size(&self) -> usize {
        let hash_size = self.get_hash_size() as usize;
        let measurement_summary_size = if self.runtime_info.need_measurement_summary_hash {
            hash_size
        } else {
            0
        };
        CHALLENGE_AUTH_HEADER_SIZE
            + hash_size
            + ATTEST_NONCE_SIZE
            + measurement_summary_size
            + 2
            + self.provision_info.opaque_challenge_auth_rsp.data_size as usize
            + self.get_asym_key_size() as usize
    }

    /// The slot whose credentials actually back a response: the provisioned
    /// slot when the sentinel was requested, the requested index otherwise.
    pub fn effective_slot_id(&self, slot: SlotSelector) -> u8 {
        match slot {
            SlotSelector::Explicit(index) => index,
            SlotSelector::Provisioned => self.provision_info.provisioned_slot_id,
        }
    }

    /// Assemble a challenge-auth response into `writer` and bind the
    /// signature over `transcript`, which must already contain the request
    /// bytes. On return the transcript holds request ∥ response-prefix; the
    /// signature itself is never appended.
    pub fn write_challenge_auth_response(
        &mut self,
        slot: SlotSelector,
        transcript: &mut ManagedBufferAuth,
        writer: &mut Writer,
    ) -> AttestResult<usize> {
        let required = self.challenge_auth_response_size();
        if writer.left() < required {
            error!(
                "challenge_auth response buffer too small: required {}, available {}\n",
                required,
                writer.left()
            );
            return Err(ATTEST_STATUS_BUFFER_TOO_SMALL);
        }

        let effective_slot_id = self.effective_slot_id(slot);
        if effective_slot_id as usize >= MAX_SLOT_COUNT {
            return Err(ATTEST_STATUS_INVALID_PARAMETER);
        }
        let slot_mask = match slot {
            SlotSelector::Explicit(index) => 1u8 << index,
            // never leaks which concrete slot backs the provisioned identity
            SlotSelector::Provisioned => 0,
        };

        let cert_chain_hash = {
            let my_cert_chain = self.provision_info.my_cert_chain[effective_slot_id as usize]
                .as_ref()
                .ok_or(ATTEST_STATUS_INVALID_STATE_LOCAL)?;
            crypto::hash::hash_all(self.negotiate_info.base_hash_sel, my_cert_chain.as_ref())
                .ok_or(ATTEST_STATUS_CRYPTO_ERROR)?
        };

        let mut nonce = [0u8; ATTEST_NONCE_SIZE];
        crypto::rand::get_random(&mut nonce)?;

        let measurement_summary_hash = if self.runtime_info.need_measurement_summary_hash {
            let digest = secret::measurement::generate_measurement_summary_hash(
                self.negotiate_info.version_sel,
                self.negotiate_info.base_hash_sel,
            )
            .ok_or(ATTEST_STATUS_MEAS_INTERNAL_ERROR)?;
            if digest.data_size == 0 {
                return Err(ATTEST_STATUS_MEAS_INTERNAL_ERROR);
            }
            digest
        } else {
            AttestDigestStruct::default()
        };

        let response = AttestMessage {
            header: AttestMessageHeader {
                version: self.select_challenge_auth_version(),
                request_response_code: AttestRequestResponseCode::AttestResponseChallengeAuth,
            },
            payload: AttestMessagePayload::ChallengeAuthResponse(
                AttestChallengeAuthResponsePayload {
                    attribute: AttestChallengeAuthAttribute {
                        // requested value masked to the field width; the
                        // sentinel shows up as 0xF here
                        slot_id: slot.to_wire() & 0x0F,
                        basic_mut_auth_req: false,
                    },
                    slot_mask,
                    cert_chain_hash,
                    nonce: AttestNonceStruct { data: nonce },
                    measurement_summary_hash,
                    opaque: self.provision_info.opaque_challenge_auth_rsp,
                    signature: AttestSignatureStruct {
                        data_size: self.negotiate_info.base_asym_sel.get_size(),
                        data: [0xbb; ATTEST_MAX_ASYM_KEY_SIZE],
                    },
                },
            ),
        };

        let used_before = writer.used();
        response.attest_encode(self, writer)?;
        let used = writer.used();

        // sign over everything exchanged so far, excluding the placeholder
        // signature field
        let signature_size = self.get_asym_key_size() as usize;
        let prefix_end = used - signature_size;
        transcript
            .append_message(&writer.used_slice()[used_before..prefix_end])
            .ok_or(ATTEST_STATUS_BUFFER_FULL)?;

        let signature = self.generate_challenge_auth_signature(transcript)?;
        writer.mut_used_slice()[prefix_end..used].copy_from_slice(signature.as_ref());

        Ok(used - used_before)
    }

    pub fn generate_challenge_auth_signature(
        &self,
        transcript: &ManagedBufferAuth,
    ) -> AttestResult<AttestSignatureStruct> {
        let signature = secret::asym_sign::sign(
            self.negotiate_info.base_hash_sel,
            self.negotiate_info.base_asym_sel,
            transcript.as_ref(),
        )
        .ok_or(ATTEST_STATUS_CRYPTO_ERROR)?;
        if signature.data_size != self.get_asym_key_size() {
            return Err(ATTEST_STATUS_CRYPTO_ERROR);
        }
        Ok(signature)
    }

    /// Verify a received challenge-auth response against `transcript`, which
    /// must already contain the issued request bytes. Appends the response
    /// prefix, checks the layout invariants and certificate digest, then
    /// verifies the signature with the peer chain of the effective slot.
    pub fn verify_challenge_auth_response(
        &mut self,
        slot: SlotSelector,
        transcript: &mut ManagedBufferAuth,
        response_bytes: &[u8],
    ) -> AttestResult {
        let mut reader = Reader::init(response_bytes);
        let header =
            AttestMessageHeader::read(&mut reader).ok_or(ATTEST_STATUS_INVALID_MSG_FIELD)?;
        if header.version != self.select_challenge_auth_version() {
            return Err(ATTEST_STATUS_INVALID_MSG_FIELD);
        }
        if header.request_response_code != AttestRequestResponseCode::AttestResponseChallengeAuth {
            return Err(ATTEST_STATUS_INVALID_MSG_FIELD);
        }

        let payload = AttestChallengeAuthResponsePayload::attest_read(self, &mut reader)
            .ok_or(ATTEST_STATUS_INVALID_MSG_FIELD)?;
        let used = reader.used();
        if reader.any_left() {
            return Err(ATTEST_STATUS_INVALID_MSG_SIZE);
        }
        debug!("!!! challenge_auth : {:02x?}\n", payload);

        match slot {
            SlotSelector::Explicit(index) => {
                if payload.slot_mask != (1u8 << index) || payload.attribute.slot_id != index {
                    return Err(ATTEST_STATUS_INVALID_MSG_FIELD);
                }
            }
            SlotSelector::Provisioned => {
                if payload.slot_mask != 0 {
                    return Err(ATTEST_STATUS_INVALID_MSG_FIELD);
                }
            }
        }

        let verify_slot_id = match slot {
            SlotSelector::Explicit(index) => index,
            SlotSelector::Provisioned => self.peer_info.peer_provisioned_slot_id,
        };
        if verify_slot_id as usize >= MAX_SLOT_COUNT {
            return Err(ATTEST_STATUS_INVALID_PARAMETER);
        }
        let peer_cert_chain = self.peer_info.peer_cert_chain[verify_slot_id as usize]
            .as_ref()
            .ok_or(ATTEST_STATUS_INVALID_PARAMETER)?;

        let expected_cert_chain_hash =
            crypto::hash::hash_all(self.negotiate_info.base_hash_sel, peer_cert_chain.as_ref())
                .ok_or(ATTEST_STATUS_CRYPTO_ERROR)?;
        if expected_cert_chain_hash.as_ref() != payload.cert_chain_hash.as_ref() {
            error!("challenge_auth certificate chain digest mismatch\n");
            return Err(ATTEST_STATUS_VERIF_FAIL);
        }

        let signature_size = self.get_asym_key_size() as usize;
        transcript
            .append_message(&response_bytes[..used - signature_size])
            .ok_or(ATTEST_STATUS_BUFFER_FULL)?;

        crypto::asym_verify::verify(
            self.negotiate_info.base_hash_sel,
            self.negotiate_info.base_asym_sel,
            peer_cert_chain.as_ref(),
            transcript.as_ref(),
            &payload.signature,
        )
    }
}
