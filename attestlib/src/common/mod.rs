// SPDX-License-Identifier: Apache-2.0 or MIT

pub mod attest_codec;
pub mod challenge_auth;
pub mod opaque;

pub use attest_codec::AttestCodec;
pub use opaque::*;

use crate::error::{
    AttestResult, AttestStatus, ATTEST_STATUS_BUFFER_FULL, ATTEST_STATUS_INVALID_PARAMETER,
};
use crate::protocol::*;
use codec::{enum_builder, Codec, Reader, Writer};

enum_builder! {
    @U8
    EnumName: AttestConnectionState;
    EnumVal{
        // Before version/capability/algorithm negotiation
        AttestConnectionNotStarted => 0x0,
        // Negotiation resolved, challenge exchange may run
        AttestConnectionNegotiated => 0x1,
        // After a successful CHALLENGE/CHALLENGE_AUTH exchange
        AttestConnectionAuthenticated => 0x2
    }
}
#[allow(clippy::derivable_impls)]
impl Default for AttestConnectionState {
    fn default() -> AttestConnectionState {
        AttestConnectionState::AttestConnectionNotStarted
    }
}

/// Worst case for one authentication exchange transcript: the 4-byte request
/// plus a full response with both digests, maximum opaque data and the
/// largest signature.
pub const MAX_MANAGED_BUFFER_AUTH_SIZE: usize =
    8 + ATTEST_NONCE_SIZE + 2 * ATTEST_MAX_HASH_SIZE + 2 + MAX_OPAQUE_SIZE
        + ATTEST_MAX_ASYM_KEY_SIZE;

/// Append-only byte log covering exactly one authentication exchange. The
/// signature is computed over its contents; order and byte-exactness are the
/// whole point.
#[derive(Debug, Clone)]
pub struct ManagedBufferAuth(usize, [u8; MAX_MANAGED_BUFFER_AUTH_SIZE]);

impl ManagedBufferAuth {
    pub fn append_message(&mut self, bytes: &[u8]) -> Option<usize> {
        let used = self.0;
        let mut writer = Writer::init(&mut self.1[used..]);
        let len = writer.extend_from_slice(bytes)?;
        self.0 = used + len;
        Some(len)
    }

    pub fn reset_message(&mut self) {
        self.0 = 0;
    }
}

impl AsRef<[u8]> for ManagedBufferAuth {
    fn as_ref(&self) -> &[u8] {
        &self.1[..self.0]
    }
}

impl Default for ManagedBufferAuth {
    fn default() -> Self {
        ManagedBufferAuth(0usize, [0u8; MAX_MANAGED_BUFFER_AUTH_SIZE])
    }
}

#[derive(Debug, Default)]
pub struct AttestConfigInfo {
    /// Protocol revisions this endpoint supports.
    pub version: [Option<AttestVersion>; MAX_VERSION_COUNT],
    pub req_capabilities: AttestRequestCapabilityFlags,
    pub rsp_capabilities: AttestResponseCapabilityFlags,
    pub base_hash_algo: AttestBaseHashAlgo,
    pub base_asym_algo: AttestBaseAsymAlgo,
    /// Session policy: carry a measurement summary digest in challenge-auth
    /// responses. Resolved out of band, not on the wire.
    pub measurement_summary: bool,
}

/// Negotiated parameters, immutable for the session once set.
#[derive(Debug, Default)]
pub struct AttestNegotiateInfo {
    pub version_sel: AttestVersion,
    pub req_capabilities_sel: AttestRequestCapabilityFlags,
    pub rsp_capabilities_sel: AttestResponseCapabilityFlags,
    pub base_hash_sel: AttestBaseHashAlgo,
    pub base_asym_sel: AttestBaseAsymAlgo,
}

pub struct AttestProvisionInfo {
    pub my_cert_chain: [Option<AttestCertChainData>; MAX_SLOT_COUNT],
    /// Number of slots this endpoint exposes; a requested index must stay
    /// below it.
    pub slot_count: u8,
    /// Slot used when the peer requests the sentinel instead of an index.
    pub provisioned_slot_id: u8,
    /// Vendor bytes copied verbatim into every challenge-auth response.
    pub opaque_challenge_auth_rsp: AttestOpaqueStruct,
}

impl Default for AttestProvisionInfo {
    fn default() -> Self {
        AttestProvisionInfo {
            my_cert_chain: Default::default(),
            slot_count: 0,
            provisioned_slot_id: 0,
            opaque_challenge_auth_rsp: AttestOpaqueStruct::default(),
        }
    }
}

#[derive(Default)]
pub struct AttestPeerInfo {
    pub peer_cert_chain: [Option<AttestCertChainData>; MAX_SLOT_COUNT],
    /// Which of the peer's slots backs its provisioned identity, learned out
    /// of band; used to verify sentinel-slot responses.
    pub peer_provisioned_slot_id: u8,
}

#[derive(Debug, Default)]
pub struct AttestRuntimeInfo {
    connection_state: AttestConnectionState,
    /// Whether the current exchange carries a measurement summary digest.
    pub need_measurement_summary_hash: bool,
    /// Transcript of the normal-role exchange.
    pub message_auth: ManagedBufferAuth,
    /// Transcript of the encapsulated (role-reversed) exchange.
    pub message_encap_auth: ManagedBufferAuth,
    /// Request id of the encapsulated request in flight.
    pub encap_request_id: u8,
    /// Slot the responder challenged the requester with; `None` while no
    /// encapsulated challenge is outstanding.
    pub encap_challenge_slot: Option<SlotSelector>,
}

impl AttestRuntimeInfo {
    pub fn set_connection_state(&mut self, connection_state: AttestConnectionState) {
        self.connection_state = connection_state;
    }

    pub fn get_connection_state(&self) -> AttestConnectionState {
        self.connection_state
    }
}

/// Per-session state. One exchange in flight per context at a time; callers
/// serialize access. Independent sessions are independent values.
pub struct AttestContext {
    pub config_info: AttestConfigInfo,
    pub negotiate_info: AttestNegotiateInfo,
    pub runtime_info: AttestRuntimeInfo,
    pub provision_info: AttestProvisionInfo,
    pub peer_info: AttestPeerInfo,
}

impl AttestContext {
    pub fn new(
        config_info: AttestConfigInfo,
        provision_info: AttestProvisionInfo,
    ) -> AttestResult<Self> {
        if provision_info.slot_count as usize > MAX_SLOT_COUNT {
            return Err(ATTEST_STATUS_INVALID_PARAMETER);
        }
        if provision_info.provisioned_slot_id as usize >= MAX_SLOT_COUNT {
            return Err(ATTEST_STATUS_INVALID_PARAMETER);
        }
        Ok(AttestContext {
            config_info,
            negotiate_info: AttestNegotiateInfo::default(),
            runtime_info: AttestRuntimeInfo::default(),
            provision_info,
            peer_info: AttestPeerInfo::default(),
        })
    }

    pub fn get_hash_size(&self) -> u16 {
        self.negotiate_info.base_hash_sel.get_size()
    }

    pub fn get_asym_key_size(&self) -> u16 {
        self.negotiate_info.base_asym_sel.get_size()
    }

    pub fn is_version_supported(&self, version: AttestVersion) -> bool {
        self.config_info
            .version
            .iter()
            .any(|v| *v == Some(version))
    }

    /// Revision carried in a challenge-auth header: the newer supported
    /// revision when available, else the older one.
    pub fn select_challenge_auth_version(&self) -> AttestVersion {
        if self.is_version_supported(AttestVersion::AttestVersion11) {
            AttestVersion::AttestVersion11
        } else {
            AttestVersion::AttestVersion10
        }
    }

    /// Start a new authentication exchange: reset the stored transcript and
    /// hand out the single owning handle for the pipeline.
    pub fn begin_auth_exchange(&mut self, encapsulated: bool) -> ManagedBufferAuth {
        let transcript = ManagedBufferAuth::default();
        if encapsulated {
            self.runtime_info.message_encap_auth.reset_message();
        } else {
            self.runtime_info.message_auth.reset_message();
        }
        transcript
    }

    /// Resume the exchange in flight: move the stored transcript out so the
    /// pipeline can keep extending the single owning handle.
    pub fn take_auth_exchange(&mut self, encapsulated: bool) -> ManagedBufferAuth {
        if encapsulated {
            core::mem::take(&mut self.runtime_info.message_encap_auth)
        } else {
            core::mem::take(&mut self.runtime_info.message_auth)
        }
    }

    /// Store the exchange transcript back on the session; later messages of
    /// the session may keep extending it.
    pub fn commit_auth_exchange(&mut self, encapsulated: bool, transcript: ManagedBufferAuth) {
        if encapsulated {
            self.runtime_info.message_encap_auth = transcript;
        } else {
            self.runtime_info.message_auth = transcript;
        }
    }

    pub fn auth_transcript(&self, encapsulated: bool) -> &ManagedBufferAuth {
        if encapsulated {
            &self.runtime_info.message_encap_auth
        } else {
            &self.runtime_info.message_auth
        }
    }

    pub fn append_auth_transcript(
        &mut self,
        encapsulated: bool,
        bytes: &[u8],
    ) -> AttestResult {
        let transcript = if encapsulated {
            &mut self.runtime_info.message_encap_auth
        } else {
            &mut self.runtime_info.message_auth
        };
        transcript
            .append_message(bytes)
            .ok_or::<AttestStatus>(ATTEST_STATUS_BUFFER_FULL)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_managed_buffer_append_and_reset() {
        let mut buffer = ManagedBufferAuth::default();
        assert_eq!(buffer.append_message(&[1, 2, 3]), Some(3));
        assert_eq!(buffer.append_message(&[4]), Some(1));
        assert_eq!(buffer.as_ref(), &[1, 2, 3, 4]);
        buffer.reset_message();
        assert_eq!(buffer.as_ref().len(), 0);
    }

    #[test]
    fn test_managed_buffer_overflow() {
        let mut buffer = ManagedBufferAuth::default();
        let chunk = [0u8; MAX_MANAGED_BUFFER_AUTH_SIZE];
        assert!(buffer.append_message(&chunk).is_some());
        assert!(buffer.append_message(&[0u8]).is_none());
        // a failed append must not change the contents
        assert_eq!(buffer.as_ref().len(), MAX_MANAGED_BUFFER_AUTH_SIZE);
    }

    #[test]
    fn test_auth_transcript_exchange_lifecycle() {
        let mut context =
            AttestContext::new(AttestConfigInfo::default(), AttestProvisionInfo::default())
                .unwrap();

        let mut transcript = context.begin_auth_exchange(false);
        transcript.append_message(&[1, 2]).unwrap();
        context.commit_auth_exchange(false, transcript);
        assert_eq!(context.auth_transcript(false).as_ref(), &[1, 2]);

        // the session may keep extending a committed transcript
        context.append_auth_transcript(false, &[3]).unwrap();
        assert_eq!(context.auth_transcript(false).as_ref(), &[1, 2, 3]);

        // the encapsulated exchange accumulates independently
        assert!(context.auth_transcript(true).as_ref().is_empty());

        // a new exchange starts from nothing
        let transcript = context.begin_auth_exchange(false);
        assert!(transcript.as_ref().is_empty());
        assert!(context.auth_transcript(false).as_ref().is_empty());
    }

    #[test]
    fn test_context_rejects_oversized_slot_count() {
        let mut provision_info = AttestProvisionInfo::default();
        provision_info.slot_count = (MAX_SLOT_COUNT + 1) as u8;
        assert!(AttestContext::new(AttestConfigInfo::default(), provision_info).is_err());
    }

    #[test]
    fn test_version_selection_prefers_newer() {
        let mut config_info = AttestConfigInfo::default();
        config_info.version = [
            Some(AttestVersion::AttestVersion10),
            Some(AttestVersion::AttestVersion11),
        ];
        let context =
            AttestContext::new(config_info, AttestProvisionInfo::default()).unwrap();
        assert_eq!(
            context.select_challenge_auth_version(),
            AttestVersion::AttestVersion11
        );
    }

    #[test]
    fn test_version_selection_falls_back() {
        let mut config_info = AttestConfigInfo::default();
        config_info.version = [Some(AttestVersion::AttestVersion10), None];
        let context =
            AttestContext::new(config_info, AttestProvisionInfo::default()).unwrap();
        assert_eq!(
            context.select_challenge_auth_version(),
            AttestVersion::AttestVersion10
        );
    }
}
