// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::AttestContext;
use crate::error::{AttestResult, AttestStatus, ATTEST_STATUS_BUFFER_FULL};
use crate::protocol::{AttestDigestStruct, AttestSignatureStruct};
use codec::{Reader, Writer};
use core::fmt::Debug;
extern crate alloc;
use alloc::boxed::Box;

/// Codec for fields whose wire length is not self-describing but fixed by
/// the session's negotiated algorithms.
pub trait AttestCodec: Debug + Sized {
    /// Encode yourself by appending onto `bytes`.
    /// Return Ok(encoded size) or Err(AttestStatus).
    fn attest_encode(&self, _context: &mut AttestContext, _bytes: &mut Writer)
        -> AttestResult<usize>;

    /// Decode yourself by fiddling with the `Reader`.
    /// Return Some if it worked, None if not.
    fn attest_read(_context: &mut AttestContext, _: &mut Reader) -> Option<Self>;

    /// Read one of these from the front of `bytes` and return it.
    fn attest_read_bytes(context: &mut AttestContext, bytes: &[u8]) -> Option<Self> {
        let mut rd = Reader::init(bytes);
        Self::attest_read(context, &mut rd)
    }
}

impl AttestCodec for AttestDigestStruct {
    fn attest_encode(
        &self,
        context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> Result<usize, AttestStatus> {
        assert_eq!(self.data_size, context.get_hash_size());
        bytes
            .extend_from_slice(&self.data[..(self.data_size as usize)])
            .ok_or(ATTEST_STATUS_BUFFER_FULL)?;
        Ok(self.data_size as usize)
    }

    fn attest_read(context: &mut AttestContext, r: &mut Reader) -> Option<AttestDigestStruct> {
        let data_size = context.get_hash_size();
        let mut data = Box::new([0u8; crate::protocol::ATTEST_MAX_HASH_SIZE]);
        data[..(data_size as usize)].copy_from_slice(r.take(data_size as usize)?);
        Some(AttestDigestStruct { data_size, data })
    }
}

impl AttestCodec for AttestSignatureStruct {
    fn attest_encode(
        &self,
        context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> Result<usize, AttestStatus> {
        assert_eq!(self.data_size, context.get_asym_key_size());
        bytes
            .extend_from_slice(&self.data[..(self.data_size as usize)])
            .ok_or(ATTEST_STATUS_BUFFER_FULL)?;
        Ok(self.data_size as usize)
    }

    fn attest_read(context: &mut AttestContext, r: &mut Reader) -> Option<AttestSignatureStruct> {
        let data_size = context.get_asym_key_size();
        let mut data = [0u8; crate::protocol::ATTEST_MAX_ASYM_KEY_SIZE];
        data[..(data_size as usize)].copy_from_slice(r.take(data_size as usize)?);
        Some(AttestSignatureStruct { data_size, data })
    }
}
