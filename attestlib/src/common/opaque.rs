// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::{AttestCodec, AttestContext};
use crate::error::{AttestStatus, ATTEST_STATUS_BUFFER_FULL};
use codec::{Codec, Reader, Writer};

/// Vendor-defined bytes carried in a challenge-auth response without any
/// protocol-defined structure.
pub const MAX_OPAQUE_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy)]
pub struct AttestOpaqueStruct {
    pub data_size: u16,
    pub data: [u8; MAX_OPAQUE_SIZE],
}

impl Default for AttestOpaqueStruct {
    fn default() -> AttestOpaqueStruct {
        AttestOpaqueStruct {
            data_size: 0,
            data: [0u8; MAX_OPAQUE_SIZE],
        }
    }
}

impl AsRef<[u8]> for AttestOpaqueStruct {
    fn as_ref(&self) -> &[u8] {
        &self.data[0..(self.data_size as usize)]
    }
}

impl From<&[u8]> for AttestOpaqueStruct {
    fn from(value: &[u8]) -> Self {
        assert!(value.len() <= MAX_OPAQUE_SIZE);
        let mut data = [0u8; MAX_OPAQUE_SIZE];
        data[0..value.len()].copy_from_slice(value);
        AttestOpaqueStruct {
            data_size: value.len() as u16,
            data,
        }
    }
}

impl AttestCodec for AttestOpaqueStruct {
    fn attest_encode(
        &self,
        _context: &mut AttestContext,
        bytes: &mut Writer,
    ) -> Result<usize, AttestStatus> {
        let mut cnt = 0usize;
        cnt += self
            .data_size
            .encode(bytes)
            .map_err(|_| ATTEST_STATUS_BUFFER_FULL)?;
        cnt += bytes
            .extend_from_slice(&self.data[..(self.data_size as usize)])
            .ok_or(ATTEST_STATUS_BUFFER_FULL)?;
        Ok(cnt)
    }

    fn attest_read(_context: &mut AttestContext, r: &mut Reader) -> Option<AttestOpaqueStruct> {
        let data_size = u16::read(r)?;
        if data_size as usize > MAX_OPAQUE_SIZE {
            return None;
        }
        let mut data = [0u8; MAX_OPAQUE_SIZE];
        data[..(data_size as usize)].copy_from_slice(r.take(data_size as usize)?);
        Some(AttestOpaqueStruct { data_size, data })
    }
}
