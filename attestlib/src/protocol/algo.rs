// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::config;
use codec::{Codec, Reader, Writer};
extern crate alloc;
use alloc::boxed::Box;

pub const SHA256_DIGEST_SIZE: usize = 32;
pub const SHA384_DIGEST_SIZE: usize = 48;
pub const SHA512_DIGEST_SIZE: usize = 64;

pub const RSASSA_2048_KEY_SIZE: usize = 256;
pub const RSASSA_3072_KEY_SIZE: usize = 384;
pub const RSASSA_4096_KEY_SIZE: usize = 512;

pub const ECDSA_ECC_NIST_P256_KEY_SIZE: usize = 32 * 2;
pub const ECDSA_ECC_NIST_P384_KEY_SIZE: usize = 48 * 2;

pub const ATTEST_NONCE_SIZE: usize = 32;
pub const ATTEST_MAX_HASH_SIZE: usize = 64;
pub const ATTEST_MAX_ASYM_KEY_SIZE: usize = 512;

bitflags! {
    #[derive(Default)]
    pub struct AttestBaseHashAlgo: u32 {
        const SHA_256 = 0b0000_0001;
        const SHA_384 = 0b0000_0010;
        const SHA_512 = 0b0000_0100;
        const VALID_MASK = Self::SHA_256.bits
            | Self::SHA_384.bits
            | Self::SHA_512.bits;
    }
}

impl AttestBaseHashAlgo {
    /// Digest length in bytes for the selected algorithm; 0 when unset.
    pub fn get_size(&self) -> u16 {
        match *self {
            AttestBaseHashAlgo::SHA_256 => SHA256_DIGEST_SIZE as u16,
            AttestBaseHashAlgo::SHA_384 => SHA384_DIGEST_SIZE as u16,
            AttestBaseHashAlgo::SHA_512 => SHA512_DIGEST_SIZE as u16,
            _ => 0,
        }
    }
}

impl Codec for AttestBaseHashAlgo {
    fn encode(&self, bytes: &mut Writer) -> Result<usize, codec::EncodeErr> {
        self.bits().encode(bytes)
    }

    fn read(r: &mut Reader) -> Option<AttestBaseHashAlgo> {
        let bits = u32::read(r)?;
        AttestBaseHashAlgo::from_bits(bits & AttestBaseHashAlgo::VALID_MASK.bits)
    }
}

bitflags! {
    #[derive(Default)]
    pub struct AttestBaseAsymAlgo: u32 {
        const RSASSA_2048 = 0b0000_0001;
        const RSASSA_3072 = 0b0000_0010;
        const RSASSA_4096 = 0b0000_0100;
        const ECDSA_ECC_NIST_P256 = 0b0000_1000;
        const ECDSA_ECC_NIST_P384 = 0b0001_0000;
        const VALID_MASK = Self::RSASSA_2048.bits
            | Self::RSASSA_3072.bits
            | Self::RSASSA_4096.bits
            | Self::ECDSA_ECC_NIST_P256.bits
            | Self::ECDSA_ECC_NIST_P384.bits;
    }
}

impl AttestBaseAsymAlgo {
    /// Signature length in bytes for the selected algorithm; 0 when unset.
    pub fn get_size(&self) -> u16 {
        match *self {
            AttestBaseAsymAlgo::RSASSA_2048 => RSASSA_2048_KEY_SIZE as u16,
            AttestBaseAsymAlgo::RSASSA_3072 => RSASSA_3072_KEY_SIZE as u16,
            AttestBaseAsymAlgo::RSASSA_4096 => RSASSA_4096_KEY_SIZE as u16,
            AttestBaseAsymAlgo::ECDSA_ECC_NIST_P256 => ECDSA_ECC_NIST_P256_KEY_SIZE as u16,
            AttestBaseAsymAlgo::ECDSA_ECC_NIST_P384 => ECDSA_ECC_NIST_P384_KEY_SIZE as u16,
            _ => 0,
        }
    }
}

impl Codec for AttestBaseAsymAlgo {
    fn encode(&self, bytes: &mut Writer) -> Result<usize, codec::EncodeErr> {
        self.bits().encode(bytes)
    }

    fn read(r: &mut Reader) -> Option<AttestBaseAsymAlgo> {
        let bits = u32::read(r)?;
        AttestBaseAsymAlgo::from_bits(bits & AttestBaseAsymAlgo::VALID_MASK.bits)
    }
}

pub const MAX_SLOT_COUNT: usize = 8;

/// Wire value in a request's slot field meaning "use the provisioned
/// identity" instead of a concrete slot index.
pub const PROVISIONED_SLOT_SENTINEL: u8 = 0xFF;

// The response attribute field keeps the slot id in 4 bits; the slot table
// must never be able to outgrow it.
const _: () = assert!(MAX_SLOT_COUNT <= 16);

/// A requested identity slot. The sentinel wire value is kept out of the
/// index value space; conversion happens only at codec boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSelector {
    Explicit(u8),
    Provisioned,
}

impl SlotSelector {
    pub fn from_wire(value: u8) -> SlotSelector {
        if value == PROVISIONED_SLOT_SENTINEL {
            SlotSelector::Provisioned
        } else {
            SlotSelector::Explicit(value)
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            SlotSelector::Explicit(index) => index,
            SlotSelector::Provisioned => PROVISIONED_SLOT_SENTINEL,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttestNonceStruct {
    pub data: [u8; ATTEST_NONCE_SIZE],
}

impl Codec for AttestNonceStruct {
    fn encode(&self, bytes: &mut Writer) -> Result<usize, codec::EncodeErr> {
        bytes
            .extend_from_slice(&self.data)
            .ok_or(codec::EncodeErr)?;
        Ok(ATTEST_NONCE_SIZE)
    }

    fn read(r: &mut Reader) -> Option<AttestNonceStruct> {
        let mut data = [0u8; ATTEST_NONCE_SIZE];
        data.copy_from_slice(r.take(ATTEST_NONCE_SIZE)?);
        Some(AttestNonceStruct { data })
    }
}

#[derive(Debug, Clone)]
pub struct AttestDigestStruct {
    pub data_size: u16,
    pub data: Box<[u8; ATTEST_MAX_HASH_SIZE]>,
}

impl Default for AttestDigestStruct {
    fn default() -> AttestDigestStruct {
        AttestDigestStruct {
            data_size: 0,
            data: Box::new([0u8; ATTEST_MAX_HASH_SIZE]),
        }
    }
}

impl AsRef<[u8]> for AttestDigestStruct {
    fn as_ref(&self) -> &[u8] {
        &self.data[0..(self.data_size as usize)]
    }
}

impl From<&[u8]> for AttestDigestStruct {
    fn from(value: &[u8]) -> Self {
        assert!(value.len() <= ATTEST_MAX_HASH_SIZE);
        let mut data = Box::new([0u8; ATTEST_MAX_HASH_SIZE]);
        data[0..value.len()].copy_from_slice(value);
        AttestDigestStruct {
            data_size: value.len() as u16,
            data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttestSignatureStruct {
    pub data_size: u16,
    pub data: [u8; ATTEST_MAX_ASYM_KEY_SIZE],
}

impl Default for AttestSignatureStruct {
    fn default() -> AttestSignatureStruct {
        AttestSignatureStruct {
            data_size: 0,
            data: [0u8; ATTEST_MAX_ASYM_KEY_SIZE],
        }
    }
}

impl AsRef<[u8]> for AttestSignatureStruct {
    fn as_ref(&self) -> &[u8] {
        &self.data[0..(self.data_size as usize)]
    }
}

impl From<&[u8]> for AttestSignatureStruct {
    fn from(value: &[u8]) -> Self {
        assert!(value.len() <= ATTEST_MAX_ASYM_KEY_SIZE);
        let mut data = [0u8; ATTEST_MAX_ASYM_KEY_SIZE];
        data[0..value.len()].copy_from_slice(value);
        AttestSignatureStruct {
            data_size: value.len() as u16,
            data,
        }
    }
}

/// One provisioned certificate chain in wire form. Parsing the chain is the
/// credential store's concern, not this library's.
#[derive(Debug, Clone)]
pub struct AttestCertChainData {
    pub data_size: u16,
    pub data: [u8; config::MAX_CERT_CHAIN_DATA_SIZE],
}

impl Default for AttestCertChainData {
    fn default() -> Self {
        AttestCertChainData {
            data_size: 0u16,
            data: [0u8; config::MAX_CERT_CHAIN_DATA_SIZE],
        }
    }
}

impl AsRef<[u8]> for AttestCertChainData {
    fn as_ref(&self) -> &[u8] {
        &self.data[0..(self.data_size as usize)]
    }
}

impl From<&[u8]> for AttestCertChainData {
    fn from(value: &[u8]) -> Self {
        assert!(value.len() <= config::MAX_CERT_CHAIN_DATA_SIZE);
        let mut data = [0u8; config::MAX_CERT_CHAIN_DATA_SIZE];
        data[0..value.len()].copy_from_slice(value);
        AttestCertChainData {
            data_size: value.len() as u16,
            data,
        }
    }
}
