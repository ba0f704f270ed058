// SPDX-License-Identifier: Apache-2.0 or MIT

use codec::{Codec, Reader, Writer};

bitflags! {
    #[derive(Default)]
    pub struct AttestRequestCapabilityFlags: u32 {
        const CERT_CAP = 0b0000_0010;
        const CHAL_CAP = 0b0000_0100;
        const MUT_AUTH_CAP = 0b0000_0001_0000_0000;
        const ENCAP_CAP = 0b0001_0000_0000_0000;
        const VALID_MASK = Self::CERT_CAP.bits
            | Self::CHAL_CAP.bits
            | Self::MUT_AUTH_CAP.bits
            | Self::ENCAP_CAP.bits;
    }
}

impl Codec for AttestRequestCapabilityFlags {
    fn encode(&self, bytes: &mut Writer) -> Result<usize, codec::EncodeErr> {
        self.bits().encode(bytes)
    }

    fn read(r: &mut Reader) -> Option<AttestRequestCapabilityFlags> {
        let bits = u32::read(r)?;
        AttestRequestCapabilityFlags::from_bits(
            bits & AttestRequestCapabilityFlags::VALID_MASK.bits,
        )
    }
}

bitflags! {
    #[derive(Default)]
    pub struct AttestResponseCapabilityFlags: u32 {
        const CERT_CAP = 0b0000_0010;
        const CHAL_CAP = 0b0000_0100;
        const MEAS_CAP = 0b0001_0000;
        const MUT_AUTH_CAP = 0b0000_0001_0000_0000;
        const ENCAP_CAP = 0b0001_0000_0000_0000;
        const VALID_MASK = Self::CERT_CAP.bits
            | Self::CHAL_CAP.bits
            | Self::MEAS_CAP.bits
            | Self::MUT_AUTH_CAP.bits
            | Self::ENCAP_CAP.bits;
    }
}

impl Codec for AttestResponseCapabilityFlags {
    fn encode(&self, bytes: &mut Writer) -> Result<usize, codec::EncodeErr> {
        self.bits().encode(bytes)
    }

    fn read(r: &mut Reader) -> Option<AttestResponseCapabilityFlags> {
        let bits = u32::read(r)?;
        AttestResponseCapabilityFlags::from_bits(
            bits & AttestResponseCapabilityFlags::VALID_MASK.bits,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_flags_round_trip() {
        let flags =
            AttestResponseCapabilityFlags::CHAL_CAP | AttestResponseCapabilityFlags::CERT_CAP;
        let buf = &mut [0u8; 4];
        let mut writer = Writer::init(buf);
        assert!(flags.encode(&mut writer).is_ok());
        let mut reader = Reader::init(buf);
        assert_eq!(
            AttestResponseCapabilityFlags::read(&mut reader).unwrap(),
            flags
        );
    }

    #[test]
    fn test_capability_flags_reserved_bits_dropped() {
        let buf = &mut [0u8; 4];
        let mut writer = Writer::init(buf);
        (AttestRequestCapabilityFlags::CHAL_CAP.bits | 0x8000_0000u32)
            .encode(&mut writer)
            .unwrap();
        let mut reader = Reader::init(buf);
        assert_eq!(
            AttestRequestCapabilityFlags::read(&mut reader).unwrap(),
            AttestRequestCapabilityFlags::CHAL_CAP
        );
    }
}
