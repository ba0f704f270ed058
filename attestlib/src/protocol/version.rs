// SPDX-License-Identifier: Apache-2.0 or MIT

use codec::enum_builder;
use codec::{Codec, Reader, Writer};

pub const MAX_VERSION_COUNT: usize = 2;

enum_builder! {
    @U8
    EnumName: AttestVersion;
    EnumVal{
        AttestVersion10 => 0x10,
        AttestVersion11 => 0x11
    }
}
impl Default for AttestVersion {
    fn default() -> AttestVersion {
        AttestVersion::AttestVersion10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_wire_values() {
        assert_eq!(AttestVersion::AttestVersion10.get_u8(), 0x10);
        assert_eq!(AttestVersion::AttestVersion11.get_u8(), 0x11);
    }

    #[test]
    fn test_version_read_unknown() {
        let mut reader = Reader::init(&[0x13u8]);
        assert_eq!(
            AttestVersion::read(&mut reader).unwrap(),
            AttestVersion::Unknown(0x13)
        );
    }
}
