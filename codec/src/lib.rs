// SPDX-License-Identifier: Apache-2.0 or MIT

#![forbid(unsafe_code)]
#![no_std]

pub mod codec;
pub use crate::codec::*;

#[allow(unused_macros)]
#[macro_use]
pub mod macros;

#[cfg(test)]
mod tests {
    use crate::{Codec, Reader, Writer};

    enum_builder! {
        @U8
        EnumName: OpCode;
        EnumVal{
            Ping => 0x1,
            Pong => 0x2
        }
    }

    #[test]
    fn enum_round_trip() {
        let buf = &mut [0u8; 2];
        let mut writer = Writer::init(buf);
        assert!(OpCode::Pong.encode(&mut writer).is_ok());
        let mut reader = Reader::init(buf);
        assert_eq!(OpCode::Pong, OpCode::read(&mut reader).unwrap());
    }

    #[test]
    fn enum_unknown_value() {
        let mut reader = Reader::init(&[0x7fu8]);
        assert_eq!(OpCode::Unknown(0x7f), OpCode::read(&mut reader).unwrap());
    }
}
