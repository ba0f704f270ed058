// In the rustls lineage <https://github.com/rustls/rustls>
//
// SPDX-License-Identifier: Apache-2.0 or MIT

/// Define a wire enum with a catch-all `Unknown` variant and a `Codec` impl.
#[macro_export]
macro_rules! enum_builder {
    (
    $(#[$comment:meta])*
    @U8
        EnumName: $enum_name: ident;
        EnumVal { $( $enum_var: ident => $enum_val: expr ),* }
    ) => {
        $(#[$comment])*
        #[derive(Debug, PartialEq, Eq, Clone, Copy)]
        pub enum $enum_name {
            $( $enum_var),*
            ,Unknown(u8)
        }
        impl $enum_name {
            pub fn get_u8(&self) -> u8 {
                match *self {
                    $( $enum_name::$enum_var => $enum_val),*
                    ,$enum_name::Unknown(x) => x
                }
            }
        }
        impl Codec for $enum_name {
            fn encode(&self, bytes: &mut Writer) -> Result<usize, $crate::codec::EncodeErr> {
                self.get_u8().encode(bytes)
            }

            fn read(r: &mut Reader) -> Option<Self> {
                Some(match u8::read(r) {
                    None => return None,
                    $( Some($enum_val) => $enum_name::$enum_var),*
                    ,Some(x) => $enum_name::Unknown(x)
                })
            }
        }
    };
}
