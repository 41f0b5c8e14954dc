//! Fixed-layout primitive decoders.
//!
//! All multi-byte integers are little-endian. Sizes:
//!
//! | Type | Bytes |
//! |---|---|
//! | `u8`, `i8`, `bool` | 1 |
//! | `u16`, `i16` | 2 |
//! | `u32`, `i32` | 4 |
//! | `u64`, `i64` | 8 |
//! | `u128`, `i128` | 16 |
//! | `Pubkey` | 32 |
//! | `[u8; N]` | N |
//! | `String` | 4 + length prefix |

use solana_pubkey::Pubkey;

use crate::{
    cursor::Cursor,
    error::{DecodeError, Result},
};

/// A value with a fixed wire layout that can be read from a [`Cursor`].
pub trait Primitive: Sized {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self>;
}

macro_rules! impl_le_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Primitive for $ty {
                #[inline]
                fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
                    cursor.take_array().map(<$ty>::from_le_bytes)
                }
            }
        )*
    };
}

impl_le_primitive!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

/// Any nonzero byte is `true`.
impl Primitive for bool {
    #[inline]
    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(cursor.read::<u8>()? != 0)
    }
}

impl<const N: usize> Primitive for [u8; N] {
    #[inline]
    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.take_array()
    }
}

impl Primitive for Pubkey {
    #[inline]
    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.take_array().map(Pubkey::new_from_array)
    }
}

/// `u32` byte length followed by that many bytes of UTF-8. Invalid UTF-8 is
/// rejected, and the cursor is only advanced once the whole field decoded.
impl Primitive for String {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let mut probe = cursor.clone();
        let len = probe.read::<u32>()? as usize;
        let text_offset = probe.offset();
        let bytes = probe.take(len)?;
        let text = std::str::from_utf8(bytes)
            .map_err(|_| DecodeError::InvalidUtf8 {
                offset: text_offset,
            })?
            .to_owned();
        *cursor = probe;
        Ok(text)
    }
}
