//! Byte cursor used by schema decode functions.
//!
//! A [`Cursor`] borrows the payload and tracks a read offset. Every read is
//! atomic: it either consumes exactly the bytes it needs and advances the
//! offset, or fails with [`DecodeError::OutOfBounds`] and leaves the offset
//! untouched.

use borsh::BorshDeserialize;
use solana_pubkey::Pubkey;

use crate::{
    error::{DecodeError, Result},
    primitives::Primitive,
};

/// Sequential reader over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `buf`. No copy is made.
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Current read position.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// True once every byte has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offset >= self.buf.len()
    }

    /// Unread bytes, without advancing.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    /// Borrow the next `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(DecodeError::OutOfBounds {
                offset: self.offset,
                needed: n,
                len: self.buf.len(),
            })?;
        let bytes = &self.buf[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    /// Read the next `N` bytes into an array.
    #[inline]
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Advance past `n` bytes without reading them.
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    /// Read one primitive value.
    #[inline]
    pub fn read<T: Primitive>(&mut self) -> Result<T> {
        T::read(self)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read()
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read()
    }

    #[inline]
    pub fn read_u128(&mut self) -> Result<u128> {
        self.read()
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read()
    }

    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read()
    }

    /// Read a 32-byte public key. Its `Display` form is base58.
    #[inline]
    pub fn read_pubkey(&mut self) -> Result<Pubkey> {
        self.read()
    }

    /// Read a `u32` length-prefixed UTF-8 string.
    #[inline]
    pub fn read_string(&mut self) -> Result<String> {
        self.read()
    }

    /// Read a composite value (options, vectors, nested structs) with borsh.
    ///
    /// Advances by exactly the number of bytes borsh consumed. On failure the
    /// offset is left where it was.
    pub fn read_borsh<T: BorshDeserialize>(&mut self) -> Result<T> {
        let mut rest = self.rest();
        let before = rest.len();
        let value = T::deserialize(&mut rest).map_err(|err| DecodeError::Borsh {
            offset: self.offset,
            message: err.to_string(),
        })?;
        self.offset += before - rest.len();
        Ok(value)
    }
}
