#![forbid(unsafe_code)]

//! The raw layer of the PNG container: the signature and the chunk stream.
//!
//! A PNG datastream is the 8-byte signature followed by a series of chunks.
//! Each chunk is a big-endian `u32` length, a 4-byte ASCII type tag, that
//! many payload bytes, and a 4-byte CRC trailer. This decoder reads the
//! trailer but never verifies it.

use core::fmt::{Debug, Write};

use crate::{try_split_off_byte_array, u32_be};

/// The first eight bytes of any PNG datastream.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the bytes open with the PNG signature.
///
/// If they don't, the rest of the bytes are very likely not PNG data.
#[inline]
#[must_use]
pub const fn is_png_signature(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// A chunk's 4-byte ASCII type tag.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkTy {
  /// Image header.
  pub const IHDR: Self = Self(*b"IHDR");
  /// Compressed image data.
  pub const IDAT: Self = Self(*b"IDAT");
  /// End of the datastream.
  pub const IEND: Self = Self(*b"IEND");
  /// Embedded ICC color profile. Must come before the image data.
  pub const iCCP: Self = Self(*b"iCCP");
}
impl Debug for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// An unparsed chunk pulled out of the datastream.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawChunk<'b> {
  pub(crate) ty: ChunkTy,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl<'b> RawChunk<'b> {
  /// The chunk's type tag.
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkTy {
    self.ty
  }
  /// The chunk's payload.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC the chunk declares for itself. Never checked by this crate.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
}
impl Debug for RawChunk<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// An iterator producing successive raw chunks from PNG bytes.
///
/// A truncated trailing chunk simply ends the iteration. Garbage input can
/// give garbage chunks, but never a panic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct RawChunkIter<'b>(&'b [u8]);
impl<'b> RawChunkIter<'b> {
  /// Pass the full PNG bytes, the 8-byte signature is skipped automatically.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self(rest),
      _ => Self(&[]),
    }
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = RawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let (len_bytes, rest) = try_split_off_byte_array::<4>(self.0)?;
    let chunk_len = u32_be(len_bytes) as usize;
    let (ty_bytes, rest) = try_split_off_byte_array::<4>(rest)?;
    if rest.len() < chunk_len {
      return None;
    }
    let (data, rest) = rest.split_at(chunk_len);
    let (crc_bytes, rest) = try_split_off_byte_array::<4>(rest)?;
    self.0 = rest;
    Some(RawChunk { ty: ChunkTy(ty_bytes), data, declared_crc: u32_be(crc_bytes) })
  }
}
