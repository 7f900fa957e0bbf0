#![forbid(unsafe_code)]

//! The scanline reconstruction engine.
//!
//! Decompressed PNG image data is a series of filtered scanlines, each one a
//! filter byte followed by `width * bytes_per_pixel` filtered bytes. The
//! filters predict each byte from already-reconstructed neighbors, so
//! reversing them means adding the predictor back, modulo 256, while reading
//! neighbors out of the *output* buffer rather than the filtered input.

use alloc::vec::Vec;

use crate::{ImageHeader, PngError, PngResult};

/// The per-scanline filter that was applied when the image was encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterKind {
  /// Bytes are stored as-is.
  #[default]
  None = 0,
  /// Each byte is predicted by the byte one pixel to the left.
  Sub = 1,
  /// Each byte is predicted by the byte one scanline up.
  Up = 2,
  /// Each byte is predicted by the floored average of left and up.
  Average = 3,
  /// Each byte is predicted by [`paeth_predict`] over left, up, and up-left.
  Paeth = 4,
}
impl TryFrom<u8> for FilterKind {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> PngResult<Self> {
    Ok(match value {
      0 => FilterKind::None,
      1 => FilterKind::Sub,
      2 => FilterKind::Up,
      3 => FilterKind::Average,
      4 => FilterKind::Paeth,
      _ => return Err(PngError::IllegalFilterByte),
    })
  }
}

/// The Paeth predictor: whichever of `a` (left), `b` (up), `c` (up-left) is
/// closest to `a + b - c`.
///
/// The arithmetic is widened to `i32` because the intermediate values can
/// exceed a byte in both directions. Ties resolve to `a`, then `b`, then
/// `c`. The PNG spec is extremely specific that this order must not change,
/// and ties are common at image edges.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// The growing output buffer plus bounds-checked neighbor reads.
///
/// All neighbor lookups are relative to the next byte to be written and
/// return 0 whenever the reference would cross the left edge of the current
/// scanline or the top edge of the image.
struct ReconBuffer {
  bytes: Vec<u8>,
  stride: usize,
  bpp: usize,
}
impl ReconBuffer {
  #[inline]
  fn push(&mut self, byte: u8) {
    self.bytes.push(byte);
  }
  /// The reconstructed byte one pixel to the left, or 0 at the left edge.
  #[inline]
  fn left(&self) -> u8 {
    let i = self.bytes.len();
    if i % self.stride >= self.bpp {
      self.bytes[i - self.bpp]
    } else {
      0
    }
  }
  /// The reconstructed byte one scanline up, or 0 on the first row.
  #[inline]
  fn up(&self) -> u8 {
    let i = self.bytes.len();
    if i >= self.stride {
      self.bytes[i - self.stride]
    } else {
      0
    }
  }
  /// The reconstructed byte one scanline up and one pixel left, or 0 when
  /// either edge condition holds.
  #[inline]
  fn up_left(&self) -> u8 {
    let i = self.bytes.len();
    if i % self.stride >= self.bpp && i >= self.stride {
      self.bytes[i - self.stride - self.bpp]
    } else {
      0
    }
  }
}

/// Reverses the scanline filtering of one decompressed image payload.
///
/// `filtered` is consumed as complete `1 + width * bytes_per_pixel` records;
/// trailing bytes that don't form a complete scanline are ignored. The
/// returned buffer holds the recovered pixel bytes in channel order with the
/// filter bytes stripped.
///
/// ## Failure
/// * [`UnsupportedFormat`](PngError::UnsupportedFormat) before anything else
///   when the header isn't 8-bit truecolor with or without alpha.
/// * [`IllegalFilterByte`](PngError::IllegalFilterByte) when a scanline's
///   filter byte isn't in `0..=4`.
pub fn unfilter_scanlines(header: ImageHeader, filtered: &[u8]) -> PngResult<Vec<u8>> {
  let bpp = header.bytes_per_pixel()?;
  let stride = (header.width as usize) * bpp;
  let mut recon = ReconBuffer { bytes: Vec::with_capacity(filtered.len()), stride, bpp };
  for line in filtered.chunks_exact(1 + stride) {
    let [filter_byte, raw @ ..] = line else { continue };
    let filter = FilterKind::try_from(*filter_byte)?;
    for &byte in raw {
      let predictor: u8 = match filter {
        FilterKind::None => 0,
        FilterKind::Sub => recon.left(),
        FilterKind::Up => recon.up(),
        FilterKind::Average => (((recon.left() as u32) + (recon.up() as u32)) / 2) as u8,
        FilterKind::Paeth => paeth_predict(recon.left(), recon.up(), recon.up_left()),
      };
      recon.push(byte.wrapping_add(predictor));
    }
  }
  Ok(recon.bytes)
}
