#![forbid(unsafe_code)]

//! The decoded image: header plus the flat pixel buffer.

use alloc::vec::Vec;

use crate::{
  decoder::decode_png_bytes,
  pixels::{RGB8, RGBA8},
  ColorType, ImageHeader, PngResult,
};

/// A fully decoded PNG: the parsed header and the unfiltered pixel bytes.
///
/// The buffer is `height` scanlines of `width * bytes_per_pixel` bytes, top
/// row first, channels in R, G, B(, A) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
  ihdr: ImageHeader,
  data: Vec<u8>,
}

impl DecodedImage {
  #[inline]
  pub(crate) fn new(ihdr: ImageHeader, data: Vec<u8>) -> Self {
    Self { ihdr, data }
  }

  /// Reads the file at `path` and decodes it.
  ///
  /// The file handle is scoped to the read itself; it's released before
  /// decoding starts, on success and failure both.
  #[cfg(feature = "std")]
  #[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
  pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> PngResult<Self> {
    let bytes = std::fs::read(path).map_err(|e| crate::PngError::Io(e.kind()))?;
    decode_png_bytes(&bytes)
  }

  /// Decodes an in-memory PNG datastream.
  #[inline]
  pub fn from_bytes(bytes: &[u8]) -> PngResult<Self> {
    decode_png_bytes(bytes)
  }

  /// A copy of the parsed header.
  #[inline]
  #[must_use]
  pub const fn header(&self) -> ImageHeader {
    self.ihdr
  }

  /// The flat pixel bytes.
  #[inline]
  #[must_use]
  pub fn image_data(&self) -> &[u8] {
    &self.data
  }

  /// Consumes the image, giving out the pixel buffer.
  #[inline]
  #[must_use]
  pub fn into_image_data(self) -> Vec<u8> {
    self.data
  }

  /// `true` only when *both* dimensions equal the parsed header's exactly.
  #[inline]
  #[must_use]
  pub const fn matches_dimensions(&self, width: u32, height: u32) -> bool {
    self.ihdr.width == width && self.ihdr.height == height
  }

  /// Views the buffer as RGB pixels, when the image is truecolor without
  /// alpha and the buffer length divides evenly.
  #[inline]
  #[must_use]
  pub fn pixels_rgb(&self) -> Option<&[RGB8]> {
    if self.ihdr.color_type == ColorType::Truecolor {
      bytemuck::try_cast_slice(self.data.as_slice()).ok()
    } else {
      None
    }
  }

  /// Views the buffer as RGBA pixels, when the image is truecolor with
  /// alpha and the buffer length divides evenly.
  #[inline]
  #[must_use]
  pub fn pixels_rgba(&self) -> Option<&[RGBA8]> {
    if self.ihdr.color_type == ColorType::TruecolorAlpha {
      bytemuck::try_cast_slice(self.data.as_slice()).ok()
    } else {
      None
    }
  }

  /// Flips the image top to bottom, in place.
  ///
  /// The swap walks each scanline in fixed four-byte steps regardless of the
  /// actual pixel size. For RGBA data that's an exact row swap. For RGB data
  /// the four-byte groups cross pixel and scanline boundaries, so the result
  /// is *not* a clean flip. This is a known limitation kept for
  /// compatibility, not a feature. Steps that would run past the end of the
  /// buffer are skipped. Calling twice on an even-height RGBA image restores
  /// the original; an odd height leaves the middle row untouched.
  pub fn vertical_flip(&mut self) {
    let bpp = match self.ihdr.bytes_per_pixel() {
      Ok(bpp) => bpp,
      Err(_) => return,
    };
    let stride = (self.ihdr.width as usize) * bpp;
    let height = self.ihdr.height as usize;
    let mid = height / 2;
    let len = self.data.len();
    let mut i = height;
    while i > mid {
      let early = stride * (height - i);
      let late = stride * (i - 1);
      let mut j = 0;
      while j < stride {
        for k in 0..4 {
          let e = early + j + k;
          let l = late + j + k;
          if e < len && l < len {
            self.data.swap(e, l);
          }
        }
        j += 4;
      }
      i -= 1;
    }
  }
}
