#![forbid(unsafe_code)]

//! The image header: dimensions and pixel format, parsed once from `IHDR`.

use crate::{PngError, PngResult};

/// The color interpretations that PNG defines.
///
/// All five values parse, but the reconstruction engine only accepts
/// [`Truecolor`](ColorType::Truecolor) and
/// [`TruecolorAlpha`](ColorType::TruecolorAlpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ColorType {
  /// Greyscale.
  Grayscale = 0,
  /// Red, Green, Blue.
  Truecolor = 2,
  /// Index into a palette.
  Indexed = 3,
  /// Greyscale plus alpha.
  GrayscaleAlpha = 4,
  /// Red, Green, Blue, Alpha.
  TruecolorAlpha = 6,
}
impl ColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Grayscale => 1,
      Self::Truecolor => 3,
      Self::Indexed => 1,
      Self::GrayscaleAlpha => 2,
      Self::TruecolorAlpha => 4,
    }
  }
}
impl TryFrom<u8> for ColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> PngResult<Self> {
    Ok(match value {
      0 => ColorType::Grayscale,
      2 => ColorType::Truecolor,
      3 => ColorType::Indexed,
      4 => ColorType::GrayscaleAlpha,
      6 => ColorType::TruecolorAlpha,
      _ => return Err(PngError::UnsupportedFormat),
    })
  }
}

/// The decoded `IHDR` record.
///
/// Parsed from the first chunk of the stream and immutable after that. The
/// `compression_method`, `filter_method`, and `interlace_method` bytes are
/// carried but not interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageHeader {
  /// Width in pixels, never zero.
  pub width: u32,
  /// Height in pixels, never zero.
  pub height: u32,
  /// Bits per channel.
  pub bit_depth: u8,
  /// How the channel data is to be interpreted.
  pub color_type: ColorType,
  /// Always 0 in legal PNG data.
  pub compression_method: u8,
  /// Always 0 in legal PNG data.
  pub filter_method: u8,
  /// 0 for sequential scanlines, 1 for interlaced (which this crate rejects
  /// at reconstruction time because the pixel layout would be wrong).
  pub interlace_method: u8,
}
impl ImageHeader {
  /// Bytes per pixel for the formats the reconstruction engine handles.
  ///
  /// ## Failure
  /// Anything outside 8-bit truecolor with or without alpha is
  /// [`UnsupportedFormat`](PngError::UnsupportedFormat).
  #[inline]
  pub const fn bytes_per_pixel(self) -> PngResult<usize> {
    match (self.color_type, self.bit_depth) {
      (ColorType::Truecolor, 8) => Ok(3),
      (ColorType::TruecolorAlpha, 8) => Ok(4),
      _ => Err(PngError::UnsupportedFormat),
    }
  }
}
impl TryFrom<&[u8]> for ImageHeader {
  type Error = PngError;
  fn try_from(data: &[u8]) -> PngResult<Self> {
    match data {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] =>
      {
        let width = u32::from_be_bytes([*w0, *w1, *w2, *w3]);
        let height = u32::from_be_bytes([*h0, *h1, *h2, *h3]);
        if width == 0 || height == 0 {
          return Err(PngError::InvalidDimensions);
        }
        Ok(Self {
          width,
          height,
          bit_depth: *bit_depth,
          color_type: ColorType::try_from(*color_type)?,
          compression_method: *compression_method,
          filter_method: *filter_method,
          interlace_method: *interlace_method,
        })
      }
      _ => Err(PngError::MissingHeader),
    }
  }
}
