#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! A crate for decoding PNG data into raw pixel bytes.
//!
//! The decoder walks the PNG container chunk by chunk, inflates the
//! compressed image data, and reverses the per-scanline filtering to recover
//! the flat pixel buffer. Only 8-bit-per-channel truecolor images (with or
//! without alpha) are supported; anything else fails with a typed error
//! rather than producing wrong pixels.
//!
//! The usual entry points are [`DecodedImage::from_path`] (with the `std`
//! feature) and [`DecodedImage::from_bytes`]. If you want to walk the
//! container yourself, [`RawChunkIter`] gives you the raw chunks.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod parser_helpers;
pub(crate) use parser_helpers::*;

pub mod chunk;
pub use chunk::*;

pub mod header;
pub use header::*;

pub mod inflate;
pub use inflate::*;

pub mod unfilter;
pub use unfilter::*;

pub mod decoder;
pub use decoder::*;

pub mod image;
pub use image::*;

pub mod pixels;
pub use pixels::*;

/// Everything that can go wrong while decoding.
///
/// Every variant is fatal: the decode entry points abort with no partial
/// result. Callers decide whether to log, retry, or give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngError {
  /// The input could not be read at open time.
  #[cfg(feature = "std")]
  #[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
  Io(std::io::ErrorKind),
  /// The first 8 bytes are not the PNG magic sequence.
  InvalidSignature,
  /// A non-IHDR chunk appeared before any IHDR, the IHDR payload was
  /// malformed, or the stream held no chunks at all.
  MissingHeader,
  /// The header's width or height is zero.
  InvalidDimensions,
  /// A color-type / bit-depth combination outside 8-bit truecolor (with or
  /// without alpha).
  UnsupportedFormat,
  /// An `iCCP` chunk appeared after the first `IDAT`.
  ChunkOrderingViolation,
  /// The inflate primitive reported a data or memory error.
  DecompressionFailed,
  /// A scanline's filter byte was not in `0..=4`.
  IllegalFilterByte,
}

/// Alias for `Result` with a [PngError].
pub type PngResult<T> = Result<T, PngError>;
