#![forbid(unsafe_code)]

//! The container parser: walks the chunk stream and drives the other stages.
//!
//! The walk keeps a small presence bitmask over the structural chunks. The
//! interesting transition is the end of an `IDAT` run: all consecutive
//! `IDAT` payloads concatenate into one zlib stream, and the first non-IDAT
//! chunk after them (or the end of the stream) flushes that run through
//! decompression and scanline reconstruction.

use alloc::vec::Vec;

use bitfrob::{u8_get_bit, u8_with_bit};

use crate::{
  chunk::{is_png_signature, ChunkTy, RawChunkIter},
  image::DecodedImage,
  inflate::inflate_idat,
  unfilter::unfilter_scanlines,
  ImageHeader, PngError, PngResult,
};

// Bit positions within the chunk presence mask.
const IHDR_SEEN: u32 = 0;
const IDAT_SEEN: u32 = 1;
const IDAT_RUN_OPEN: u32 = 2;
const IEND_SEEN: u32 = 3;

/// Inflates and reconstructs one finished `IDAT` run, appending the
/// recovered pixel bytes and clearing the accumulation buffer.
fn flush_idat_run(
  ihdr: Option<ImageHeader>, idat_run: &mut Vec<u8>, pixel_data: &mut Vec<u8>,
) -> PngResult<()> {
  // IDAT before IHDR already failed the walk, so the header is present here.
  let ihdr = ihdr.ok_or(PngError::MissingHeader)?;
  let filtered = inflate_idat(idat_run)?;
  let recon = unfilter_scanlines(ihdr, &filtered)?;
  pixel_data.extend_from_slice(&recon);
  idat_run.clear();
  Ok(())
}

/// Decodes a full in-memory PNG datastream into a [`DecodedImage`].
///
/// ## Failure
/// Any structural problem aborts the whole decode with no partial result;
/// see [`PngError`] for the possibilities. There is no chunk-level recovery.
pub fn decode_png_bytes(bytes: &[u8]) -> PngResult<DecodedImage> {
  if !is_png_signature(bytes) {
    return Err(PngError::InvalidSignature);
  }
  let mut flags: u8 = 0;
  let mut ihdr: Option<ImageHeader> = None;
  let mut idat_run: Vec<u8> = Vec::new();
  let mut pixel_data: Vec<u8> = Vec::new();
  for chunk in RawChunkIter::new(bytes) {
    if u8_get_bit(IDAT_RUN_OPEN, flags) && chunk.ty() != ChunkTy::IDAT {
      flags = u8_with_bit(IDAT_RUN_OPEN, flags, false);
      flush_idat_run(ihdr, &mut idat_run, &mut pixel_data)?;
    }
    if !u8_get_bit(IHDR_SEEN, flags) {
      if chunk.ty() != ChunkTy::IHDR {
        return Err(PngError::MissingHeader);
      }
      ihdr = Some(ImageHeader::try_from(chunk.data())?);
      flags = u8_with_bit(IHDR_SEEN, flags, true);
    } else if chunk.ty() == ChunkTy::IDAT {
      idat_run.extend_from_slice(chunk.data());
      flags = u8_with_bit(IDAT_SEEN, flags, true);
      flags = u8_with_bit(IDAT_RUN_OPEN, flags, true);
    } else if chunk.ty() == ChunkTy::iCCP {
      if u8_get_bit(IDAT_SEEN, flags) {
        return Err(PngError::ChunkOrderingViolation);
      }
      // profile payloads are read and discarded, interpreting them is out of
      // scope
    } else if chunk.ty() == ChunkTy::IEND {
      flags = u8_with_bit(IEND_SEEN, flags, true);
      break;
    }
    // every other chunk type: payload read and discarded
  }
  // a stream that just stops after its image data still decodes; the missing
  // IEND is not treated as a distinct error
  if u8_get_bit(IDAT_RUN_OPEN, flags) {
    flush_idat_run(ihdr, &mut idat_run, &mut pixel_data)?;
  }
  match ihdr {
    Some(ihdr) => Ok(DecodedImage::new(ihdr, pixel_data)),
    None => Err(PngError::MissingHeader),
  }
}
