#![forbid(unsafe_code)]

//! The boundary to the zlib inflate primitive.
//!
//! The image data of a PNG is a single zlib stream, possibly spread over
//! several `IDAT` chunks. The container parser concatenates a run of those
//! chunks and hands the whole thing to [`inflate_idat`].

use alloc::{boxed::Box, vec::Vec};

use miniz_oxide::{
  inflate::stream::{inflate, InflateState},
  DataFormat, MZError, MZFlush, MZStatus,
};

use crate::{PngError, PngResult};

/// Output is drained from the inflater in steps of this many bytes.
pub const INFLATE_STEP_SIZE: usize = 16384;

/// Inflates a complete zlib stream into a fresh buffer.
///
/// The inflater runs with zlib header parsing but without Adler-32
/// verification, matching the rest of this crate's no-checksum policy. Each
/// step appends exactly the bytes the primitive produced, so short final
/// steps are never padded.
///
/// ## Failure
/// A data or memory error from the primitive is
/// [`DecompressionFailed`](PngError::DecompressionFailed). A stream that
/// merely ends early just yields however much data was recovered.
pub fn inflate_idat(mut compressed: &[u8]) -> PngResult<Vec<u8>> {
  let mut state: Box<InflateState> = InflateState::new_boxed(DataFormat::ZLibIgnoreChecksum);
  let mut decompressed: Vec<u8> = Vec::new();
  let mut step = [0_u8; INFLATE_STEP_SIZE];
  loop {
    let result = inflate(&mut state, compressed, &mut step, MZFlush::None);
    decompressed.extend_from_slice(&step[..result.bytes_written]);
    compressed = &compressed[result.bytes_consumed..];
    match result.status {
      Ok(MZStatus::StreamEnd) => break,
      Ok(_) => (),
      Err(MZError::Data) | Err(MZError::Mem) => return Err(PngError::DecompressionFailed),
      // Buf and friends mean "no progress possible", handled below.
      Err(_) => (),
    }
    if compressed.is_empty() && result.bytes_written < step.len() {
      break;
    }
    if result.bytes_consumed == 0 && result.bytes_written == 0 {
      break;
    }
  }
  Ok(decompressed)
}
