use unpng::{ColorType, DecodedImage, PngError, RawChunkIter, PNG_SIGNATURE};
use walkdir::WalkDir;

/// Wraps a payload into a full chunk: length, type tag, payload, CRC trailer.
/// The trailer is written as zero since nothing checks it.
fn chunk(ty: &[u8; 4], payload: &[u8]) -> Vec<u8> {
  let mut out = Vec::new();
  out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
  out.extend_from_slice(ty);
  out.extend_from_slice(payload);
  out.extend_from_slice(&[0, 0, 0, 0]);
  out
}

fn ihdr_payload(width: u32, height: u32, bit_depth: u8, color_type: u8) -> [u8; 13] {
  let mut payload = [0_u8; 13];
  payload[0..4].copy_from_slice(&width.to_be_bytes());
  payload[4..8].copy_from_slice(&height.to_be_bytes());
  payload[8] = bit_depth;
  payload[9] = color_type;
  payload
}

/// Builds a full PNG datastream from a list of (type, payload) pairs.
fn png_stream(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
  let mut out = PNG_SIGNATURE.to_vec();
  for (ty, payload) in chunks {
    out.extend_from_slice(&chunk(ty, payload));
  }
  out
}

fn zlib(filtered: &[u8]) -> Vec<u8> {
  miniz_oxide::deflate::compress_to_vec_zlib(filtered, 6)
}

#[test]
fn test_decodes_a_2x2_truecolor_image() {
  let filtered = [0, 10, 20, 30, 40, 50, 60, 0, 70, 80, 90, 100, 110, 120];
  let idat = zlib(&filtered);
  let bytes = png_stream(&[
    (b"IHDR", &ihdr_payload(2, 2, 8, 2)),
    (b"IDAT", &idat),
    (b"IEND", &[]),
  ]);
  let image = DecodedImage::from_bytes(&bytes).unwrap();
  assert_eq!(image.header().width, 2);
  assert_eq!(image.header().height, 2);
  assert_eq!(image.header().color_type, ColorType::Truecolor);
  assert_eq!(image.image_data(), &[10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120]);
  assert!(image.matches_dimensions(2, 2));
  assert!(!image.matches_dimensions(2, 1));
  assert!(!image.matches_dimensions(1, 2));
}

#[test]
fn test_decode_then_flip_keeps_the_four_byte_stride_behavior() {
  let filtered = [0, 10, 20, 30, 40, 50, 60, 0, 70, 80, 90, 100, 110, 120];
  let idat = zlib(&filtered);
  let bytes = png_stream(&[
    (b"IHDR", &ihdr_payload(2, 2, 8, 2)),
    (b"IDAT", &idat),
    (b"IEND", &[]),
  ]);
  let mut image = DecodedImage::from_bytes(&bytes).unwrap();
  image.vertical_flip();
  // stride 6, swapped in 4-byte groups with the out-of-range tail skipped; for
  // this shape that still lands as a full row swap.
  assert_eq!(image.image_data(), &[70, 80, 90, 100, 110, 120, 10, 20, 30, 40, 50, 60]);
}

#[test]
fn test_decodes_rgba_with_sub_and_paeth_rows() {
  // row 0 (Sub): [10,20,30,40] then +left -> [11,22,33,44]
  // row 1 (Paeth): pixel 0 predicts straight up -> [15,25,35,45];
  // pixel 1 byte 0 is 250 + paeth(15,11,10)=15 -> 265, wraps to 9.
  let filtered = [1, 10, 20, 30, 40, 1, 2, 3, 4, 4, 5, 5, 5, 5, 250, 0, 0, 0];
  let idat = zlib(&filtered);
  let bytes = png_stream(&[
    (b"IHDR", &ihdr_payload(2, 2, 8, 6)),
    (b"IDAT", &idat),
    (b"IEND", &[]),
  ]);
  let image = DecodedImage::from_bytes(&bytes).unwrap();
  assert_eq!(
    image.image_data(),
    &[10, 20, 30, 40, 11, 22, 33, 44, 15, 25, 35, 45, 9, 25, 35, 45]
  );
  let pixels = image.pixels_rgba().unwrap();
  assert_eq!(pixels.len(), 4);
  assert_eq!((pixels[0].r, pixels[0].g, pixels[0].b, pixels[0].a), (10, 20, 30, 40));
}

#[test]
fn test_idat_split_across_chunks_decodes_the_same() {
  let filtered = [0, 10, 20, 30, 40, 50, 60, 0, 70, 80, 90, 100, 110, 120];
  let idat = zlib(&filtered);
  let (front, back) = idat.split_at(idat.len() / 2);
  let split = png_stream(&[
    (b"IHDR", &ihdr_payload(2, 2, 8, 2)),
    (b"IDAT", front),
    (b"IDAT", back),
    (b"IEND", &[]),
  ]);
  let whole = png_stream(&[
    (b"IHDR", &ihdr_payload(2, 2, 8, 2)),
    (b"IDAT", &idat),
    (b"IEND", &[]),
  ]);
  let split_image = DecodedImage::from_bytes(&split).unwrap();
  let whole_image = DecodedImage::from_bytes(&whole).unwrap();
  assert_eq!(split_image, whole_image);
}

#[test]
fn test_missing_iend_still_decodes() {
  let filtered = [0, 1, 2, 3];
  let idat = zlib(&filtered);
  let bytes = png_stream(&[(b"IHDR", &ihdr_payload(1, 1, 8, 2)), (b"IDAT", &idat)]);
  let image = DecodedImage::from_bytes(&bytes).unwrap();
  assert_eq!(image.image_data(), &[1, 2, 3]);
}

#[test]
fn test_bad_signature_is_InvalidSignature() {
  assert_eq!(DecodedImage::from_bytes(b"GIF89a.."), Err(PngError::InvalidSignature));
  assert_eq!(DecodedImage::from_bytes(&[]), Err(PngError::InvalidSignature));
  let mut bytes = PNG_SIGNATURE;
  bytes[0] = 0;
  assert_eq!(DecodedImage::from_bytes(&bytes), Err(PngError::InvalidSignature));
}

#[test]
fn test_iccp_after_idat_is_ChunkOrderingViolation() {
  let idat = zlib(&[0, 1, 2, 3]);
  let bytes = png_stream(&[
    (b"IHDR", &ihdr_payload(1, 1, 8, 2)),
    (b"IDAT", &idat),
    (b"iCCP", b"profile\0\0junk"),
    (b"IEND", &[]),
  ]);
  assert_eq!(DecodedImage::from_bytes(&bytes), Err(PngError::ChunkOrderingViolation));
}

#[test]
fn test_iccp_before_idat_is_fine() {
  let idat = zlib(&[0, 1, 2, 3]);
  let bytes = png_stream(&[
    (b"IHDR", &ihdr_payload(1, 1, 8, 2)),
    (b"iCCP", b"profile\0\0junk"),
    (b"IDAT", &idat),
    (b"IEND", &[]),
  ]);
  assert_eq!(DecodedImage::from_bytes(&bytes).unwrap().image_data(), &[1, 2, 3]);
}

#[test]
fn test_first_chunk_not_ihdr_is_MissingHeader() {
  let idat = zlib(&[0, 1, 2, 3]);
  let bytes = png_stream(&[(b"IDAT", &idat), (b"IEND", &[])]);
  assert_eq!(DecodedImage::from_bytes(&bytes), Err(PngError::MissingHeader));
  // signature alone, no chunks at all
  assert_eq!(DecodedImage::from_bytes(&PNG_SIGNATURE), Err(PngError::MissingHeader));
}

#[test]
fn test_grayscale_is_UnsupportedFormat() {
  let idat = zlib(&[0, 1]);
  let bytes = png_stream(&[
    (b"IHDR", &ihdr_payload(1, 1, 8, 0)),
    (b"IDAT", &idat),
    (b"IEND", &[]),
  ]);
  assert_eq!(DecodedImage::from_bytes(&bytes), Err(PngError::UnsupportedFormat));
}

#[test]
fn test_zero_dimensions_are_InvalidDimensions() {
  let bytes = png_stream(&[(b"IHDR", &ihdr_payload(0, 2, 8, 2)), (b"IEND", &[])]);
  assert_eq!(DecodedImage::from_bytes(&bytes), Err(PngError::InvalidDimensions));
}

#[test]
fn test_garbage_idat_is_DecompressionFailed() {
  let bytes = png_stream(&[
    (b"IHDR", &ihdr_payload(1, 1, 8, 2)),
    (b"IDAT", &[0xFF; 32]),
    (b"IEND", &[]),
  ]);
  assert_eq!(DecodedImage::from_bytes(&bytes), Err(PngError::DecompressionFailed));
}

#[test]
fn test_unknown_ancillary_chunks_are_skipped() {
  let idat = zlib(&[0, 1, 2, 3]);
  let bytes = png_stream(&[
    (b"IHDR", &ihdr_payload(1, 1, 8, 2)),
    (b"tEXt", b"Comment\0hello"),
    (b"IDAT", &idat),
    (b"tIME", &[7, 0xE6, 1, 1, 0, 0, 0]),
    (b"IEND", &[]),
  ]);
  assert_eq!(DecodedImage::from_bytes(&bytes).unwrap().image_data(), &[1, 2, 3]);
}

#[test]
fn test_RawChunkIter_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    for _ in RawChunkIter::new(&v) {
      //
    }
  }
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in RawChunkIter::new(&v) {
      //
    }
  }
}

#[test]
fn test_decode_never_panics_on_random_data() {
  for _ in 0..10 {
    let mut v = super::rand_bytes(1024);
    let _ = DecodedImage::from_bytes(&v);
    // again with a valid signature so the chunk walk actually runs
    v[..8].copy_from_slice(&PNG_SIGNATURE);
    let _ = DecodedImage::from_bytes(&v);
  }
}
