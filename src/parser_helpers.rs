#![forbid(unsafe_code)]

//! Shorthands for the byte-pulling that the chunk walker does constantly.

/// PNG integers are big-endian on the wire.
#[inline]
#[must_use]
pub(crate) fn u32_be(bytes: [u8; 4]) -> u32 {
  u32::from_be_bytes(bytes)
}

/// Splits a fixed-size array off the front of `bytes`, or `None` if there
/// aren't enough bytes.
#[inline]
pub(crate) fn try_split_off_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let a: [u8; N] = head.try_into().unwrap();
    Some((a, tail))
  } else {
    None
  }
}
