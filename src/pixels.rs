//! Plain byte-per-channel pixel types for viewing decoded buffers.

// Note(unsafe): the `Pod` derives expand to unsafe impls, so this module
// can't carry `forbid(unsafe_code)`.

use bytemuck::{Pod, Zeroable};

/// An 8-bit-per-channel RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

/// An 8-bit-per-channel RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
