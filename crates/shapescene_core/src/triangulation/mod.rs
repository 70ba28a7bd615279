//! Binary shape triangulation blobs.
//!
//! The geometry engine stores each shape's tessellation as a compact
//! little-endian blob. This module decodes it into a [`Mesh`](crate::Mesh)
//! and can write the same layout back, which is how test fixtures are made.
//!
//! ## Layout
//!
//! ```text
//! u8        version              (1)
//! i32       vertex count
//! i32       total triangle count
//! f32 x 3   position             x vertex count
//! i32       face count
//! per face:
//!   i32     n                    n > 0: planar, n < 0: per-vertex normals, 0: skipped
//!   planar      -> packed normal, then 3|n| indices
//!   per-vertex  -> 3|n| x (index, packed normal)
//! ```
//!
//! Indices are `u8` for up to 255 vertices, `u16` up to 65535 and `i32`
//! beyond that. Packed normals are two bytes on a 252-step lat/long grid.

mod decoder;
mod packed_normal;
mod reader;
mod writer;

pub use decoder::{decode, DecodeError, DecodeResult};
pub use packed_normal::PackedNormal;
pub use writer::encode;

/// The only wire version understood by the decoder.
pub const TRIANGULATION_VERSION: u8 = 1;

/// Width of an index on the wire for a mesh with `vertex_count` vertices.
pub(crate) fn index_width(vertex_count: usize) -> usize {
    if vertex_count <= 0xFF {
        1
    } else if vertex_count <= 0xFFFF {
        2
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_width_thresholds() {
        assert_eq!(index_width(0), 1);
        assert_eq!(index_width(255), 1);
        assert_eq!(index_width(256), 2);
        assert_eq!(index_width(65535), 2);
        assert_eq!(index_width(65536), 4);
    }
}
