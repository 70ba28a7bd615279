use shapescene_math::DVec3;
use thiserror::Error;

use super::packed_normal::PackedNormal;
use super::reader::BlobReader;
use super::{index_width, TRIANGULATION_VERSION};
use crate::mesh::{Face, FaceNormals, Mesh};

/// Errors that can occur while decoding a triangulation blob.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Geometry blob is empty")]
    Empty,

    #[error("Blob truncated at byte {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Unsupported triangulation version {0}")]
    UnsupportedVersion(u8),

    #[error("Negative {field}: {value}")]
    NegativeCount { field: &'static str, value: i32 },

    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: i64,
        vertex_count: usize,
    },

    #[error("Header declares {declared} triangles, faces contain {actual}")]
    TriangleCountMismatch { declared: usize, actual: usize },
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Read one index and check it against the vertex count.
fn read_checked_index(
    reader: &mut BlobReader<'_>,
    width: usize,
    face: usize,
    vertex_count: usize,
) -> DecodeResult<u32> {
    let index = reader.read_index(width)?;
    if index < 0 || index as usize >= vertex_count {
        return Err(DecodeError::IndexOutOfRange {
            face,
            index,
            vertex_count,
        });
    }
    Ok(index as u32)
}

/// Decode a triangulation blob into a [`Mesh`].
///
/// Deterministic and side-effect free: the same bytes always produce the
/// same mesh. Bytes after the last face are ignored.
///
/// # Example
///
/// ```ignore
/// use shapescene_core::triangulation::decode;
///
/// let mesh = decode(&blob)?;
/// println!("{} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
/// ```
pub fn decode(blob: &[u8]) -> DecodeResult<Mesh> {
    if blob.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut reader = BlobReader::new(blob);

    let version = reader.read_u8()?;
    if version != TRIANGULATION_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let vertex_count = reader.read_count("vertex count")?;
    let declared_triangles = reader.read_count("triangle count")?;

    reader.ensure_available(vertex_count, 12)?;
    let mut vertices = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        let x = reader.read_f32()?;
        let y = reader.read_f32()?;
        let z = reader.read_f32()?;
        vertices.push(DVec3::new(f64::from(x), f64::from(y), f64::from(z)));
    }

    let face_count = reader.read_count("face count")?;
    // Every face carries at least its 4-byte triangle count
    reader.ensure_available(face_count, 4)?;

    let width = index_width(vertex_count);
    let mut faces = Vec::with_capacity(face_count);
    let mut actual_triangles = 0usize;

    for face_index in 0..face_count {
        let signed = reader.read_i32()?;
        if signed == 0 {
            continue;
        }

        let triangle_count = signed.unsigned_abs() as usize;
        let index_count = triangle_count * 3;
        let face = if signed > 0 {
            let normal = PackedNormal::new(reader.read_u8()?, reader.read_u8()?);
            reader.ensure_available(index_count, width)?;

            let mut indices = Vec::with_capacity(index_count);
            for _ in 0..index_count {
                indices.push(read_checked_index(&mut reader, width, face_index, vertex_count)?);
            }
            Face::new(indices, triangle_count, FaceNormals::Planar(normal.to_vector()))
        } else {
            reader.ensure_available(index_count, width + 2)?;

            let mut indices = Vec::with_capacity(index_count);
            let mut normals = Vec::with_capacity(index_count);
            for _ in 0..index_count {
                indices.push(read_checked_index(&mut reader, width, face_index, vertex_count)?);
                let normal = PackedNormal::new(reader.read_u8()?, reader.read_u8()?);
                normals.push(normal.to_vector());
            }
            Face::new(indices, triangle_count, FaceNormals::PerVertex(normals))
        };

        actual_triangles += triangle_count;
        faces.push(face);
    }

    if actual_triangles != declared_triangles {
        return Err(DecodeError::TriangleCountMismatch {
            declared: declared_triangles,
            actual: actual_triangles,
        });
    }

    if reader.remaining() > 0 {
        log::debug!(
            "Ignoring {} trailing bytes after triangulation at offset {}",
            reader.remaining(),
            reader.offset()
        );
    }

    Ok(Mesh::new(version, vertices, faces))
}
