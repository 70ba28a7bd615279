use super::packed_normal::PackedNormal;
use super::{index_width, TRIANGULATION_VERSION};
use crate::mesh::{FaceNormals, Mesh};

/// Encode a mesh into the triangulation wire layout.
///
/// Positions are narrowed to `f32` and normals are quantised, so decoding
/// the result gives back the same topology with approximate normals.
/// Faces without triangles are written as empty faces. Every index must
/// refer to a vertex of `mesh`; debug builds assert that it fits the wire
/// index width.
pub fn encode(mesh: &Mesh) -> Vec<u8> {
    let width = index_width(mesh.vertices.len());
    let mut bytes = Vec::with_capacity(13 + mesh.vertices.len() * 12);

    bytes.push(TRIANGULATION_VERSION);
    write_i32(&mut bytes, mesh.vertices.len());
    write_i32(&mut bytes, mesh.triangle_count());

    for v in &mesh.vertices {
        bytes.extend_from_slice(&(v.x as f32).to_le_bytes());
        bytes.extend_from_slice(&(v.y as f32).to_le_bytes());
        bytes.extend_from_slice(&(v.z as f32).to_le_bytes());
    }

    write_i32(&mut bytes, mesh.faces.len());

    for face in &mesh.faces {
        let count = face.triangle_count as i32;
        match &face.normals {
            FaceNormals::Planar(normal) => {
                bytes.extend_from_slice(&count.to_le_bytes());
                if count == 0 {
                    continue;
                }
                write_normal(&mut bytes, PackedNormal::from_vector(*normal));
                for &index in &face.indices {
                    write_index(&mut bytes, index, width);
                }
            }
            FaceNormals::PerVertex(normals) => {
                bytes.extend_from_slice(&(-count).to_le_bytes());
                for (i, &index) in face.indices.iter().enumerate() {
                    write_index(&mut bytes, index, width);
                    let normal = normals.get(i).copied().unwrap_or_default();
                    write_normal(&mut bytes, PackedNormal::from_vector(normal));
                }
            }
        }
    }

    bytes
}

fn write_i32(bytes: &mut Vec<u8>, value: usize) {
    bytes.extend_from_slice(&(value as i32).to_le_bytes());
}

fn write_normal(bytes: &mut Vec<u8>, normal: PackedNormal) {
    bytes.push(normal.u);
    bytes.push(normal.v);
}

fn write_index(bytes: &mut Vec<u8>, index: u32, width: usize) {
    debug_assert!(
        width >= 4 || u64::from(index) < 1u64 << (8 * width),
        "index {} does not fit in {} byte(s)",
        index,
        width
    );
    match width {
        1 => bytes.push(index as u8),
        2 => bytes.extend_from_slice(&(index as u16).to_le_bytes()),
        _ => bytes.extend_from_slice(&(index as i32).to_le_bytes()),
    }
}
