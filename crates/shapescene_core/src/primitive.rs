//! Renderable triangle primitives.

use serde::{Deserialize, Serialize};
use shapescene_math::{Aabb, Vec3};
use thiserror::Error;

use crate::material::Material;
use crate::mesh::{FaceNormals, Mesh};

/// Errors raised when a mesh's faces are internally inconsistent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Face {face} has {len} indices, not a multiple of 3")]
    IndexCountNotMultipleOfThree { face: usize, len: usize },

    #[error("Face {face} declares {triangle_count} triangles but holds {index_count} indices")]
    TriangleCountMismatch {
        face: usize,
        triangle_count: usize,
        index_count: usize,
    },

    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Face {face} has {normals} normals for {indices} indices")]
    NormalCountMismatch {
        face: usize,
        normals: usize,
        indices: usize,
    },
}

/// A list of triangles sharing one material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenePrimitive {
    /// Triangle corner positions, in stored winding order
    pub triangles: Vec<[Vec3; 3]>,

    /// Corner normals, parallel to `triangles`
    pub normals: Vec<[Vec3; 3]>,

    pub material: Material,

    /// Bounds of all corner positions
    pub bounds: Aabb,
}

impl ScenePrimitive {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions flattened into `[x, y, z]` triples, three per triangle.
    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.triangles
            .iter()
            .flat_map(|tri| tri.iter().map(|p| p.to_array()))
            .collect()
    }

    /// Corner positions as raw little-endian bytes, ready for a vertex buffer.
    pub fn position_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.positions()).to_vec()
    }
}

/// Emit every triangle of `mesh` with the given material.
///
/// Triangle `i` of a face uses indices `[3i, 3i + 3)`; corners keep their
/// stored order. Positions are narrowed to `f32` here.
pub fn build(mesh: &Mesh, material: Material) -> Result<ScenePrimitive, ValidationError> {
    let vertex_count = mesh.vertices.len();
    let mut triangles = Vec::with_capacity(mesh.triangle_count());
    let mut normals = Vec::with_capacity(mesh.triangle_count());

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let len = face.indices.len();
        if len % 3 != 0 {
            return Err(ValidationError::IndexCountNotMultipleOfThree {
                face: face_index,
                len,
            });
        }
        if face.triangle_count * 3 != len {
            return Err(ValidationError::TriangleCountMismatch {
                face: face_index,
                triangle_count: face.triangle_count,
                index_count: len,
            });
        }

        if let FaceNormals::PerVertex(per_vertex) = &face.normals {
            if per_vertex.len() != len {
                return Err(ValidationError::NormalCountMismatch {
                    face: face_index,
                    normals: per_vertex.len(),
                    indices: len,
                });
            }
        }

        for (corner_base, tri) in face.indices.chunks_exact(3).enumerate() {
            let mut corners = [Vec3::ZERO; 3];
            let mut corner_normals = [Vec3::ZERO; 3];

            for k in 0..3 {
                let index = tri[k];
                let position =
                    mesh.vertices
                        .get(index as usize)
                        .ok_or(ValidationError::IndexOutOfRange {
                            face: face_index,
                            index,
                            vertex_count,
                        })?;
                let normal = face.normals.at(corner_base * 3 + k).unwrap_or_default();

                corners[k] = position.as_vec3();
                corner_normals[k] = normal.as_vec3();
            }

            triangles.push(corners);
            normals.push(corner_normals);
        }
    }

    let bounds = Aabb::from_positions(triangles.iter().flatten());

    Ok(ScenePrimitive {
        triangles,
        normals,
        material,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;
    use crate::transform;
    use shapescene_math::{DMat4, DVec3};

    fn single_triangle() -> Mesh {
        Mesh::new(
            1,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            vec![Face::new(vec![0, 1, 2], 1, FaceNormals::Planar(DVec3::Z))],
        )
    }

    #[test]
    fn test_single_triangle_after_axis_swap() {
        let placed = transform::apply(&single_triangle(), &DMat4::IDENTITY).unwrap();
        let primitive = build(&placed, Material::default()).unwrap();

        assert_eq!(primitive.triangle_count(), 1);
        assert_eq!(
            primitive.triangles[0],
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0)
            ]
        );
    }

    #[test]
    fn test_winding_is_preserved() {
        let mesh = Mesh::new(
            1,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE],
            vec![Face::new(
                vec![2, 0, 1, 3, 2, 1],
                2,
                FaceNormals::Planar(DVec3::Z),
            )],
        );
        let primitive = build(&mesh, Material::default()).unwrap();

        assert_eq!(primitive.triangles[0], [Vec3::Y, Vec3::ZERO, Vec3::X]);
        assert_eq!(primitive.triangles[1], [Vec3::ONE, Vec3::Y, Vec3::X]);
    }

    #[test]
    fn test_all_faces_share_material() {
        let material = Material::with_color(None, shapescene_math::Vec4::new(1.0, 0.0, 0.0, 1.0));
        let mut mesh = single_triangle();
        mesh.faces.push(Face::new(vec![2, 1, 0], 1, FaceNormals::Planar(-DVec3::Z)));

        let primitive = build(&mesh, material.clone()).unwrap();
        assert_eq!(primitive.triangle_count(), 2);
        assert_eq!(primitive.material, material);
    }

    #[test]
    fn test_per_vertex_normals_follow_corners() {
        let mesh = Mesh::new(
            1,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            vec![Face::new(
                vec![0, 1, 2],
                1,
                FaceNormals::PerVertex(vec![DVec3::X, DVec3::Y, DVec3::Z]),
            )],
        );
        let primitive = build(&mesh, Material::default()).unwrap();

        assert_eq!(primitive.normals[0], [Vec3::X, Vec3::Y, Vec3::Z]);
    }

    #[test]
    fn test_index_count_not_multiple_of_three() {
        let mesh = Mesh::new(
            1,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            vec![Face::new(vec![0, 1], 1, FaceNormals::Planar(DVec3::Z))],
        );

        assert_eq!(
            build(&mesh, Material::default()),
            Err(ValidationError::IndexCountNotMultipleOfThree { face: 0, len: 2 })
        );
    }

    #[test]
    fn test_triangle_count_disagrees() {
        let mut mesh = single_triangle();
        mesh.faces[0].triangle_count = 2;

        assert_eq!(
            build(&mesh, Material::default()),
            Err(ValidationError::TriangleCountMismatch {
                face: 0,
                triangle_count: 2,
                index_count: 3
            })
        );
    }

    #[test]
    fn test_out_of_range_index() {
        let mut mesh = single_triangle();
        mesh.faces[0].indices[2] = 9;

        assert!(matches!(
            build(&mesh, Material::default()),
            Err(ValidationError::IndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_missing_per_vertex_normal() {
        let mut mesh = single_triangle();
        mesh.faces[0].normals = FaceNormals::PerVertex(vec![DVec3::Z, DVec3::Z]);

        assert!(matches!(
            build(&mesh, Material::default()),
            Err(ValidationError::NormalCountMismatch {
                face: 0,
                normals: 2,
                indices: 3
            })
        ));
    }

    #[test]
    fn test_bounds_and_position_bytes() {
        let primitive = build(&single_triangle(), Material::default()).unwrap();

        assert_eq!(primitive.bounds.min(), Vec3::ZERO);
        assert_eq!(primitive.bounds.max(), Vec3::new(1.0, 1.0, 0.0));

        let bytes = primitive.position_bytes();
        assert_eq!(bytes.len(), 3 * 3 * 4);
        assert_eq!(&bytes[12..16], &1.0f32.to_le_bytes());
    }
}
