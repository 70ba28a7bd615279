//! Decoded triangulation meshes.
//!
//! A [`Mesh`] is the typed form of a triangulation blob: one shared vertex
//! list plus a list of faces, each face holding its own triangle indices and
//! normals. Positions stay in `f64` until the primitive builder narrows them,
//! so large placements are applied without losing precision.

use shapescene_math::DVec3;

/// Normals attached to a face.
#[derive(Clone, Debug, PartialEq)]
pub enum FaceNormals {
    /// A planar face: one normal shared by every triangle
    Planar(DVec3),

    /// A curved face: one normal per index
    PerVertex(Vec<DVec3>),
}

impl FaceNormals {
    /// Normal for the index at `position` within the face.
    pub fn at(&self, position: usize) -> Option<DVec3> {
        match self {
            FaceNormals::Planar(n) => Some(*n),
            FaceNormals::PerVertex(normals) => normals.get(position).copied(),
        }
    }

    /// Apply `f` to every stored normal.
    pub fn map(&self, f: impl Fn(DVec3) -> DVec3) -> Self {
        match self {
            FaceNormals::Planar(n) => FaceNormals::Planar(f(*n)),
            FaceNormals::PerVertex(normals) => {
                FaceNormals::PerVertex(normals.iter().map(|n| f(*n)).collect())
            }
        }
    }

    pub fn is_planar(&self) -> bool {
        matches!(self, FaceNormals::Planar(_))
    }
}

/// A triangulated face.
///
/// Triangle `i` spans `indices[3i..3i + 3]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Vertex indices, three per triangle
    pub indices: Vec<u32>,

    /// Number of triangles in this face
    pub triangle_count: usize,

    /// Face normals
    pub normals: FaceNormals,
}

impl Face {
    pub fn new(indices: Vec<u32>, triangle_count: usize, normals: FaceNormals) -> Self {
        Self {
            indices,
            triangle_count,
            normals,
        }
    }

    /// The three indices of triangle `i`, if present.
    pub fn triangle(&self, i: usize) -> Option<[u32; 3]> {
        let start = i.checked_mul(3)?;
        match self.indices.get(start..start + 3) {
            Some(&[a, b, c]) => Some([a, b, c]),
            _ => None,
        }
    }
}

/// A triangulated shape: shared vertices plus faces.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    /// Wire format version the mesh was decoded from
    pub version: u8,

    /// Vertex positions
    pub vertices: Vec<DVec3>,

    /// Faces referencing `vertices`
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(version: u8, vertices: Vec<DVec3>, faces: Vec<Face>) -> Self {
        Self {
            version,
            vertices,
            faces,
        }
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.triangle_count).sum()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// True if the mesh has nothing to render.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangle_count() == 0
    }

    /// Corner points of the axis-aligned box around all vertices.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh {
        Mesh::new(
            1,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            vec![Face::new(vec![0, 1, 2], 1, FaceNormals::Planar(DVec3::Z))],
        )
    }

    #[test]
    fn test_mesh_counts() {
        let mesh = unit_triangle();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_face_triangle_access() {
        let face = Face::new(vec![0, 1, 2, 2, 1, 3], 2, FaceNormals::Planar(DVec3::Z));

        assert_eq!(face.triangle(0), Some([0, 1, 2]));
        assert_eq!(face.triangle(1), Some([2, 1, 3]));
        assert_eq!(face.triangle(2), None);
    }

    #[test]
    fn test_bounds_computation() {
        let mesh = Mesh::new(
            1,
            vec![
                DVec3::new(-1.0, -2.0, -3.0),
                DVec3::new(4.0, 5.0, 6.0),
                DVec3::ZERO,
            ],
            Vec::new(),
        );

        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_planar_normal_repeats() {
        let normals = FaceNormals::Planar(DVec3::Z);
        assert_eq!(normals.at(0), Some(DVec3::Z));
        assert_eq!(normals.at(17), Some(DVec3::Z));

        let per_vertex = FaceNormals::PerVertex(vec![DVec3::X, DVec3::Y]);
        assert_eq!(per_vertex.at(1), Some(DVec3::Y));
        assert_eq!(per_vertex.at(2), None);
    }
}
