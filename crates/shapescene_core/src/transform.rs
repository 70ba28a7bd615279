//! Baking instance placements into mesh vertices.
//!
//! The placement is applied first, then the Z-up → Y-up axis swap. Reversing
//! the two changes the result for any placement that is not symmetric in Y/Z.

use shapescene_math::{z_up_to_y_up, DMat4, DMat4Ext};
use thiserror::Error;

use crate::mesh::{Face, Mesh};

/// Errors that can occur while applying a placement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Placement matrix contains non-finite values")]
    NonFinite,
}

/// Apply `transform` and the axis correction to every vertex and normal.
///
/// Always returns a new mesh; `mesh` may be shared with other instances and
/// is left untouched.
pub fn apply(mesh: &Mesh, transform: &DMat4) -> Result<Mesh, TransformError> {
    if !transform.is_finite_placement() {
        return Err(TransformError::NonFinite);
    }

    let vertices = mesh
        .vertices
        .iter()
        .map(|v| z_up_to_y_up(transform.transform_point3(*v)))
        .collect();

    let normal_matrix = transform.normal_matrix();
    let faces = mesh
        .faces
        .iter()
        .map(|face| {
            let normals = face.normals.map(|n| {
                let placed = (normal_matrix * n).try_normalize().unwrap_or(n);
                z_up_to_y_up(placed)
            });
            Face::new(face.indices.clone(), face.triangle_count, normals)
        })
        .collect();

    Ok(Mesh::new(mesh.version, vertices, faces))
}
