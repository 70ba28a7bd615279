//! Shapescene Core - Building geometry to render scene conversion.
//!
//! This crate provides:
//!
//! - **Triangulation blobs**: decoding (and encoding) the compact binary
//!   triangulation format stored per shape
//! - **Placement**: baking instance transforms and the Z-up → Y-up axis swap
//! - **Materials**: surface style to RGBA material resolution
//! - **Scene assembly**: one node per convertible instance, with per-instance
//!   failures reported as warnings
//!
//! # Example
//!
//! ```ignore
//! use shapescene_core::{run, MemoryContext};
//!
//! let context = MemoryContext::new();
//! let (scene, warnings) = run(&context);
//! println!("{} nodes, {} triangles, {} warnings",
//!     scene.node_count(),
//!     scene.total_triangle_count(),
//!     warnings.len());
//! ```

pub mod assembler;
pub mod cache;
pub mod context;
pub mod material;
pub mod mesh;
pub mod primitive;
pub mod scene;
pub mod style;
pub mod transform;
pub mod triangulation;
pub mod warning;

// Re-export commonly used types
pub use assembler::{run, AssemblerConfig, ConversionReport, SceneAssembler};
pub use context::{
    GeometryContext, GeometryLabel, InstanceLabel, MemoryContext, RepresentationType,
    ShapeInstance, StyleLabel,
};
pub use material::{AlphaMode, Material};
pub use mesh::{Face, FaceNormals, Mesh};
pub use primitive::{ScenePrimitive, ValidationError};
pub use scene::{Scene, SceneNode, SceneSink};
pub use style::{Rgb, StyleRecord, SurfaceStyleElement, SurfaceStyleRendering};
pub use transform::TransformError;
pub use triangulation::{decode, encode, DecodeError};
pub use warning::{ConversionWarning, ConvertError};
