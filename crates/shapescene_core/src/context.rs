//! The geometry context: where shape instances, blobs and styles come from.
//!
//! The core never opens a model file. It is handed a [`GeometryContext`]
//! that already holds tessellated geometry and style data in memory, and it
//! reads from it through typed accessors only.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use shapescene_math::DMat4;

use crate::style::StyleRecord;

macro_rules! entity_label {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

entity_label!(
    /// Identifies a shape instance within a model.
    InstanceLabel
);
entity_label!(
    /// Identifies a triangulation blob; several instances may share one.
    GeometryLabel
);
entity_label!(
    /// Identifies a surface style record.
    StyleLabel
);

/// Which part of a product's geometry an instance represents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepresentationType {
    #[default]
    OpeningsAndAdditionsIncluded,
    OpeningsAndAdditionsExcluded,
    OpeningsAndAdditionsOnly,
    OpeningsAndAdditionsExcludedMinimal,
}

/// One placed occurrence of a shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeInstance {
    pub label: InstanceLabel,

    /// Triangulation this instance places
    pub geometry: GeometryLabel,

    /// Placement in model coordinates (Z-up)
    pub transform: DMat4,

    /// Surface style, if the instance has one
    pub style: Option<StyleLabel>,

    pub representation: RepresentationType,
}

impl ShapeInstance {
    /// Create an unstyled instance with an identity placement.
    pub fn new(label: InstanceLabel, geometry: GeometryLabel) -> Self {
        Self {
            label,
            geometry,
            transform: DMat4::IDENTITY,
            style: None,
            representation: RepresentationType::default(),
        }
    }

    pub fn with_transform(mut self, transform: DMat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_style(mut self, style: StyleLabel) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_representation(mut self, representation: RepresentationType) -> Self {
        self.representation = representation;
        self
    }
}

/// Source of shape instances and their data.
///
/// `shape_instances` must yield the same order every time it is called
/// within one conversion run.
pub trait GeometryContext {
    /// All shape instances, in a stable order.
    fn shape_instances(&self) -> Vec<ShapeInstance>;

    /// Triangulation blob placed by `instance`, if any.
    fn geometry_blob(&self, instance: &ShapeInstance) -> Option<&[u8]>;

    /// Look up a surface style.
    fn style_lookup(&self, style: StyleLabel) -> Option<&StyleRecord>;
}

/// A [`GeometryContext`] held entirely in memory.
///
/// # Example
///
/// ```ignore
/// let context = MemoryContext::new()
///     .with_blob(GeometryLabel(1), blob)
///     .with_instance(ShapeInstance::new(InstanceLabel(10), GeometryLabel(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryContext {
    instances: Vec<ShapeInstance>,
    blobs: HashMap<GeometryLabel, Vec<u8>>,
    styles: HashMap<StyleLabel, StyleRecord>,
}

impl MemoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instance(mut self, instance: ShapeInstance) -> Self {
        self.add_instance(instance);
        self
    }

    pub fn with_blob(mut self, geometry: GeometryLabel, blob: Vec<u8>) -> Self {
        self.add_blob(geometry, blob);
        self
    }

    pub fn with_style(mut self, style: StyleRecord) -> Self {
        self.add_style(style);
        self
    }

    pub fn add_instance(&mut self, instance: ShapeInstance) {
        self.instances.push(instance);
    }

    /// Register a blob, replacing any previous blob under the same label.
    pub fn add_blob(&mut self, geometry: GeometryLabel, blob: Vec<u8>) {
        self.blobs.insert(geometry, blob);
    }

    pub fn add_style(&mut self, style: StyleRecord) {
        self.styles.insert(style.label, style);
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

impl GeometryContext for MemoryContext {
    fn shape_instances(&self) -> Vec<ShapeInstance> {
        self.instances.clone()
    }

    fn geometry_blob(&self, instance: &ShapeInstance) -> Option<&[u8]> {
        self.blobs.get(&instance.geometry).map(Vec::as_slice)
    }

    fn style_lookup(&self, style: StyleLabel) -> Option<&StyleRecord> {
        self.styles.get(&style)
    }
}
