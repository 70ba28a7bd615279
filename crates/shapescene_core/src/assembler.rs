//! Scene assembly: the per-instance conversion pipeline.
//!
//! For each shape instance the assembler decodes the blob, bakes the
//! placement, resolves the material and builds one primitive, then appends
//! a node to the scene. Failures are isolated to their instance and reported
//! as [`ConversionWarning`]s; a run never aborts.
//!
//! # Example
//!
//! ```ignore
//! use shapescene_core::{AssemblerConfig, SceneAssembler};
//!
//! let assembler = SceneAssembler::new(AssemblerConfig::default());
//! let (scene, warnings) = assembler.run(&context);
//! println!("{} nodes, {} warnings", scene.node_count(), warnings.len());
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use shapescene_math::Mat4;

use crate::cache::{MaterialCache, MeshCache};
use crate::context::{GeometryContext, RepresentationType, ShapeInstance, StyleLabel};
use crate::material;
use crate::primitive::{self, ScenePrimitive};
use crate::scene::{Scene, SceneSink};
use crate::transform;
use crate::warning::{ConversionWarning, Result};

/// Settings for a conversion run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Convert instances on the rayon pool instead of one at a time
    pub parallel: bool,

    /// Decode each shared blob once per run
    pub cache_meshes: bool,

    /// Resolve each shared style once per run
    pub cache_materials: bool,

    /// Drop instances that only carry openings and additions
    pub skip_openings: bool,

    /// Name given to the produced scene
    pub scene_name: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            cache_meshes: false,
            cache_materials: false,
            skip_openings: false,
            scene_name: "scene".to_string(),
        }
    }
}

/// Counts and warnings from one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionReport {
    /// Instances yielded by the context
    pub instances: usize,

    /// Nodes appended to the sink
    pub nodes: usize,

    /// Instances dropped because of a warning
    pub skipped: usize,

    /// Instances dropped by configuration
    pub filtered: usize,

    /// Triangles across all appended nodes
    pub triangles: usize,

    /// Warnings in instance order
    pub warnings: Vec<ConversionWarning>,
}

/// What happened to a single instance.
enum InstanceOutcome {
    Converted {
        primitive: ScenePrimitive,
        missing_style: Option<ConversionWarning>,
    },
    Skipped(ConversionWarning),
    Filtered,
}

/// Per-run memo tables (pass-through when disabled).
struct RunCaches {
    meshes: MeshCache,
    materials: MaterialCache,
}

impl RunCaches {
    fn new(config: &AssemblerConfig) -> Self {
        Self {
            meshes: MeshCache::new(config.cache_meshes),
            materials: MaterialCache::new(config.cache_materials),
        }
    }
}

/// Appends outcomes to a sink in instance order.
struct Accumulator<'s, S: SceneSink> {
    sink: &'s mut S,
    report: ConversionReport,
}

impl<'s, S: SceneSink> Accumulator<'s, S> {
    fn push(&mut self, instance: &ShapeInstance, outcome: InstanceOutcome) {
        match outcome {
            InstanceOutcome::Converted {
                primitive,
                missing_style,
            } => {
                if let Some(warning) = missing_style {
                    log::warn!("{}", warning);
                    self.report.warnings.push(warning);
                }
                self.report.nodes += 1;
                self.report.triangles += primitive.triangle_count();
                self.sink
                    .add_node(instance.label, vec![primitive], Mat4::IDENTITY);
            }
            InstanceOutcome::Skipped(warning) => {
                log::warn!("{}", warning);
                self.report.skipped += 1;
                self.report.warnings.push(warning);
            }
            InstanceOutcome::Filtered => {
                log::debug!("Instance {} filtered out", instance.label);
                self.report.filtered += 1;
            }
        }
    }
}

/// Drives the conversion pipeline over a geometry context.
#[derive(Clone, Debug, Default)]
pub struct SceneAssembler {
    config: AssemblerConfig,
}

impl SceneAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Convert every instance of `context` into a new scene.
    ///
    /// Nodes and warnings are in the context's instance order.
    pub fn run<C>(&self, context: &C) -> (Scene, Vec<ConversionWarning>)
    where
        C: GeometryContext + Sync + ?Sized,
    {
        let mut scene = Scene::new(self.config.scene_name.clone());
        let report = self.run_into(context, &mut scene);
        (scene, report.warnings)
    }

    /// Convert every instance of `context`, appending nodes to `sink`.
    pub fn run_into<C, S>(&self, context: &C, sink: &mut S) -> ConversionReport
    where
        C: GeometryContext + Sync + ?Sized,
        S: SceneSink,
    {
        let instances = context.shape_instances();
        let caches = RunCaches::new(&self.config);

        log::info!(
            "Converting {} shape instances ({})",
            instances.len(),
            if self.config.parallel { "parallel" } else { "sequential" }
        );

        let mut acc = Accumulator {
            sink,
            report: ConversionReport {
                instances: instances.len(),
                ..Default::default()
            },
        };

        if self.config.parallel {
            // Workers only convert; appending stays on this thread, in order
            let outcomes: Vec<InstanceOutcome> = instances
                .par_iter()
                .map(|instance| self.convert_instance(context, instance, &caches))
                .collect();

            for (instance, outcome) in instances.iter().zip(outcomes) {
                acc.push(instance, outcome);
            }
        } else {
            for instance in &instances {
                let outcome = self.convert_instance(context, instance, &caches);
                acc.push(instance, outcome);
            }
        }

        let report = acc.report;
        log::info!(
            "Converted {}/{} instances: {} triangles, {} skipped, {} filtered, {} warnings",
            report.nodes,
            report.instances,
            report.triangles,
            report.skipped,
            report.filtered,
            report.warnings.len()
        );
        if !caches.meshes.is_empty() {
            log::debug!("Decoded {} distinct blobs", caches.meshes.len());
        }

        report
    }

    fn convert_instance<C>(
        &self,
        context: &C,
        instance: &ShapeInstance,
        caches: &RunCaches,
    ) -> InstanceOutcome
    where
        C: GeometryContext + ?Sized,
    {
        if self.config.skip_openings
            && instance.representation == RepresentationType::OpeningsAndAdditionsOnly
        {
            return InstanceOutcome::Filtered;
        }

        let blob = match context.geometry_blob(instance) {
            Some(blob) if !blob.is_empty() => blob,
            _ => {
                return InstanceOutcome::Skipped(ConversionWarning::EmptyGeometry {
                    instance: instance.label,
                })
            }
        };

        match self.build_primitive(context, instance, blob, caches) {
            Ok(None) => InstanceOutcome::Skipped(ConversionWarning::EmptyGeometry {
                instance: instance.label,
            }),
            Ok(Some((primitive, missing_style))) => InstanceOutcome::Converted {
                primitive,
                missing_style: missing_style.map(|style| ConversionWarning::MissingStyle {
                    instance: instance.label,
                    style,
                }),
            },
            Err(error) => {
                InstanceOutcome::Skipped(ConversionWarning::from_error(instance.label, error))
            }
        }
    }

    /// Decode, place, style and build one instance.
    ///
    /// `None` if the blob decodes to a mesh with nothing to render.
    fn build_primitive<C>(
        &self,
        context: &C,
        instance: &ShapeInstance,
        blob: &[u8],
        caches: &RunCaches,
    ) -> Result<Option<(ScenePrimitive, Option<StyleLabel>)>>
    where
        C: GeometryContext + ?Sized,
    {
        let mesh = caches.meshes.decode(instance.geometry, blob)?;
        if mesh.is_empty() {
            return Ok(None);
        }

        let placed = transform::apply(&mesh, &instance.transform)?;

        let resolution = material::resolve_with(instance, |style| {
            caches
                .materials
                .material_for(style, context.style_lookup(style))
        });

        let primitive = primitive::build(&placed, resolution.material)?;
        log::debug!(
            "Instance {}: {} triangles from blob {}",
            instance.label,
            primitive.triangle_count(),
            instance.geometry
        );

        Ok(Some((primitive, resolution.missing_style)))
    }
}

/// Convert `context` with the default configuration.
pub fn run<C>(context: &C) -> (Scene, Vec<ConversionWarning>)
where
    C: GeometryContext + Sync + ?Sized,
{
    SceneAssembler::default().run(context)
}
